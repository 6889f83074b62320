//! Support for library configuration options

use std::time::Duration;

use url::Url;

/// The public iCalendar export of the meetup group. This is the feed that gets polled
/// when no override is provided.
pub static DEFAULT_FEED_URL: &str = "https://www.meetup.com/vegan-389/events/ical/";

/// The environment variable that overrides [`DEFAULT_FEED_URL`]
pub static FEED_URL_VAR: &str = "MEETUP_ICS_URL";

/// The group page, used for events that carry no URL of their own
pub static FALLBACK_EVENT_URL: &str = "https://www.meetup.com/tokyovegan/";

/// How long a fetched feed body stays fresh in the [`cache`](crate::cache)
pub static CACHE_TTL: Duration = Duration::from_secs(3600);

/// Return the URL of the calendar feed to poll.
///
/// This is the value of the environment variable named in [`FEED_URL_VAR`] when it is set
/// to a valid URL, and [`DEFAULT_FEED_URL`] otherwise.
pub fn feed_url() -> Url {
    match std::env::var(FEED_URL_VAR) {
        Ok(value) => match Url::parse(&value) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("Ignoring invalid {} setting {:?}: {}", FEED_URL_VAR, value, err);
                default_feed_url()
            },
        },
        Err(_) => default_feed_url(),
    }
}

fn default_feed_url() -> Url {
    Url::parse(DEFAULT_FEED_URL).unwrap(/* this cannot panic since the default is a valid URL */)
}
