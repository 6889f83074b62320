//! This module picks the next upcoming event out of a calendar feed

use std::error::Error;

use chrono::{DateTime, Utc};

use crate::event::MeetupEvent;
use crate::ical;
use crate::traits::FeedSource;

/// Resolves the single next upcoming event from a calendar feed.
///
/// A `Resolver` abstracts a [`FeedSource`] (usually a [`FeedClient`](crate::client::FeedClient))
/// into one question: "what is the next event?". It is deliberately fail-soft: the feed
/// being unreachable, malformed, empty, or all in the past are all answered with `None`,
/// never with an error. The caller is a page renderer that substitutes a static
/// placeholder event, and must keep rendering whatever happens to the feed.
pub struct EventResolver<S>
where
    S: FeedSource,
{
    source: S,
}

impl<S: FeedSource> EventResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Return the upcoming event with the earliest start time, or `None` when there is
    /// nothing to announce.
    ///
    /// "Upcoming" is relative to the wall clock at the time of the call; use
    /// [`resolve_next_event_at`](Self::resolve_next_event_at) to control the clock
    pub async fn resolve_next_event(&self) -> Option<MeetupEvent> {
        self.resolve_next_event_at(Utc::now()).await
    }

    /// Same as [`resolve_next_event`](Self::resolve_next_event), but compares event
    /// starts against a caller-supplied instant instead of the wall clock
    pub async fn resolve_next_event_at(&self, now: DateTime<Utc>) -> Option<MeetupEvent> {
        match self.try_resolve(now).await {
            Ok(Some(event)) => Some(event),
            Ok(None) => {
                log::debug!("The feed contains no upcoming event");
                None
            },
            Err(err) => {
                log::warn!("Unable to resolve the next event: {}", err);
                None
            },
        }
    }

    async fn try_resolve(&self, now: DateTime<Utc>) -> Result<Option<MeetupEvent>, Box<dyn Error>> {
        let body = self.source.fetch().await?;
        let candidates = ical::parse_candidates(&body)?;
        if candidates.is_empty() {
            log::debug!("The feed contains no event at all");
            return Ok(None);
        }

        let mut future_events: Vec<_> = candidates.into_iter()
            .filter(|candidate| candidate.start_date > now)
            .collect();
        // A stable sort, so events sharing a start instant keep their feed order
        future_events.sort_by_key(|candidate| candidate.start_date);

        Ok(future_events.into_iter().next().map(|winner| winner.into_event()))
    }
}


#[cfg(test)]
mod tests {
    const ONE_FUTURE_EVENT: &str = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Test//EN
CALSCALE:GREGORIAN
BEGIN:VEVENT
UID:test-1
DTSTART:20300101T100000Z
DTEND:20300101T120000Z
SUMMARY:Tokyo Vegan Test Event
DESCRIPTION:https://www.meetup.com/tokyovegan/events/123456/
LOCATION:Tokyo
END:VEVENT
END:VCALENDAR
"#;

    const ONE_PAST_EVENT: &str = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Test//EN
CALSCALE:GREGORIAN
BEGIN:VEVENT
UID:test-2
DTSTART:20000101T100000Z
DTEND:20000101T120000Z
SUMMARY:Old Event
DESCRIPTION:https://www.meetup.com/tokyovegan/events/old/
LOCATION:Tokyo
END:VEVENT
END:VCALENDAR
"#;

    // The later event comes first on purpose, the resolver must not rely on feed order
    const TWO_FUTURE_EVENTS: &str = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Test//EN
BEGIN:VEVENT
UID:test-3a
DTSTART:20300601T100000Z
DTEND:20300601T120000Z
SUMMARY:Later Event
END:VEVENT
BEGIN:VEVENT
UID:test-3b
DTSTART:20300301T100000Z
DTEND:20300301T120000Z
SUMMARY:Sooner Event
END:VEVENT
END:VCALENDAR
"#;

    const MIXED_EVENTS: &str = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Test//EN
BEGIN:VEVENT
UID:test-4a
DTSTART:20000101T100000Z
DTEND:20000101T120000Z
SUMMARY:Long Gone
END:VEVENT
BEGIN:VEVENT
UID:test-4b
DTSTART:20300301T100000Z
DTEND:20300301T120000Z
SUMMARY:Still To Come
END:VEVENT
END:VCALENDAR
"#;

    const SAME_START_EVENTS: &str = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Test//EN
BEGIN:VEVENT
UID:test-5a
DTSTART:20300301T100000Z
DTEND:20300301T120000Z
SUMMARY:First In Feed
END:VEVENT
BEGIN:VEVENT
UID:test-5b
DTSTART:20300301T100000Z
DTEND:20300301T130000Z
SUMMARY:Second In Feed
END:VEVENT
END:VCALENDAR
"#;

    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;

    /// A [`FeedSource`] that serves a fixed body, like a server would
    struct StaticFeed(&'static str);

    #[async_trait]
    impl FeedSource for StaticFeed {
        async fn fetch(&self) -> Result<String, Box<dyn Error>> {
            Ok(self.0.to_string())
        }
    }

    /// A [`FeedSource`] whose fetch always fails, like an unreachable server
    struct BrokenFeed;

    #[async_trait]
    impl FeedSource for BrokenFeed {
        async fn fetch(&self) -> Result<String, Box<dyn Error>> {
            Err("connection reset by peer".into())
        }
    }

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn returns_a_future_event() {
        let resolver = EventResolver::new(StaticFeed(ONE_FUTURE_EVENT));
        let event = resolver.resolve_next_event_at(test_now()).await.unwrap();

        assert_eq!(event.title(), "Tokyo Vegan Test Event");
        assert_eq!(event.url().as_str(), "https://www.meetup.com/tokyovegan/events/123456/");
        assert_eq!(event.start_date(), Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap());
        assert_eq!(event.end_date(), Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn excludes_past_events() {
        let resolver = EventResolver::new(StaticFeed(ONE_PAST_EVENT));
        assert_eq!(resolver.resolve_next_event_at(test_now()).await, None);
    }

    #[tokio::test]
    async fn picks_the_earliest_future_event() {
        let resolver = EventResolver::new(StaticFeed(TWO_FUTURE_EVENTS));
        let event = resolver.resolve_next_event_at(test_now()).await.unwrap();
        assert_eq!(event.title(), "Sooner Event");
    }

    #[tokio::test]
    async fn ignores_past_events_among_future_ones() {
        let resolver = EventResolver::new(StaticFeed(MIXED_EVENTS));
        let event = resolver.resolve_next_event_at(test_now()).await.unwrap();
        assert_eq!(event.title(), "Still To Come");
    }

    #[tokio::test]
    async fn feed_order_breaks_ties_between_identical_starts() {
        let resolver = EventResolver::new(StaticFeed(SAME_START_EVENTS));
        let event = resolver.resolve_next_event_at(test_now()).await.unwrap();
        assert_eq!(event.title(), "First In Feed");
    }

    #[tokio::test]
    async fn an_event_starting_now_is_not_upcoming() {
        let resolver = EventResolver::new(StaticFeed(ONE_FUTURE_EVENT));
        let start = Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(resolver.resolve_next_event_at(start).await, None);
    }

    #[tokio::test]
    async fn a_malformed_body_yields_none() {
        let resolver = EventResolver::new(StaticFeed("<html>maintenance</html>"));
        assert_eq!(resolver.resolve_next_event_at(test_now()).await, None);
    }

    #[tokio::test]
    async fn a_fetch_failure_yields_none() {
        let resolver = EventResolver::new(BrokenFeed);
        assert_eq!(resolver.resolve_next_event_at(test_now()).await, None);
    }
}
