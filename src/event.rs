//! Meetup events resolved from a calendar feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// An upcoming event of the meetup group.
///
/// This is the public result shape of a [`resolver`](crate::resolver) call. It is returned
/// by value: every resolution produces a fresh, independent instance that the caller owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeetupEvent {
    title: String,
    url: Url,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl MeetupEvent {
    pub fn new(title: String, url: Url, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self { title, url, start_date, end_date }
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn url(&self) -> &Url   { &self.url }
    pub fn start_date(&self) -> DateTime<Utc> { self.start_date }
    pub fn end_date(&self) -> DateTime<Utc>   { self.end_date }
}

/// One `VEVENT` from the feed, normalized.
///
/// Candidates only live within a single resolution call: they are extracted from the
/// parsed feed, filtered against "now", and the winner is projected down to a
/// [`MeetupEvent`].
///
/// `start_date < end_date` is assumed of well-formed feeds but never enforced: a feed
/// entry with reversed dates passes through unchanged.
#[derive(Clone, Debug)]
pub(crate) struct EventCandidate {
    pub title: String,
    pub url: Url,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub description: String,
}

impl EventCandidate {
    /// Project this candidate down to the public shape. The description is dropped
    pub fn into_event(self) -> MeetupEvent {
        MeetupEvent::new(self.title, self.url, self.start_date, self.end_date)
    }
}
