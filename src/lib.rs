//! This crate resolves the next upcoming event of a meetup group from its public
//! iCalendar (ICS) feed.
//!
//! It provides an HTTP client for the feed in the [`client`] module, backed by an
//! hour-long response cache in the [`cache`] module so the calendar host is not hit on
//! every page render.
//!
//! The [`EventResolver`] ties these together: it fetches the feed, parses its `VEVENT`
//! entries, and returns the single event with the earliest future start time. \
//! The contract is fail-soft: an unreachable host, a malformed feed, and a feed with
//! nothing upcoming all resolve to `None`, never to an error. Callers are expected to
//! substitute their own placeholder event in that case, so a feed outage can never break
//! the page that embeds the result.

pub mod traits;

mod event;
pub use event::MeetupEvent;
mod ical;

pub mod resolver;
pub use resolver::EventResolver;

pub mod client;
pub use client::FeedClient;
pub mod cache;

pub mod settings;
