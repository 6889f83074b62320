use chrono::{TimeZone, Utc};

use next_meetup::settings;
use next_meetup::{EventResolver, FeedClient, MeetupEvent};

#[tokio::main]
async fn main() {
    env_logger::init();

    let client = FeedClient::new(settings::feed_url());
    let resolver = EventResolver::new(client);

    let event = match resolver.resolve_next_event().await {
        Some(event) => event,
        None => {
            log::warn!("No upcoming event could be resolved, showing the placeholder");
            placeholder_event()
        },
    };

    println!("{}", event.title());
    println!("    starts {}", event.start_date());
    println!("    ends   {}", event.end_date());
    println!("    {}", event.url());
}

/// What a page renderer would display when the feed yields nothing
fn placeholder_event() -> MeetupEvent {
    MeetupEvent::new(
        "Tokyo Vegan Meetup - Shinjuku Dinner".to_string(),
        "https://www.meetup.com/vegan-389/".parse().unwrap(),
        // 19:00-21:00 JST
        Utc.with_ymd_and_hms(2026, 3, 8, 10, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap(),
    )
}
