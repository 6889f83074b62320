//! A module to parse iCal feeds

use std::error::Error;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::event::EventCandidate;
use crate::settings::FALLBACK_EVENT_URL;

/// The literal marker every iCalendar document carries. A body without it is not worth
/// handing to the parser
static CALENDAR_MARKER: &str = "BEGIN:VCALENDAR";

/// Matches meetup-style event URLs embedded in an event description.
/// Feeds from other providers fall through to the group page URL instead.
static EVENT_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://www\.meetup\.com/[^/]+/events/[a-zA-Z0-9_]+/?")
        .unwrap(/* this cannot panic since the pattern is valid */)
});

static FALLBACK_URL: Lazy<Url> = Lazy::new(|| {
    Url::parse(FALLBACK_EVENT_URL).unwrap(/* this cannot panic since the fallback is a valid URL */)
});

/// Parse an iCal feed into the internal representation [`EventCandidate`]
///
/// Every `VEVENT` of every calendar in the feed becomes one candidate. A feed without the
/// calendar marker, or with an entry whose dates cannot be understood, fails as a whole.
pub(crate) fn parse_candidates(content: &str) -> Result<Vec<EventCandidate>, Box<dyn Error>> {
    if content.contains(CALENDAR_MARKER) == false {
        return Err("Body does not contain an iCalendar document".into());
    }

    let reader = ical::IcalParser::new(content.as_bytes());
    let mut candidates = Vec::new();
    for calendar in reader {
        let calendar = match calendar {
            Err(err) => return Err(format!("Unable to parse the calendar feed: {}", err).into()),
            Ok(calendar) => calendar,
        };
        for event in &calendar.events {
            candidates.push(candidate_from_event(event)?);
        }
    }

    Ok(candidates)
}

fn candidate_from_event(event: &IcalEvent) -> Result<EventCandidate, Box<dyn Error>> {
    let title = property_value(event, "SUMMARY").unwrap_or_default();
    let description = property_value(event, "DESCRIPTION").unwrap_or_default();
    let url = resolve_url(property_value(event, "URL").as_deref(), &description);

    let start_prop = match find_property(event, "DTSTART") {
        None => return Err(format!("Missing DTSTART in event {:?}", title).into()),
        Some(prop) => prop,
    };
    let start_date = parse_date_time(start_prop)?;
    let end_date = match find_property(event, "DTEND") {
        Some(prop) => parse_date_time(prop)?,
        None => {
            log::debug!("Event {:?} has no DTEND, falling back to its start", title);
            start_date
        },
    };

    Ok(EventCandidate { title, url, start_date, end_date, description })
}

/// Resolve the URL of an event: its explicit `URL` property when there is one, else the
/// first meetup-style event URL embedded in its description, else the group page
fn resolve_url(explicit: Option<&str>, description: &str) -> Url {
    if let Some(value) = explicit {
        match Url::parse(value) {
            Ok(url) => return url,
            Err(err) => log::warn!("Ignoring unparseable URL property {:?}: {}", value, err),
        }
    }

    if let Some(found) = EVENT_URL_PATTERN.find(description) {
        if let Ok(url) = Url::parse(found.as_str()) {
            return url;
        }
    }

    FALLBACK_URL.clone()
}

fn find_property<'a>(event: &'a IcalEvent, name: &str) -> Option<&'a Property> {
    event.properties.iter().find(|prop| prop.name == name)
}

fn property_value(event: &IcalEvent, name: &str) -> Option<String> {
    find_property(event, name).and_then(|prop| prop.value.clone())
}

/// Convert an iCal date-time property to an absolute instant.
///
/// Handles the value forms a feed may carry: UTC (`...Z`), zoned (a `TZID` parameter),
/// floating (interpreted as UTC), and date-only values (midnight UTC).
fn parse_date_time(prop: &Property) -> Result<DateTime<Utc>, Box<dyn Error>> {
    let value = match prop.value.as_deref() {
        None => return Err(format!("Empty {} property", prop.name).into()),
        Some(value) => value,
    };

    if let Some(tzid) = time_zone_id(prop) {
        let tz: Tz = tzid.parse()
            .map_err(|err| format!("Unknown TZID {:?} on {}: {}", tzid, prop.name, err))?;
        let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
            .map_err(|err| format!("Invalid {} value {:?}: {}", prop.name, value, err))?;
        let zoned = tz.from_local_datetime(&naive)
            .single()
            .ok_or_else(|| format!("Ambiguous local time {:?} in {}", value, tzid))?;
        return Ok(zoned.with_timezone(&Utc));
    }

    if let Some(utc_value) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc_value, "%Y%m%dT%H%M%S")
            .map_err(|err| format!("Invalid {} value {:?}: {}", prop.name, value, err))?;
        return Ok(Utc.from_utc_datetime(&naive));
    }

    if value.contains('T') {
        // A floating time, interpreted as UTC. The feeds this crate targets stamp
        // everything in UTC anyway
        let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
            .map_err(|err| format!("Invalid {} value {:?}: {}", prop.name, value, err))?;
        return Ok(Utc.from_utc_datetime(&naive));
    }

    let date = NaiveDate::parse_from_str(value, "%Y%m%d")
        .map_err(|err| format!("Invalid {} value {:?}: {}", prop.name, value, err))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

fn time_zone_id(prop: &Property) -> Option<&str> {
    for (name, values) in prop.params.as_ref()? {
        if name == "TZID" {
            return values.first().map(|tzid| tzid.as_str());
        }
    }
    None
}
