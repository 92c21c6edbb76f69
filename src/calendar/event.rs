use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::date;

pub const DEFAULT_START_TIME: &str = "12:00";
pub const DEFAULT_END_TIME: &str = "13:00";

/// A single dated occurrence as exchanged with the events API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  #[serde(rename = "eventID", default, skip_serializing_if = "Option::is_none")]
  pub event_id: Option<String>,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub date: String,
  #[serde(default)]
  pub start_time: String,
  #[serde(default)]
  pub end_time: String,
  #[serde(default)]
  pub status: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub title: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub street_address: String,
  #[serde(default)]
  pub postal_number: String,
  #[serde(rename = "eventTypeID", default = "hidden")]
  pub visibility: Visibility,
}

const fn hidden() -> Visibility {
  Visibility::Private
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Visibility {
  #[default]
  Public,
  Private,
}

impl Visibility {
  pub const ALL: [Self; 2] = [Self::Public, Self::Private];

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Public => "public",
      Self::Private => "private",
    }
  }
}

// Anything the server sends that is not explicitly public stays hidden from friends.
impl From<String> for Visibility {
  fn from(value: String) -> Self {
    if value.trim().eq_ignore_ascii_case("public") {
      Self::Public
    } else {
      Self::Private
    }
  }
}

impl From<Visibility> for String {
  fn from(value: Visibility) -> Self {
    value.as_str().to_owned()
  }
}

impl Display for Visibility {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Public => f.write_str("Public"),
      Self::Private => f.write_str("Private"),
    }
  }
}

impl Event {
  pub fn id(&self) -> Option<&str> {
    self.event_id.as_deref()
  }

  pub fn has_id(&self, id: &str) -> bool {
    self.id() == Some(id)
  }

  /// Imported events only carry a title, hand made ones only a status.
  pub fn label(&self) -> &str {
    if self.status.trim().is_empty() {
      &self.title
    } else {
      &self.status
    }
  }

  pub fn day(&self) -> Option<NaiveDate> {
    date::parse_key(&self.date)
  }

  pub fn is_on(&self, key: &str) -> bool {
    self.date == key
  }

  pub const fn is_public(&self) -> bool {
    matches!(self.visibility, Visibility::Public)
  }

  pub fn start(&self) -> Option<NaiveTime> {
    parse_time(&self.start_time)
  }

  pub fn end(&self) -> Option<NaiveTime> {
    parse_time(&self.end_time)
  }

  /// `HH:MM - HH:MM`, falling back to the raw strings when they are not times.
  pub fn time_range(&self) -> String {
    let start = self.start().map_or_else(|| self.start_time.clone(), format_time);
    let end = self.end().map_or_else(|| self.end_time.clone(), format_time);

    match (start.is_empty(), end.is_empty()) {
      (true, true) => String::new(),
      (false, true) => start,
      (true, false) => end,
      (false, false) => format!("{start} - {end}"),
    }
  }
}

/// Accepts `HH:MM`, `HH:MM:SS` and full RFC 3339 timestamps.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
  let value = value.trim();

  NaiveTime::parse_from_str(value, "%H:%M")
    .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.time()))
}

pub fn format_time(time: NaiveTime) -> String {
  time.format("%H:%M").to_string()
}

/// Ascending start time; events without a readable start go last.
pub fn cmp_start(a: &Event, b: &Event) -> Ordering {
  match (a.start(), b.start()) {
    (Some(a), Some(b)) => a.cmp(&b),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}

/// Stable, so events starting at the same time keep their fetch order.
pub fn sort_by_start(events: &mut [&Event]) {
  events.sort_by(|a, b| cmp_start(a, b));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_server_payload() {
    let json = r#"{
      "eventID": "abc",
      "streetAddress": "Main St 1",
      "postalNumber": "7030",
      "status": "Lunch",
      "description": "with Kim",
      "time": "",
      "eventTypeID": "private",
      "date": "2024-03-15",
      "email": "me@example.org",
      "title": "",
      "startTime": "12:00",
      "endTime": "13:00"
    }"#;

    let event: Event = serde_json::from_str(json).unwrap();

    assert_eq!(event.id(), Some("abc"));
    assert_eq!(event.visibility, Visibility::Private);
    assert_eq!(event.street_address, "Main St 1");
    assert_eq!(event.day(), NaiveDate::from_ymd_opt(2024, 3, 15));
    assert_eq!(event.label(), "Lunch");
  }

  #[test]
  fn serializes_without_id_before_creation() {
    let event = Event {
      date: "2024-03-15".into(),
      status: "Lunch".into(),
      ..Event::default()
    };

    let value = serde_json::to_value(&event).unwrap();

    assert!(value.get("eventID").is_none());
    assert!(value.get("title").is_none());
    assert_eq!(value["eventTypeID"], "public");
    assert_eq!(value["startTime"], "");
    assert_eq!(value["date"], "2024-03-15");
  }

  #[test]
  fn unknown_or_missing_visibility_is_private() {
    let event: Event = serde_json::from_str(r#"{"eventTypeID":"friends-only"}"#).unwrap();

    assert_eq!(event.visibility, Visibility::Private);
    assert!(!event.is_public());

    let event: Event = serde_json::from_str(r#"{"date":"2024-03-15"}"#).unwrap();

    assert_eq!(event.visibility, Visibility::Private);
  }

  #[test]
  fn imported_events_use_title_and_rfc3339_times() {
    let event = Event {
      title: "TDT4100 Lecture".into(),
      start_time: "2024-03-15T08:15:00Z".into(),
      end_time: "2024-03-15T10:00:00Z".into(),
      ..Event::default()
    };

    assert_eq!(event.label(), "TDT4100 Lecture");
    assert_eq!(event.start(), NaiveTime::from_hms_opt(8, 15, 0));
    assert_eq!(event.time_range(), "08:15 - 10:00");
  }

  #[test]
  fn sort_is_stable_and_puts_unknown_times_last() {
    let make = |id: &str, start: &str| Event {
      event_id: Some(id.into()),
      start_time: start.into(),
      ..Event::default()
    };
    let events = [
      make("a", "14:00"),
      make("b", ""),
      make("c", "09:30"),
      make("d", "14:00"),
      make("e", "09:30:00"),
    ];

    let mut refs: Vec<&Event> = events.iter().collect();
    sort_by_start(&mut refs);

    let order: Vec<_> = refs.iter().filter_map(|e| e.id()).collect();
    assert_eq!(order, ["c", "e", "a", "d", "b"]);
  }
}
