//! Event records as stored in the remote tree.
//!
//! Field names on the wire are camelCase, matching what is already in the store.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::DEFAULT_COLOR;
use crate::time_window::{self, Boundary, Slot};

/// A single appointment. The day it belongs to is not part of the record;
/// it comes from the path the record is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventData {
    pub added_by: String,
    #[serde(deserialize_with = "deserialize_added_date")]
    pub added_date: DateTime<Utc>,
    pub color: String,
    pub email: String,
    pub name: String,
    pub note: String,
    pub phone: String,
    /// Occupied slots, ascending
    #[serde(deserialize_with = "deserialize_slots")]
    pub time_windows: Vec<Slot>,
}

impl Default for EventData {
    fn default() -> Self {
        EventData {
            added_by: String::new(),
            added_date: DateTime::<Utc>::default(),
            color: DEFAULT_COLOR.to_string(),
            email: String::new(),
            name: String::new(),
            note: String::new(),
            phone: String::new(),
            time_windows: Vec::new(),
        }
    }
}

impl EventData {
    pub fn first_slot(&self) -> Option<Slot> {
        self.time_windows.first().copied()
    }

    pub fn last_slot(&self) -> Option<Slot> {
        self.time_windows.last().copied()
    }

    pub fn start_time(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.first_slot()
            .and_then(|slot| time_window::slot_to_timestamp(date, slot, Boundary::Start))
    }

    pub fn end_time(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.last_slot()
            .and_then(|slot| time_window::slot_to_timestamp(date, slot, Boundary::End))
    }

    pub fn start_label(&self) -> Option<String> {
        self.first_slot()
            .and_then(|slot| time_window::slot_label(slot, Boundary::Start))
    }

    pub fn end_label(&self) -> Option<String> {
        self.last_slot()
            .and_then(|slot| time_window::slot_label(slot, Boundary::End))
    }

    /// Replace the occupied slots with the run between `start` and `end`.
    pub fn reslot(&mut self, start: Slot, end: Slot) {
        self.time_windows = time_window::expand_range(start, Some(end));
    }
}

impl fmt::Display for EventData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Earlier-starting events first, then earlier-ending ones.
pub fn cmp_by_slots(a: &EventData, b: &EventData) -> Ordering {
    a.first_slot()
        .cmp(&b.first_slot())
        .then_with(|| a.last_slot().cmp(&b.last_slot()))
}

/// Accepts RFC 3339 strings as well as epoch milliseconds.
fn deserialize_added_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {ms}"))),
        Raw::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom),
    }
}

/// Slots may have been written as floats; they are truncated toward zero.
fn deserialize_slots<'de, D>(deserializer: D) -> Result<Vec<Slot>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<f64>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(time_window::truncate).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn event(name: &str, slots: Vec<Slot>) -> EventData {
        EventData {
            name: name.to_string(),
            time_windows: slots,
            ..Default::default()
        }
    }

    #[test]
    fn deserializes_store_record() {
        let value = json!({
            "addedBy": "reception@example.com",
            "addedDate": "2024-03-01T09:12:00+01:00",
            "color": "#ff0000",
            "email": "",
            "name": "Checkup",
            "note": "bring results",
            "phone": "555-0100",
            "timeWindows": [10, 11, 12]
        });

        let event: EventData = serde_json::from_value(value).unwrap();
        assert_eq!(event.name, "Checkup");
        assert_eq!(event.time_windows, vec![10, 11, 12]);
        assert_eq!(
            event.added_date,
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 12, 0).unwrap()
        );
    }

    #[test]
    fn tolerates_sparse_records() {
        let value = json!({ "name": "Walk-in", "addedDate": 0, "timeWindows": [3.0, 4.7] });

        let event: EventData = serde_json::from_value(value).unwrap();
        assert_eq!(event.color, DEFAULT_COLOR);
        assert_eq!(event.note, "");
        assert_eq!(event.time_windows, vec![3, 4]);
        assert_eq!(event.added_date, DateTime::<Utc>::default());
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(event("Checkup", vec![1])).unwrap();
        assert!(value.get("timeWindows").is_some());
        assert!(value.get("addedBy").is_some());
        assert!(value.get("time_windows").is_none());
    }

    #[test]
    fn start_and_end_labels() {
        let event = event("Checkup", vec![10, 11, 12]);
        assert_eq!(event.start_label().as_deref(), Some("09:30"));
        assert_eq!(event.end_label().as_deref(), Some("10:15"));

        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            event.end_time(date),
            Some(date.and_hms_opt(10, 15, 0).unwrap())
        );
    }

    #[test]
    fn empty_slots_have_no_times() {
        let event = event("Nothing", vec![]);
        assert_eq!(event.start_label(), None);
        assert_eq!(event.end_time(NaiveDate::default()), None);
    }

    #[test]
    fn absurd_stored_slots_have_no_times() {
        let event: EventData =
            serde_json::from_str(r#"{"name":"x","timeWindows":[1e17]}"#).unwrap();
        assert_eq!(event.first_slot(), Some(100_000_000_000_000_000));
        assert_eq!(event.start_label(), None);
        assert_eq!(event.end_label(), None);
        assert_eq!(event.start_time(NaiveDate::default()), None);
    }

    #[test]
    fn ordering_by_slots() {
        let early = event("a", vec![0, 1]);
        let late = event("b", vec![2, 3, 4]);
        let long = event("c", vec![0, 1, 2]);

        assert_eq!(cmp_by_slots(&early, &late), Ordering::Less);
        assert_eq!(cmp_by_slots(&late, &early), Ordering::Greater);
        assert_eq!(cmp_by_slots(&early, &long), Ordering::Less);
    }

    #[test]
    fn reslot_expands_range() {
        let mut event = event("Checkup", vec![1]);
        event.reslot(6, 4);
        assert_eq!(event.time_windows, vec![4, 5, 6]);
    }
}
