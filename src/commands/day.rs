use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;
use serde::Serialize;
use slotbook_core::day_key;
use slotbook_core::store::RemoteStore;
use slotbook_core::{EventData, MonthKey, Schedule};

use crate::render::{self, Render};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayEntry<'a> {
    id: &'a str,
    start: Option<String>,
    end: Option<String>,
    starts_at: Option<NaiveDateTime>,
    ends_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    event: &'a EventData,
}

fn json_entries<'a>(
    date: NaiveDate,
    entries: Vec<(&'a str, &'a EventData)>,
) -> Vec<DayEntry<'a>> {
    entries
        .into_iter()
        .map(|(id, event)| DayEntry {
            id,
            start: event.start_label(),
            end: event.end_label(),
            starts_at: event.start_time(date),
            ends_at: event.end_time(date),
            event,
        })
        .collect()
}

pub async fn run<S: RemoteStore>(
    schedule: &mut Schedule<S>,
    path: Option<&str>,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let date = path.map_or(today, |p| day_key::day_from_path(p, today));
    schedule.subscribe_month(MonthKey::from_date(date)).await?;

    let entries = schedule.day(date);

    if json {
        println!("{}", serde_json::to_string_pretty(&json_entries(date, entries))?);
        return Ok(());
    }

    println!("{}", render::day_heading(date));

    if entries.is_empty() {
        println!("   No appointments");
        return Ok(());
    }

    for (id, event) in entries {
        println!("   {}", event.render().replace('\n', "\n   "));
        println!("   {}{}", " ".repeat(14), id.dimmed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_carries_labels_and_timestamps() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let event = EventData {
            name: "Checkup".into(),
            time_windows: vec![10, 11, 12],
            ..Default::default()
        };

        let value = serde_json::to_value(json_entries(date, vec![("e1", &event)])).unwrap();
        let entry = &value[0];
        assert_eq!(entry["id"], "e1");
        assert_eq!(entry["start"], "09:30");
        assert_eq!(entry["end"], "10:15");
        assert_eq!(entry["startsAt"], "2024-03-15T09:30:00");
        assert_eq!(entry["endsAt"], "2024-03-15T10:15:00");
        assert_eq!(entry["name"], "Checkup");
        assert_eq!(entry["timeWindows"], serde_json::json!([10, 11, 12]));
    }
}
