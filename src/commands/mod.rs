pub mod day;
pub mod delete;
pub mod month;
pub mod move_event;
pub mod new;
pub mod slots;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use slotbook_core::DayKey;
use slotbook_core::time_window::{self, Boundary, Slot};

/// Parse a time ("09:30") or a slot number ("10") into a slot.
///
/// Times must sit on the grid; numbers are truncated, so "10.7" is slot 10.
pub fn parse_slot(input: &str, boundary: Boundary) -> Result<Slot> {
    let input = input.trim();

    if input.contains(':') {
        return time_window::slot_from_label(input, boundary).with_context(|| {
            format!(
                "\"{}\" is not a slot {} between 07:00 and 18:00 on a 15-minute step",
                input, boundary
            )
        });
    }

    let raw: f64 = input
        .parse()
        .with_context(|| format!("Could not parse time or slot: \"{}\"", input))?;
    Ok(time_window::truncate(raw))
}

/// Parse a required `YYYY/MM/DD` day. Unlike the day views this does not
/// fall back to today, since it selects what gets changed.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let key: DayKey = input.trim().parse()?;
    Ok(key.date())
}
