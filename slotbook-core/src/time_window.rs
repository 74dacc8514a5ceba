//! Slot arithmetic for the daily business window.
//!
//! A day is split into [`SLOTS_PER_DAY`] slots of [`SLOT_MINUTES`] minutes each,
//! starting at 07:00. Every surface that shows times (day grid, month grid,
//! slot pickers) derives its labels from the functions here.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::{DAY_START_HOUR, SLOT_MINUTES, SLOTS_PER_DAY};

/// Index of a 15-minute slot. Valid values are `0..SLOTS_PER_DAY`, but the
/// arithmetic accepts any integer.
pub type Slot = i64;

const LABEL_FORMAT: &str = "%H:%M";

const DAY_START: NaiveTime = match NaiveTime::from_hms_opt(DAY_START_HOUR, 0, 0) {
    Some(time) => time,
    None => panic!("day start hour out of range"),
};

/// Which edge of a slot a timestamp refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    Start,
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Boundary::Start => write!(f, "start"),
            Boundary::End => write!(f, "end"),
        }
    }
}

impl FromStr for Boundary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Boundary::Start),
            "end" => Ok(Boundary::End),
            other => Err(format!("Unknown boundary '{}'. Expected start or end", other)),
        }
    }
}

fn offset(slot: Slot, boundary: Boundary) -> Option<TimeDelta> {
    let slots = match boundary {
        Boundary::Start => slot,
        Boundary::End => slot.checked_add(1)?,
    };
    TimeDelta::try_minutes(SLOT_MINUTES.checked_mul(slots)?)
}

/// Wall-clock time of a slot edge on `date`.
///
/// `date@07:00 + 15min * slot`, plus one more slot for [`Boundary::End`].
/// Slots outside the window are not rejected; they simply land before 07:00
/// or after 18:00 (possibly on a neighbouring day). `None` only when the
/// result falls outside what chrono can represent.
pub fn slot_to_timestamp(
    date: NaiveDate,
    slot: Slot,
    boundary: Boundary,
) -> Option<NaiveDateTime> {
    date.and_time(DAY_START).checked_add_signed(offset(slot, boundary)?)
}

/// `HH:MM` label for a slot edge, independent of the day.
pub fn slot_label(slot: Slot, boundary: Boundary) -> Option<String> {
    let (time, _) = DAY_START.overflowing_add_signed(offset(slot, boundary)?);
    Some(time.format(LABEL_FORMAT).to_string())
}

/// Inverse of [`slot_label`]: the slot whose `boundary` edge falls on `label`.
///
/// Returns `None` if the label does not parse or is not on the slot grid.
pub fn slot_from_label(label: &str, boundary: Boundary) -> Option<Slot> {
    let time = NaiveTime::parse_from_str(label.trim(), LABEL_FORMAT).ok()?;
    let minutes = i64::from(time.num_seconds_from_midnight() / 60)
        - i64::from(DAY_START_HOUR) * 60;

    if minutes % SLOT_MINUTES != 0 {
        return None;
    }

    let slot = match boundary {
        Boundary::Start => minutes / SLOT_MINUTES,
        Boundary::End => minutes / SLOT_MINUTES - 1,
    };

    is_valid_slot(slot).then_some(slot)
}

/// Inclusive ascending run of slots between `a` and `b` (which defaults to 0).
///
/// The arguments may come in either order; the result is never empty.
pub fn expand_range(a: Slot, b: Option<Slot>) -> Vec<Slot> {
    let b = b.unwrap_or(0);
    let (min, max) = if b > a { (a, b) } else { (b, a) };
    (min..=max).collect()
}

/// Truncate an untyped number toward zero. NaN becomes 0.
pub fn truncate(raw: f64) -> Slot {
    raw.trunc() as Slot
}

pub fn is_valid_slot(slot: Slot) -> bool {
    (0..SLOTS_PER_DAY).contains(&slot)
}

/// Slots that start on a full hour.
pub fn is_hour_mark(slot: Slot) -> bool {
    slot % 4 == 0
}

/// Every slot of the day with its label, as offered by slot pickers.
pub fn slot_options(boundary: Boundary) -> Vec<(Slot, String)> {
    (0..SLOTS_PER_DAY)
        .filter_map(|slot| Some((slot, slot_label(slot, boundary)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn first_slot_starts_at_seven() {
        assert_eq!(slot_to_timestamp(day(), 0, Boundary::Start), Some(at(7, 0)));
        assert_eq!(slot_to_timestamp(day(), 0, Boundary::End), Some(at(7, 15)));
    }

    #[test]
    fn last_slot_ends_at_six_pm() {
        assert_eq!(slot_to_timestamp(day(), 43, Boundary::Start), Some(at(17, 45)));
        assert_eq!(slot_to_timestamp(day(), 43, Boundary::End), Some(at(18, 0)));
    }

    #[test]
    fn every_slot_is_fifteen_minutes_long() {
        for slot in 0..SLOTS_PER_DAY {
            let start = slot_to_timestamp(day(), slot, Boundary::Start).unwrap();
            let end = slot_to_timestamp(day(), slot, Boundary::End).unwrap();
            assert_eq!(end - start, TimeDelta::minutes(15));
            assert_eq!(start, at(7, 0) + TimeDelta::minutes(15 * slot));
        }
    }

    #[test]
    fn out_of_range_slots_are_not_guarded() {
        assert_eq!(slot_to_timestamp(day(), -4, Boundary::Start), Some(at(6, 0)));
        assert_eq!(slot_to_timestamp(day(), 44, Boundary::Start), Some(at(18, 0)));

        let next_day = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert_eq!(
            slot_to_timestamp(day(), 68, Boundary::Start),
            next_day.and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn huge_slots_do_not_overflow() {
        assert_eq!(slot_to_timestamp(day(), 10_000_000_000, Boundary::Start), None);
        assert_eq!(slot_to_timestamp(day(), i64::MAX, Boundary::End), None);
        assert_eq!(slot_to_timestamp(day(), i64::MIN, Boundary::Start), None);
        assert_eq!(slot_label(100_000_000_000_000_000, Boundary::Start), None);
        assert_eq!(slot_label(i64::MAX, Boundary::End), None);
    }

    #[test]
    fn labels() {
        assert_eq!(slot_label(10, Boundary::Start).as_deref(), Some("09:30"));
        assert_eq!(slot_label(12, Boundary::End).as_deref(), Some("10:15"));
        assert_eq!(slot_label(43, Boundary::End).as_deref(), Some("18:00"));
    }

    #[test]
    fn labels_round_trip_through_the_grid() {
        for boundary in [Boundary::Start, Boundary::End] {
            for (slot, label) in slot_options(boundary) {
                assert_eq!(slot_from_label(&label, boundary), Some(slot));
            }
        }
    }

    #[test]
    fn off_grid_labels_are_rejected() {
        assert_eq!(slot_from_label("09:20", Boundary::Start), None);
        assert_eq!(slot_from_label("18:00", Boundary::Start), None);
        assert_eq!(slot_from_label("07:00", Boundary::End), None);
        assert_eq!(slot_from_label("noon", Boundary::Start), None);
    }

    #[test]
    fn expand_range_is_order_independent() {
        assert_eq!(expand_range(5, Some(2)), vec![2, 3, 4, 5]);
        assert_eq!(expand_range(2, Some(5)), vec![2, 3, 4, 5]);
    }

    #[test]
    fn expand_range_defaults_to_zero() {
        assert_eq!(expand_range(3, None), vec![0, 1, 2, 3]);
        assert_eq!(expand_range(-2, None), vec![-2, -1, 0]);
    }

    #[test]
    fn expand_range_single_slot() {
        assert_eq!(expand_range(7, Some(7)), vec![7]);
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate(3.9), 3);
        assert_eq!(truncate(-2.7), -2);
        assert_eq!(truncate(f64::NAN), 0);
        assert_eq!(expand_range(truncate(4.8), Some(truncate(2.2))), vec![2, 3, 4]);
    }

    #[test]
    fn hour_marks() {
        assert!(is_hour_mark(0));
        assert!(is_hour_mark(40));
        assert!(!is_hour_mark(41));
    }

    #[test]
    fn boundary_parses() {
        assert_eq!("start".parse::<Boundary>(), Ok(Boundary::Start));
        assert_eq!("end".parse::<Boundary>(), Ok(Boundary::End));
        assert!("middle".parse::<Boundary>().is_err());
    }
}
