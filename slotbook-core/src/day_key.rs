//! Day and month keys, and resolution of dates from path segments.
//!
//! The same key function is used when inserting into, removing from and
//! reading the index. Keys also double as the `YYYY/MM/DD` path segments
//! used to address a day from the command line.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::SlotbookError;

/// Canonical `YYYY/MM/DD` key of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        DayKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.0)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y/%m/%d"))
    }
}

impl FromStr for DayKey {
    type Err = SlotbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = match s.split('/').collect::<Vec<_>>().as_slice() {
            [year, month, day] => parse_ymd(year, month, day),
            _ => None,
        };
        date.map(DayKey)
            .ok_or_else(|| SlotbookError::InvalidDayKey(s.to_string()))
    }
}

/// `YYYY/MM` key of a calendar month, the unit subscriptions are made in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.day(1)
            .unwrap_or_else(|| unreachable!("month keys are built from valid dates"))
    }

    /// The given day of this month, if it exists.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

fn parse_segment(segment: &str, len: usize) -> Option<u32> {
    if segment.len() != len || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn parse_ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year = parse_segment(year, 4)?;
    let month = parse_segment(month, 2)?;
    let day = parse_segment(day, 2)?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Resolve a day from `YYYY`, `MM`, `DD` path segments, falling back to `today`
/// if any segment is malformed or the date does not exist.
pub fn date_from_params(year: &str, month: &str, day: &str, today: NaiveDate) -> NaiveDate {
    parse_ymd(year, month, day).unwrap_or(today)
}

/// Resolve the first day of a month from `YYYY`, `MM` path segments, falling
/// back to `today` if they are malformed.
pub fn month_from_params(year: &str, month: &str, today: NaiveDate) -> NaiveDate {
    parse_ymd(year, month, "01").unwrap_or(today)
}

/// Default date for a new event opened from `path`.
///
/// - `YYYY/MM/DD` selects that day.
/// - `YYYY/MM` selects the first of the month, or `today` if that is already past.
/// - Anything else selects `today`.
pub fn initial_date_from_path(path: &str, today: NaiveDate) -> NaiveDate {
    let mut segments = path.trim_matches('/').split('/');
    let (Some(year), Some(month)) = (segments.next(), segments.next()) else {
        return today;
    };

    match segments.next() {
        Some(day) => parse_ymd(year, month, day).unwrap_or(today),
        None => match parse_ymd(year, month, "01") {
            Some(first) if first < today => today,
            Some(first) => first,
            None => today,
        },
    }
}

/// Split a `YYYY/MM/DD` (or `YYYY/MM`) path into a day, with the usual fallback.
pub fn day_from_path(path: &str, today: NaiveDate) -> NaiveDate {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        [year, month, day] => date_from_params(year, month, day, today),
        [year, month] => month_from_params(year, month, today),
        _ => today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_key_format() {
        assert_eq!(DayKey::from_date(date(2024, 3, 5)).to_string(), "2024/03/05");
        assert_eq!(MonthKey::from_date(date(2024, 3, 5)).to_string(), "2024/03");
    }

    #[test]
    fn day_key_parses_its_own_output() {
        let key = DayKey::from_date(date(2024, 12, 31));
        assert_eq!(key.to_string().parse::<DayKey>().unwrap(), key);
        assert!("2024-12-31".parse::<DayKey>().is_err());
    }

    #[test]
    fn day_key_requires_padded_segments() {
        assert!("2024/3/5".parse::<DayKey>().is_err());
        assert!("2024/03/5".parse::<DayKey>().is_err());
        assert!("2024/+3/05".parse::<DayKey>().is_err());
        assert!("2024/02/31".parse::<DayKey>().is_err());
        assert!("2024/03/05/".parse::<DayKey>().is_err());
        assert_eq!(
            "2024/03/05".parse::<DayKey>().unwrap().date(),
            date(2024, 3, 5)
        );
    }

    #[test]
    fn month_key_helpers() {
        let month = MonthKey::from_date(date(2024, 2, 20));
        assert_eq!(month.first_day(), date(2024, 2, 1));
        assert_eq!(month.day(29), Some(date(2024, 2, 29)));
        assert_eq!(month.day(30), None);
        assert!(month.contains(date(2024, 2, 1)));
        assert!(!month.contains(date(2024, 3, 1)));
    }

    #[test]
    fn valid_params_select_the_day() {
        let today = date(2026, 1, 1);
        assert_eq!(date_from_params("2024", "03", "15", today), date(2024, 3, 15));
        assert_eq!(month_from_params("2024", "03", today), date(2024, 3, 1));
    }

    #[test]
    fn malformed_params_fall_back_to_today() {
        let today = date(2026, 1, 1);
        assert_eq!(date_from_params("24", "03", "15", today), today);
        assert_eq!(date_from_params("2024", "3", "15", today), today);
        assert_eq!(date_from_params("2024", "03", "xx", today), today);
        assert_eq!(date_from_params("2024", "02", "31", today), today);
        assert_eq!(month_from_params("abcd", "03", today), today);
    }

    #[test]
    fn initial_date_for_day_path() {
        let today = date(2024, 3, 10);
        assert_eq!(initial_date_from_path("/2024/03/20", today), date(2024, 3, 20));
    }

    #[test]
    fn initial_date_for_month_path() {
        let today = date(2024, 3, 10);
        // current month: first day is already past
        assert_eq!(initial_date_from_path("/2024/03", today), today);
        // future month: first of that month
        assert_eq!(initial_date_from_path("/2024/05", today), date(2024, 5, 1));
    }

    #[test]
    fn initial_date_for_other_paths() {
        let today = date(2024, 3, 10);
        assert_eq!(initial_date_from_path("/", today), today);
        assert_eq!(initial_date_from_path("/login", today), today);
        assert_eq!(initial_date_from_path("/2024/3", today), today);
    }

    #[test]
    fn day_from_path_variants() {
        let today = date(2024, 3, 10);
        assert_eq!(day_from_path("2024/03/15", today), date(2024, 3, 15));
        assert_eq!(day_from_path("2024/04", today), date(2024, 4, 1));
        assert_eq!(day_from_path("tomorrow", today), today);
    }
}
