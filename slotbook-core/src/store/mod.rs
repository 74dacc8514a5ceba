//! The remote tree events are persisted in.
//!
//! Events live at `YYYY/MM/D/<id>` (day not zero-padded). A month is read as
//! a whole, which is what the index is fed from; writes address one event.

mod file;

pub use file::FileStore;

use chrono::{Datelike, NaiveDate};

use crate::day_key::MonthKey;
use crate::error::SlotbookResult;
use crate::event::EventData;
use crate::snapshot::MonthSnapshot;

#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Everything stored under the month path, or `None` if there is nothing.
    async fn fetch_month(&self, month: MonthKey) -> SlotbookResult<Option<MonthSnapshot>>;

    /// Store a new event under `date` and return the id it was given.
    async fn push(&self, date: NaiveDate, event: &EventData) -> SlotbookResult<String>;

    /// Replace the event at `date/id` entirely.
    async fn update(&self, date: NaiveDate, event_id: &str, event: &EventData)
    -> SlotbookResult<()>;

    /// Delete the event at `date/id`. Deleting a missing path is not an error.
    async fn remove(&self, date: NaiveDate, event_id: &str) -> SlotbookResult<()>;
}

/// Path segments of a day in the remote tree: `YYYY`, `MM`, `D`.
pub fn day_segments(date: NaiveDate) -> (String, String, String) {
    (
        format!("{:04}", date.year()),
        format!("{:02}", date.month()),
        date.day().to_string(),
    )
}

/// Full remote path of an event, e.g. `2024/03/5/<id>`.
pub fn event_path(date: NaiveDate, event_id: &str) -> String {
    let (year, month, day) = day_segments(date);
    format!("{year}/{month}/{day}/{event_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_is_not_padded_in_paths() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(event_path(date, "abc"), "2024/03/5/abc");
        assert_eq!(
            day_segments(date),
            ("2024".to_string(), "03".to_string(), "5".to_string())
        );
    }
}
