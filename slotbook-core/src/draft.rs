//! Unvalidated input for new events.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_COLOR, MIN_NAME_LEN, SLOTS_PER_DAY};
use crate::event::EventData;
use crate::time_window::{self, Slot};

/// Reasons a draft cannot become an event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be at least {min} characters", min = MIN_NAME_LEN)]
    NameTooShort,

    #[error("Start time is required")]
    MissingStartSlot,

    #[error("End time is required")]
    MissingEndSlot,

    #[error("Slot {0} is outside the day (0-{max})", max = SLOTS_PER_DAY - 1)]
    SlotOutOfRange(Slot),

    #[error("End time cannot be earlier than start time")]
    EndBeforeStart,
}

/// Field values for a new event, as collected from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub day: NaiveDate,
    pub color: String,
    pub start_slot: Option<Slot>,
    pub end_slot: Option<Slot>,
    pub note: String,
    pub email: String,
    pub phone: String,
}

impl EventDraft {
    pub fn new(name: impl Into<String>, day: NaiveDate) -> Self {
        EventDraft {
            name: name.into(),
            day,
            color: DEFAULT_COLOR.to_string(),
            start_slot: None,
            end_slot: None,
            note: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }

    pub fn slots(mut self, start: Slot, end: Slot) -> Self {
        self.start_slot = Some(start);
        self.end_slot = Some(end);
        self
    }

    /// Check the draft and turn it into the record to push, plus its day.
    pub fn validate(
        &self,
        added_by: &str,
        now: DateTime<Utc>,
    ) -> Result<(NaiveDate, EventData), DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::NameRequired);
        }
        if name.chars().count() < MIN_NAME_LEN {
            return Err(DraftError::NameTooShort);
        }

        let start = self.start_slot.ok_or(DraftError::MissingStartSlot)?;
        let end = self.end_slot.ok_or(DraftError::MissingEndSlot)?;

        for slot in [start, end] {
            if !time_window::is_valid_slot(slot) {
                return Err(DraftError::SlotOutOfRange(slot));
            }
        }

        if start > end {
            return Err(DraftError::EndBeforeStart);
        }

        let color = if self.color.is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            self.color.clone()
        };

        let event = EventData {
            added_by: added_by.to_string(),
            added_date: now,
            color,
            email: self.email.clone(),
            name: name.to_string(),
            note: self.note.clone(),
            phone: self.phone.clone(),
            time_windows: time_window::expand_range(start, Some(end)),
        };

        Ok((self.day, event))
    }
}
