//! Core types for slotbook.
//!
//! This crate provides everything the `slotbook` binary works with:
//! - `time_window` for mapping 15-minute slots to wall-clock times
//! - `index` for the in-memory, day-keyed view of events
//! - `store` for the remote tree events are persisted in

pub mod config;
pub mod constants;
pub mod day_key;
pub mod draft;
pub mod error;
pub mod event;
pub mod index;
pub mod schedule;
pub mod snapshot;
pub mod store;
pub mod time_window;

pub use day_key::{DayKey, MonthKey};
pub use draft::{DraftError, EventDraft};
pub use error::{SlotbookError, SlotbookResult};
pub use event::EventData;
pub use index::EventIndex;
pub use schedule::Schedule;
pub use time_window::{Boundary, Slot};
