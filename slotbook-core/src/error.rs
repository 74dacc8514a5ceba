//! Error types for slotbook.

use thiserror::Error;

use crate::draft::DraftError;

/// Errors that can occur in slotbook operations.
#[derive(Error, Debug)]
pub enum SlotbookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No events are loaded for {0}")]
    DayNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid day key '{0}'. Expected YYYY/MM/DD")]
    InvalidDayKey(String),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for slotbook operations.
pub type SlotbookResult<T> = Result<T, SlotbookError>;
