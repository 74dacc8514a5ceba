//! Fixed parameters of the business-hours grid.

/// Length of one slot, in minutes.
pub const SLOT_MINUTES: i64 = 15;

/// Number of slots in the daily window (07:00 to 18:00).
pub const SLOTS_PER_DAY: i64 = 44;

/// Hour the first slot starts at.
pub const DAY_START_HOUR: u32 = 7;

/// Colour given to new events when none is picked.
pub const DEFAULT_COLOR: &str = "#ffffff";

/// Shortest accepted event name, in characters.
pub const MIN_NAME_LEN: usize = 3;
