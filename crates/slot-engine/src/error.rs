//! Error types for the storage boundary of the slot engine.
//!
//! The engine operations never fail; these errors are raised only when
//! building validated values from stored records.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Working schedule has no working days")]
    EmptyWorkingDays,

    #[error("Invalid weekday {0}: expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekday(i64),

    #[error("Invalid time '{0}': expected 24-hour HH:MM")]
    InvalidTime(String),

    #[error("Working hours end ({end}) is not after start ({start})")]
    InvertedHours { start: String, end: String },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
