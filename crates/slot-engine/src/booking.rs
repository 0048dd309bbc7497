//! Existing bookings as the engine sees them: a date, a start time, and an
//! optional service duration.
//!
//! Booking storage owns these records; the engine only reads a snapshot.
//! Cancelled and completed bookings free their slot, so callers pass only
//! active ones (see [`active_bookings`]).

use chrono::NaiveDate;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::{self, minutes_of_day};
use crate::error::Result;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Pending and confirmed bookings occupy their slot.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A booking row as stored, with string-typed date and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    #[serde(default, alias = "duration")]
    pub service_duration: Option<i64>,
    #[serde(default)]
    pub status: BookingStatus,
}

impl BookingRecord {
    /// Parse the record into a [`Booking`].
    ///
    /// # Errors
    /// Returns `InvalidDate` or `InvalidTime` when the stored strings are malformed.
    pub fn to_booking(&self) -> Result<Booking> {
        let date = clock::parse_date(&self.date)?;
        let time = clock::parse_hhmm_strict(&self.time)?;
        let duration_minutes = self
            .service_duration
            .filter(|&m| m > 0)
            .and_then(|m| u32::try_from(m).ok());
        Ok(Booking {
            date,
            time,
            duration_minutes,
        })
    }
}

/// An occupied appointment: `[time, time + duration)` on `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// The booked service's own duration, if known.
    pub duration_minutes: Option<u32>,
}

impl Booking {
    pub fn new(date: NaiveDate, time: NaiveTime, duration_minutes: Option<u32>) -> Self {
        Self {
            date,
            time,
            duration_minutes,
        }
    }

    /// The occupied interval in minutes since midnight. Uses the booking's
    /// own duration when positive, otherwise `fallback_minutes`. The end
    /// saturates rather than wrapping.
    pub fn interval(&self, fallback_minutes: u32) -> BusyInterval {
        let start = minutes_of_day(self.time);
        let duration = self
            .duration_minutes
            .filter(|&m| m > 0)
            .unwrap_or(fallback_minutes);
        BusyInterval {
            start,
            end: start.saturating_add(duration),
        }
    }
}

/// Keep the bookings that occupy a slot, dropping inactive statuses and
/// records that cannot be parsed.
pub fn active_bookings(records: &[BookingRecord]) -> Vec<Booking> {
    records
        .iter()
        .filter(|r| r.status.is_active())
        .filter_map(|r| match r.to_booking() {
            Ok(booking) => Some(booking),
            Err(e) => {
                warn!(error = %e, date = %r.date, time = %r.time, "skipping malformed booking");
                None
            }
        })
        .collect()
}

/// A half-open `[start, end)` interval in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: u32,
    pub end: u32,
}

impl BusyInterval {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Two intervals overlap iff `a.start < b.end && a.end > b.start`.
    /// Intervals that merely touch do not overlap.
    pub fn overlaps(&self, other: &BusyInterval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Busy intervals of all bookings that fall on `date`.
pub fn busy_intervals_on(
    bookings: &[Booking],
    date: NaiveDate,
    fallback_minutes: u32,
) -> Vec<BusyInterval> {
    bookings
        .iter()
        .filter(|b| b.date == date)
        .map(|b| b.interval(fallback_minutes))
        .collect()
}
