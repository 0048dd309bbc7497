//! The per-provider input document: the stored schedule (if any) and the
//! booking rows of the search window.
//!
//! ```json
//! {
//!   "schedule": { "workingDays": [1,2,3,4,5], "startTime": "10:00", "endTime": "18:00" },
//!   "bookings": [ { "date": "2026-03-16", "time": "10:00", "serviceDuration": 60, "status": "confirmed" } ]
//! }
//! ```

use serde::Deserialize;

use crate::booking::{active_bookings, Booking, BookingRecord};
use crate::schedule::{RawSchedule, WorkingSchedule};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSnapshot {
    pub schedule: Option<RawSchedule>,
    pub bookings: Vec<BookingRecord>,
}

impl ProviderSnapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The normalized schedule, or `None` when the provider has none.
    pub fn schedule(&self) -> Option<WorkingSchedule> {
        self.schedule.as_ref().map(WorkingSchedule::normalize)
    }

    /// Bookings that occupy a slot (pending or confirmed, well-formed).
    pub fn active_bookings(&self) -> Vec<Booking> {
        active_bookings(&self.bookings)
    }
}
