//! # slot-engine
//!
//! Deterministic appointment availability for a services marketplace.
//!
//! Given a provider's weekly working schedule and a snapshot of existing
//! bookings, the engine answers two questions: when is the next open slot
//! (looking up to 14 days ahead), and which morning/evening slots should a
//! quick-pick widget offer. Every computation is a pure function of its inputs;
//! the current instant and timezone are injected by the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::TimeZone;
//! use chrono_tz::Europe::Berlin;
//! use slot_engine::{next_available_slot, WorkingSchedule};
//!
//! // Mondays, 09:00-10:00.
//! let schedule = WorkingSchedule::new(&[1], "09:00", "10:00").unwrap();
//! // 2026-03-16 is a Monday.
//! let now = Berlin.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap();
//!
//! let label = next_available_slot(&schedule, &[], Some(60), now);
//! assert_eq!(label.as_deref(), Some("Сегодня в 09:00"));
//! ```
//!
//! ## Modules
//!
//! - [`availability`] — `next_available_slot` and `quick_slots`
//! - [`schedule`] — Validated `WorkingSchedule` and normalization of stored JSON
//! - [`booking`] — Booking records, active-status filtering, busy intervals
//! - [`grid`] — Grid-aligned slot scan over a working day
//! - [`labels`] — Russian slot and day labels
//! - [`snapshot`] — Provider input document (schedule + booking rows)
//! - [`config`] — Engine defaults and duration normalization
//! - [`clock`] — `HH:MM` parsing and minute arithmetic
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod clock;
pub mod config;
pub mod error;
pub mod grid;
pub mod labels;
pub mod schedule;
pub mod snapshot;

pub use availability::{
    next_available, next_available_slot, quick_slots, DayPeriod, QuickSlots, Slot,
};
pub use booking::{active_bookings, Booking, BookingRecord, BookingStatus};
pub use config::EngineConfig;
pub use error::ScheduleError;
pub use schedule::{RawSchedule, WorkingSchedule};
pub use snapshot::ProviderSnapshot;
