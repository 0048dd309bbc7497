//! Appointment availability: the next open slot and quick-pick slots.
//!
//! Both operations walk calendar days forward from the local date of `now`,
//! skip non-working days, and offer grid-aligned starts that do not overlap
//! any existing booking. They are pure: identical inputs, including `now`,
//! always produce identical output.

use chrono::{DateTime, Days, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::booking::{busy_intervals_on, Booking};
use crate::clock;
use crate::config::EngineConfig;
use crate::grid;
use crate::labels;
use crate::schedule::WorkingSchedule;

/// Which quick-pick bucket a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    /// Starts before noon.
    Morning,
    /// Starts at or after noon.
    Evening,
}

/// A bookable start time that overlaps no existing booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date: NaiveDate,
    #[serde(with = "clock::hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: u32,
    /// Calendar days after today (0 = today).
    pub day_offset: u32,
    /// Full label, e.g. `"Завтра в 10:00"`.
    pub label: String,
    /// Day heading, e.g. `"Завтра"` or `"пн, 23 мар."`.
    pub day_label: String,
    pub period: DayPeriod,
}

/// Quick-pick slots split into morning and evening buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickSlots {
    /// `false` only when the provider has no schedule configured at all.
    pub has_schedule: bool,
    pub morning: Vec<Slot>,
    pub evening: Vec<Slot>,
}

impl QuickSlots {
    fn without_schedule() -> Self {
        Self {
            has_schedule: false,
            morning: Vec::new(),
            evening: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.evening.is_empty()
    }
}

/// Find the next open slot within the configured horizon (14 days by default).
///
/// `service_duration` is in minutes; absent or non-positive values use the
/// default of 60, other values are clamped to 15-240.
pub fn next_available(
    schedule: &WorkingSchedule,
    bookings: &[Booking],
    service_duration: Option<i64>,
    now: DateTime<Tz>,
) -> Option<Slot> {
    next_available_with_config(
        schedule,
        bookings,
        service_duration,
        now,
        &EngineConfig::default(),
    )
}

/// Like [`next_available`] but returns only the human-readable label,
/// e.g. `"Сегодня в 09:00"`.
pub fn next_available_slot(
    schedule: &WorkingSchedule,
    bookings: &[Booking],
    service_duration: Option<i64>,
    now: DateTime<Tz>,
) -> Option<String> {
    next_available(schedule, bookings, service_duration, now).map(|slot| slot.label)
}

/// [`next_available`] with explicit engine settings.
pub fn next_available_with_config(
    schedule: &WorkingSchedule,
    bookings: &[Booking],
    service_duration: Option<i64>,
    now: DateTime<Tz>,
    config: &EngineConfig,
) -> Option<Slot> {
    let scan = DayScanner::new(schedule, bookings, service_duration, now, config);

    let found = (0..config.horizon_days).find_map(|offset| {
        let (date, starts) = scan.open_starts(offset)?;
        let first = *starts.first()?;
        Some(scan.slot(offset, date, first))
    });

    debug!(
        duration = scan.duration,
        horizon_days = config.horizon_days,
        found = found.as_ref().map(|s| s.label.as_str()),
        "next available slot"
    );
    found
}

/// Collect up to three morning and three evening slots over the next
/// `days_ahead` days (7 by default).
///
/// Pass `None` for `schedule` when the provider has not configured one; the
/// result then has `has_schedule == false`. A configured but fully booked
/// schedule yields `has_schedule == true` with empty buckets.
pub fn quick_slots(
    schedule: Option<&WorkingSchedule>,
    bookings: &[Booking],
    service_duration: Option<i64>,
    now: DateTime<Tz>,
    days_ahead: Option<u32>,
) -> QuickSlots {
    quick_slots_with_config(
        schedule,
        bookings,
        service_duration,
        now,
        days_ahead,
        &EngineConfig::default(),
    )
}

/// [`quick_slots`] with explicit engine settings.
pub fn quick_slots_with_config(
    schedule: Option<&WorkingSchedule>,
    bookings: &[Booking],
    service_duration: Option<i64>,
    now: DateTime<Tz>,
    days_ahead: Option<u32>,
    config: &EngineConfig,
) -> QuickSlots {
    let Some(schedule) = schedule else {
        debug!("provider has no schedule, no quick slots");
        return QuickSlots::without_schedule();
    };

    let scan = DayScanner::new(schedule, bookings, service_duration, now, config);
    let days = config.normalize_days_ahead(days_ahead);
    let capacity = config.quick_bucket_capacity;

    let mut morning = Vec::new();
    let mut evening = Vec::new();

    for offset in 0..days {
        if morning.len() >= capacity && evening.len() >= capacity {
            break;
        }
        let Some((date, starts)) = scan.open_starts(offset) else {
            continue;
        };
        for start in starts {
            let bucket = if start < config.noon_minute {
                &mut morning
            } else {
                &mut evening
            };
            if bucket.len() < capacity {
                bucket.push(scan.slot(offset, date, start));
            }
        }
    }

    debug!(
        duration = scan.duration,
        days,
        morning = morning.len(),
        evening = evening.len(),
        "quick slots"
    );

    QuickSlots {
        has_schedule: true,
        morning,
        evening,
    }
}

/// Per-call state shared by both operations.
struct DayScanner<'a> {
    schedule: &'a WorkingSchedule,
    bookings: &'a [Booking],
    duration: u32,
    today: NaiveDate,
    now_minute: u32,
    config: &'a EngineConfig,
}

impl<'a> DayScanner<'a> {
    fn new(
        schedule: &'a WorkingSchedule,
        bookings: &'a [Booking],
        service_duration: Option<i64>,
        now: DateTime<Tz>,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            schedule,
            bookings,
            duration: config.normalize_duration(service_duration),
            today: clock::local_date(&now),
            now_minute: clock::local_minute(&now),
            config,
        }
    }

    /// Open grid starts on the day `offset` days after today, or `None` when
    /// the day is not worked or has no working window.
    fn open_starts(&self, offset: u32) -> Option<(NaiveDate, Vec<u32>)> {
        let date = self.today.checked_add_days(Days::new(u64::from(offset)))?;
        if !self.schedule.is_working_day(date) {
            trace!(%date, "not a working day");
            return None;
        }
        let Some((work_start, work_end)) = self.schedule.working_minutes() else {
            trace!(%date, "working window is empty");
            return None;
        };

        let busy = busy_intervals_on(self.bookings, date, self.duration);
        let not_before = if offset == 0 && self.config.skip_past_slots {
            self.now_minute
        } else {
            0
        };
        let starts: Vec<u32> =
            grid::free_starts(work_start, work_end, self.duration, &busy, not_before).collect();

        trace!(%date, busy = busy.len(), open = starts.len(), "scanned day");
        Some((date, starts))
    }

    fn slot(&self, offset: u32, date: NaiveDate, start: u32) -> Slot {
        let period = if start < self.config.noon_minute {
            DayPeriod::Morning
        } else {
            DayPeriod::Evening
        };
        Slot {
            date,
            time: clock::time_from_minutes(start).unwrap_or_default(),
            duration_minutes: self.duration,
            day_offset: offset,
            label: labels::slot_label(offset, date, start),
            day_label: labels::day_label(offset, date),
            period,
        }
    }
}
