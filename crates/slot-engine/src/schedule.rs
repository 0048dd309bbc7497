//! Weekly working schedule of a provider.
//!
//! Stored schedules are loosely typed JSON (`{"workingDays":[1,2,3],
//! "startTime":"09:00","endTime":"18:00"}`) and may be missing fields or carry
//! garbage. [`RawSchedule`] mirrors that shape; [`WorkingSchedule::normalize`]
//! turns it into a well-formed value once, at the storage boundary, so the
//! engine can assume valid input.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::clock::{self, minutes_of_day};
use crate::error::{Result, ScheduleError};

/// Weekday numbering used by stored schedules: 0 = Sunday .. 6 = Saturday.
pub fn weekday_from_index(index: i64) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

const DEFAULT_WORKING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()
}

fn default_end() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default()
}

/// A schedule as persisted on the provider profile, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSchedule {
    pub working_days: Option<Value>,
    pub start_time: Option<Value>,
    pub end_time: Option<Value>,
}

/// A validated weekly schedule: a non-empty set of working days and a daily
/// working window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSchedule {
    working_days: BTreeSet<u8>,
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkingSchedule {
    /// Strict constructor for callers that want to reject bad input.
    ///
    /// # Errors
    /// - `EmptyWorkingDays` if `days` is empty
    /// - `InvalidWeekday` for any day outside 0-6
    /// - `InvalidTime` if either time is not `HH:MM`
    /// - `InvertedHours` if `end <= start`
    pub fn new(days: &[i64], start_time: &str, end_time: &str) -> Result<Self> {
        if days.is_empty() {
            return Err(ScheduleError::EmptyWorkingDays);
        }
        let mut working_days = BTreeSet::new();
        for &day in days {
            let weekday = weekday_from_index(day).ok_or(ScheduleError::InvalidWeekday(day))?;
            working_days.insert(weekday.num_days_from_sunday() as u8);
        }
        let start = clock::parse_hhmm_strict(start_time)?;
        let end = clock::parse_hhmm_strict(end_time)?;
        if end <= start {
            return Err(ScheduleError::InvertedHours {
                start: clock::format_hhmm(start),
                end: clock::format_hhmm(end),
            });
        }
        Ok(Self {
            working_days,
            start,
            end,
        })
    }

    /// Build a schedule from stored JSON, substituting safe defaults.
    ///
    /// Day entries are accepted as integers, integral floats (`2.0`) or
    /// integer strings (`"2"`); anything else or outside 0-6 is dropped. If
    /// nothing is left the schedule works Monday to Friday. A missing or malformed start
    /// becomes 10:00 and end becomes 18:00. Inverted hours are kept as-is; the
    /// engine treats such days as having no capacity.
    pub fn normalize(raw: &RawSchedule) -> Self {
        let mut working_days = BTreeSet::new();
        if let Some(Value::Array(entries)) = &raw.working_days {
            for entry in entries {
                match day_entry(entry).and_then(weekday_from_index) {
                    Some(weekday) => {
                        working_days.insert(weekday.num_days_from_sunday() as u8);
                    }
                    None => warn!(entry = %entry, "dropping invalid working day"),
                }
            }
        }
        if working_days.is_empty() {
            warn!("schedule has no valid working days, defaulting to Monday-Friday");
            working_days.extend(
                DEFAULT_WORKING_DAYS
                    .iter()
                    .map(|d| d.num_days_from_sunday() as u8),
            );
        }

        let start = normalize_time(raw.start_time.as_ref(), default_start, "startTime");
        let end = normalize_time(raw.end_time.as_ref(), default_end, "endTime");

        Self {
            working_days,
            start,
            end,
        }
    }

    /// Parse stored schedule JSON and normalize it. Unparseable JSON yields
    /// the fully defaulted schedule.
    pub fn from_json(json: &str) -> Self {
        let raw = serde_json::from_str::<RawSchedule>(json).unwrap_or_else(|e| {
            warn!(error = %e, "unreadable schedule JSON, using defaults");
            RawSchedule::default()
        });
        Self::normalize(&raw)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Working days as 0 (Sunday) .. 6 (Saturday), ascending.
    pub fn working_days(&self) -> impl Iterator<Item = u8> + '_ {
        self.working_days.iter().copied()
    }

    pub fn works_on(&self, weekday: Weekday) -> bool {
        self.working_days
            .contains(&(weekday.num_days_from_sunday() as u8))
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.works_on(date.weekday())
    }

    /// The working window in minutes since midnight, or `None` when the end
    /// is not after the start.
    pub fn working_minutes(&self) -> Option<(u32, u32)> {
        let start = minutes_of_day(self.start);
        let end = minutes_of_day(self.end);
        (end > start).then_some((start, end))
    }
}

fn day_entry(entry: &Value) -> Option<i64> {
    match entry {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn normalize_time(value: Option<&Value>, fallback: fn() -> NaiveTime, field: &str) -> NaiveTime {
    match value.and_then(Value::as_str).and_then(clock::parse_hhmm) {
        Some(time) => time,
        None => {
            let fallback = fallback();
            warn!(
                key = field,
                value = ?value,
                fallback = %clock::format_hhmm(fallback),
                "invalid schedule time, using default"
            );
            fallback
        }
    }
}

/// Serializes back to the stored camelCase shape.
impl Serialize for WorkingSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire<'a> {
            working_days: &'a BTreeSet<u8>,
            start_time: String,
            end_time: String,
        }

        Wire {
            working_days: &self.working_days,
            start_time: clock::format_hhmm(self.start),
            end_time: clock::format_hhmm(self.end),
        }
        .serialize(serializer)
    }
}
