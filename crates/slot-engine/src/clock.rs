//! Wall-clock helpers: `HH:MM` parsing, minute-of-day arithmetic, and the
//! local date of an injected instant.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse a 24-hour `H:MM` or `HH:MM` string.
///
/// Hours must be 0-23 and minutes exactly two digits in 00-59. Surrounding
/// whitespace is ignored. Returns `None` for anything else.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let (hours, minutes) = s.trim().split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let h: u32 = hours.parse().ok()?;
    let m: u32 = minutes.parse().ok()?;
    NaiveTime::from_hms_opt(h, m, 0)
}

/// Like [`parse_hhmm`] but reports the offending input.
pub fn parse_hhmm_strict(s: &str) -> Result<NaiveTime> {
    parse_hhmm(s).ok_or_else(|| ScheduleError::InvalidTime(s.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(s.to_string()))
}

/// Parse an IANA timezone name such as `Europe/Berlin`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| ScheduleError::InvalidTimezone(name.to_string()))
}

pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Format a minute-of-day as `HH:MM`. Values past midnight wrap.
pub fn format_minutes(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub fn format_hhmm(time: NaiveTime) -> String {
    format_minutes(minutes_of_day(time))
}

/// Convert a minute-of-day (< 1440) back into a `NaiveTime`.
pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// The calendar date of `now` in its own timezone.
pub fn local_date(now: &DateTime<Tz>) -> NaiveDate {
    now.date_naive()
}

/// Minutes elapsed since local midnight at `now`.
pub fn local_minute(now: &DateTime<Tz>) -> u32 {
    minutes_of_day(now.time())
}

/// Serde adapter that writes a `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid HH:MM time '{}'", raw)))
    }
}

