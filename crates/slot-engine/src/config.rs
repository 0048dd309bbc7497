//! Engine defaults and normalization of the requested service duration.

use serde::{Deserialize, Serialize};

/// Tunable constants for slot computation.
///
/// The defaults reproduce the marketplace behavior: 60-minute services clamped
/// to 15-240 minutes, a 14-day search horizon, and three morning plus three
/// evening quick-pick slots over the next 7 days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Duration used when the caller supplies none or a non-positive value.
    pub default_duration_minutes: u32,
    pub min_duration_minutes: u32,
    pub max_duration_minutes: u32,
    /// Number of calendar days (starting today) searched by `next_available`.
    pub horizon_days: u32,
    /// Default number of days scanned by `quick_slots`.
    pub quick_days_ahead: u32,
    /// Maximum slots per quick-pick bucket.
    pub quick_bucket_capacity: usize,
    /// Slots starting before this minute of day are "morning".
    pub noon_minute: u32,
    /// Skip today's slots that start before the current local time. Off by
    /// default: day 0 is scanned from the start of the working window.
    pub skip_past_slots: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: 60,
            min_duration_minutes: 15,
            max_duration_minutes: 240,
            horizon_days: 14,
            quick_days_ahead: 7,
            quick_bucket_capacity: 3,
            noon_minute: 12 * 60,
            skip_past_slots: false,
        }
    }
}

impl EngineConfig {
    /// Normalize a requested service duration.
    ///
    /// Absent or non-positive values fall back to `default_duration_minutes`;
    /// anything else is clamped into `[min_duration_minutes, max_duration_minutes]`.
    pub fn normalize_duration(&self, requested: Option<i64>) -> u32 {
        match requested {
            Some(minutes) if minutes > 0 => {
                let min = i64::from(self.min_duration_minutes);
                let max = i64::from(self.max_duration_minutes.max(self.min_duration_minutes));
                minutes.clamp(min, max) as u32
            }
            _ => self.default_duration_minutes,
        }
    }

    /// Clamp a requested quick-pick horizon into `[1, horizon_days]`.
    pub fn normalize_days_ahead(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.quick_days_ahead)
            .clamp(1, self.horizon_days.max(1))
    }
}
