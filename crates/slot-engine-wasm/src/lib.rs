//! WASM bindings for slot-engine.
//!
//! Exposes next-slot and quick-pick computation to the booking widget via
//! `wasm-bindgen`. Complex values cross the boundary as JSON strings: the
//! provider snapshot goes in, a `Slot`/`QuickSlots` document comes out.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```
//!
//! The exported functions are thin wrappers over the `*_json` functions below,
//! which return `Result<String, String>` and can be tested natively.

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde::Serialize;
use slot_engine::availability::{next_available_with_config, quick_slots_with_config};
use slot_engine::{EngineConfig, ProviderSnapshot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse `now` and place it in the provider's timezone.
///
/// Accepts RFC 3339 (e.g., "2026-03-16T08:00:00+01:00") or a naive local
/// datetime (e.g., "2026-03-16T08:00:00") interpreted in `timezone`.
fn parse_now(now: &str, timezone: &str) -> Result<DateTime<Tz>, String> {
    let tz = slot_engine::clock::parse_timezone(timezone).map_err(|e| e.to_string())?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(now) {
        return Ok(dt.with_timezone(&tz));
    }
    let naive = NaiveDateTime::parse_from_str(now, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("Invalid datetime '{}': {}", now, e))?;
    naive
        .and_local_timezone(tz)
        .earliest()
        .ok_or_else(|| format!("Local time '{}' does not exist in {}", now, timezone))
}

fn parse_snapshot(json: &str) -> Result<ProviderSnapshot, String> {
    ProviderSnapshot::from_json(json).map_err(|e| format!("Invalid snapshot JSON: {}", e))
}

fn parse_config(json: Option<&str>) -> Result<EngineConfig, String> {
    match json {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(raw).map_err(|e| format!("Invalid config JSON: {}", e))
        }
        _ => Ok(EngineConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Native entry points
// ---------------------------------------------------------------------------

/// Next open slot as JSON (`Slot` object or `null`).
pub fn next_available_slot_json(
    snapshot_json: &str,
    now: &str,
    timezone: &str,
    duration_minutes: Option<i32>,
    config_json: Option<&str>,
) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let now = parse_now(now, timezone)?;
    let config = parse_config(config_json)?;

    let slot = snapshot.schedule().and_then(|schedule| {
        next_available_with_config(
            &schedule,
            &snapshot.active_bookings(),
            duration_minutes.map(i64::from),
            now,
            &config,
        )
    });

    to_json(&slot)
}

/// Quick-pick slots as JSON (`{hasSchedule, morning, evening}`).
pub fn quick_slots_json(
    snapshot_json: &str,
    now: &str,
    timezone: &str,
    duration_minutes: Option<i32>,
    days_ahead: Option<u32>,
    config_json: Option<&str>,
) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let now = parse_now(now, timezone)?;
    let config = parse_config(config_json)?;

    let schedule = snapshot.schedule();
    let quick = quick_slots_with_config(
        schedule.as_ref(),
        &snapshot.active_bookings(),
        duration_minutes.map(i64::from),
        now,
        days_ahead,
        &config,
    );

    to_json(&quick)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the next open slot for a provider.
///
/// # Arguments
/// - `snapshot_json` -- `{schedule, bookings}` provider document
/// - `now` -- Current instant, RFC 3339 or naive local datetime
/// - `timezone` -- IANA timezone of the provider (e.g., "Europe/Berlin")
/// - `duration_minutes` -- Optional service duration
/// - `config_json` -- Optional engine config overrides
#[wasm_bindgen(js_name = "nextAvailableSlot")]
pub fn next_available_slot(
    snapshot_json: &str,
    now: &str,
    timezone: &str,
    duration_minutes: Option<i32>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    next_available_slot_json(
        snapshot_json,
        now,
        timezone,
        duration_minutes,
        config_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Compute morning/evening quick-pick slots for a provider.
///
/// Arguments as for `nextAvailableSlot`, plus `days_ahead` (default 7).
#[wasm_bindgen(js_name = "quickSlots")]
pub fn quick_slots(
    snapshot_json: &str,
    now: &str,
    timezone: &str,
    duration_minutes: Option<i32>,
    days_ahead: Option<u32>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    quick_slots_json(
        snapshot_json,
        now,
        timezone,
        duration_minutes,
        days_ahead,
        config_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}
