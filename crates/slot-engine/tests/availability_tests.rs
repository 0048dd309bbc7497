//! Tests for `next_available_slot` and `quick_slots`.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::{Europe::Berlin, Tz};
use slot_engine::availability::{next_available_with_config, quick_slots_with_config};
use slot_engine::{
    next_available, next_available_slot, quick_slots, Booking, DayPeriod, EngineConfig,
    WorkingSchedule,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    Berlin.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn booking(d: NaiveDate, h: u32, m: u32, duration: Option<u32>) -> Booking {
    Booking::new(d, time(h, m), duration)
}

fn schedule(days: &[i64], start: &str, end: &str) -> WorkingSchedule {
    WorkingSchedule::new(days, start, end).unwrap()
}

/// 2026-03-16 is a Monday.
fn monday_8am() -> DateTime<Tz> {
    at(2026, 3, 16, 8, 0)
}

// ── next_available_slot ─────────────────────────────────────────────────────

#[test]
fn single_hour_schedule_offers_today() {
    let s = schedule(&[1], "09:00", "10:00");

    let label = next_available_slot(&s, &[], Some(60), monday_8am());

    assert_eq!(label.as_deref(), Some("Сегодня в 09:00"));
}

#[test]
fn fully_booked_day_rolls_over_to_next_week_with_date_label() {
    let s = schedule(&[1], "09:00", "10:00");
    let bookings = vec![booking(date(2026, 3, 16), 9, 0, Some(60))];

    let slot = next_available(&s, &bookings, Some(60), monday_8am()).unwrap();

    assert_eq!(slot.day_offset, 7);
    assert_eq!(slot.date, date(2026, 3, 23));
    assert_eq!(slot.label, "23 марта в 09:00");
}

#[test]
fn tomorrow_label_for_offset_one() {
    // Working on Tuesday only; now is Monday.
    let s = schedule(&[2], "14:30", "16:00");

    let label = next_available_slot(&s, &[], Some(60), monday_8am());

    assert_eq!(label.as_deref(), Some("Завтра в 14:30"));
}

#[test]
fn conflict_rejects_grid_point_without_shifting_to_gap() {
    // A 30-minute booking at 09:00 leaves 09:30 free, but the grid only
    // offers 09:00, 10:00 and 11:00.
    let s = schedule(&[1], "09:00", "12:00");
    let bookings = vec![booking(date(2026, 3, 16), 9, 0, Some(30))];

    let slot = next_available(&s, &bookings, Some(60), monday_8am()).unwrap();

    assert_eq!(slot.time, time(10, 0));
}

#[test]
fn booking_uses_its_own_duration() {
    let s = schedule(&[1], "09:00", "12:00");
    let bookings = vec![booking(date(2026, 3, 16), 9, 0, Some(120))];

    let slot = next_available(&s, &bookings, Some(60), monday_8am()).unwrap();

    assert_eq!(slot.time, time(11, 0));
}

#[test]
fn booking_without_duration_falls_back_to_service_duration() {
    let s = schedule(&[1], "09:00", "12:00");
    let bookings = vec![
        booking(date(2026, 3, 16), 9, 0, None),
        booking(date(2026, 3, 16), 10, 0, None),
    ];

    let slot = next_available(&s, &bookings, Some(60), monday_8am()).unwrap();

    assert_eq!(slot.time, time(11, 0));
}

#[test]
fn touching_bookings_do_not_block_a_slot() {
    // Bookings end exactly at 09:00 and start exactly at 10:00.
    let s = schedule(&[1], "08:00", "11:00");
    let bookings = vec![
        booking(date(2026, 3, 16), 8, 0, Some(60)),
        booking(date(2026, 3, 16), 10, 0, Some(60)),
    ];
    let config = EngineConfig {
        skip_past_slots: false,
        ..EngineConfig::default()
    };

    let slot =
        next_available_with_config(&s, &bookings, Some(60), monday_8am(), &config).unwrap();

    assert_eq!(slot.label, "Сегодня в 09:00");
}

#[test]
fn bookings_on_other_days_are_ignored() {
    let s = schedule(&[1], "09:00", "10:00");
    let bookings = vec![booking(date(2026, 3, 17), 9, 0, Some(60))];

    let label = next_available_slot(&s, &bookings, Some(60), monday_8am());

    assert_eq!(label.as_deref(), Some("Сегодня в 09:00"));
}

#[test]
fn today_is_scanned_from_start_of_working_window() {
    // Late in the day the first grid point of today is still offered.
    let s = schedule(&[1], "09:00", "18:00");

    let label = next_available_slot(&s, &[], Some(60), at(2026, 3, 16, 17, 0));

    assert_eq!(label.as_deref(), Some("Сегодня в 09:00"));
}

#[test]
fn past_slots_today_can_be_skipped() {
    let s = schedule(&[1], "09:00", "12:00");
    let config = EngineConfig {
        skip_past_slots: true,
        ..EngineConfig::default()
    };

    let slot =
        next_available_with_config(&s, &[], Some(60), at(2026, 3, 16, 10, 30), &config).unwrap();

    assert_eq!(slot.label, "Сегодня в 11:00");
}

#[test]
fn skipping_past_slots_moves_to_next_working_day_when_today_is_over() {
    let s = schedule(&[1, 2], "09:00", "12:00");
    let config = EngineConfig {
        skip_past_slots: true,
        ..EngineConfig::default()
    };

    let slot =
        next_available_with_config(&s, &[], Some(60), at(2026, 3, 16, 17, 0), &config).unwrap();

    assert_eq!(slot.label, "Завтра в 09:00");
}

#[test]
fn huge_duration_limits_from_config_do_not_overflow() {
    let s = schedule(&[1], "09:00", "10:00");
    let config = EngineConfig {
        max_duration_minutes: u32::MAX,
        ..EngineConfig::default()
    };

    let slot = next_available_with_config(&s, &[], Some(i64::MAX), monday_8am(), &config);

    assert_eq!(slot, None);
}

#[test]
fn last_day_of_horizon_is_searched() {
    // Now is Tuesday 2026-03-17; Monday 03-23 is booked, Monday 03-30 is
    // offset 13, the last day inside the 14-day horizon.
    let s = schedule(&[1], "09:00", "10:00");
    let bookings = vec![booking(date(2026, 3, 23), 9, 0, Some(60))];

    let slot = next_available(&s, &bookings, Some(60), at(2026, 3, 17, 8, 0)).unwrap();

    assert_eq!(slot.day_offset, 13);
    assert_eq!(slot.label, "30 марта в 09:00");
}

#[test]
fn nothing_within_horizon_returns_none() {
    let s = schedule(&[1], "09:00", "10:00");
    let bookings = vec![
        booking(date(2026, 3, 23), 9, 0, Some(60)),
        booking(date(2026, 3, 30), 9, 0, Some(60)),
    ];

    assert_eq!(
        next_available_slot(&s, &bookings, Some(60), at(2026, 3, 17, 8, 0)),
        None
    );
}

#[test]
fn duration_absent_or_invalid_defaults_to_sixty() {
    let s = schedule(&[1], "09:00", "12:00");

    for requested in [None, Some(0), Some(-30)] {
        let slot = next_available(&s, &[], requested, monday_8am()).unwrap();
        assert_eq!(slot.duration_minutes, 60, "requested {:?}", requested);
    }
}

#[test]
fn duration_is_clamped_into_range() {
    let s = schedule(&[1], "09:00", "13:00");

    let short = next_available(&s, &[], Some(5), monday_8am()).unwrap();
    assert_eq!(short.duration_minutes, 15);

    let long = next_available(&s, &[], Some(1000), monday_8am()).unwrap();
    assert_eq!(long.duration_minutes, 240);
    assert_eq!(long.time, time(9, 0));
}

#[test]
fn clamped_duration_that_does_not_fit_finds_nothing() {
    let s = schedule(&[1, 2, 3, 4, 5], "09:00", "12:00");

    assert_eq!(next_available(&s, &[], Some(1000), monday_8am()), None);
}

#[test]
fn inverted_hours_from_storage_yield_no_slot() {
    let s = WorkingSchedule::from_json(
        r#"{"workingDays":[0,1,2,3,4,5,6],"startTime":"18:00","endTime":"10:00"}"#,
    );

    assert_eq!(next_available(&s, &[], Some(60), monday_8am()), None);
}

#[test]
fn local_date_comes_from_injected_timezone() {
    // 23:30 UTC Sunday is 00:30 Monday in Berlin.
    let now = Utc
        .with_ymd_and_hms(2026, 3, 15, 23, 30, 0)
        .unwrap()
        .with_timezone(&Berlin);
    let s = schedule(&[1], "09:00", "10:00");

    assert_eq!(
        next_available_slot(&s, &[], Some(60), now).as_deref(),
        Some("Сегодня в 09:00")
    );
}

#[test]
fn identical_inputs_give_identical_results() {
    let s = schedule(&[1, 3, 5], "10:00", "18:00");
    let bookings = vec![booking(date(2026, 3, 16), 10, 0, Some(90))];

    let first = next_available(&s, &bookings, Some(45), monday_8am());
    let second = next_available(&s, &bookings, Some(45), monday_8am());

    assert_eq!(first, second);
}

// ── quick_slots ─────────────────────────────────────────────────────────────

#[test]
fn quick_slots_fill_morning_and_evening_buckets() {
    let s = schedule(&[1, 2, 3, 4, 5], "10:00", "18:00");

    let quick = quick_slots(Some(&s), &[], Some(60), monday_8am(), Some(7));

    assert!(quick.has_schedule);
    assert_eq!(quick.morning.len(), 3);
    assert_eq!(quick.evening.len(), 3);

    assert_eq!(quick.morning[0].time, time(10, 0));
    assert_eq!(quick.morning[0].day_label, "Сегодня");
    assert_eq!(quick.morning[1].time, time(11, 0));
    assert_eq!(quick.morning[1].day_label, "Сегодня");
    // Monday has only two morning slots; the third comes from Tuesday.
    assert_eq!(quick.morning[2].time, time(10, 0));
    assert_eq!(quick.morning[2].day_label, "Завтра");

    let evening_times: Vec<NaiveTime> = quick.evening.iter().map(|s| s.time).collect();
    assert_eq!(evening_times, vec![time(12, 0), time(13, 0), time(14, 0)]);
    assert!(quick.evening.iter().all(|s| s.day_label == "Сегодня"));
    assert!(quick.evening.iter().all(|s| s.period == DayPeriod::Evening));
    assert!(quick.morning.iter().all(|s| s.period == DayPeriod::Morning));
}

#[test]
fn quick_slots_without_schedule_report_no_schedule() {
    let quick = quick_slots(None, &[], Some(60), monday_8am(), None);

    assert!(!quick.has_schedule);
    assert!(quick.is_empty());
}

#[test]
fn fully_booked_week_still_has_schedule() {
    let s = schedule(&[1, 2, 3, 4, 5], "10:00", "12:00");
    let bookings: Vec<Booking> = (16..=20)
        .flat_map(|d| {
            [
                booking(date(2026, 3, d), 10, 0, Some(60)),
                booking(date(2026, 3, d), 11, 0, Some(60)),
            ]
        })
        .collect();

    let quick = quick_slots(Some(&s), &bookings, Some(60), monday_8am(), Some(7));

    assert!(quick.has_schedule);
    assert!(quick.morning.is_empty());
    assert!(quick.evening.is_empty());
}

#[test]
fn quick_slots_use_short_date_after_tomorrow() {
    // Only Wednesday is worked; now is Monday.
    let s = schedule(&[3], "13:00", "15:00");

    let quick = quick_slots(Some(&s), &[], Some(60), monday_8am(), None);

    assert!(quick.morning.is_empty());
    assert_eq!(quick.evening.len(), 2);
    assert_eq!(quick.evening[0].day_label, "ср, 18 мар.");
    assert_eq!(quick.evening[0].label, "18 марта в 13:00");
}

#[test]
fn quick_slots_respect_days_ahead() {
    // Only Friday is worked; a two-day window starting Monday never reaches it.
    let s = schedule(&[5], "10:00", "18:00");

    let quick = quick_slots(Some(&s), &[], Some(60), monday_8am(), Some(2));

    assert!(quick.has_schedule);
    assert!(quick.is_empty());
}

#[test]
fn quick_slots_bucket_capacity_is_configurable() {
    let s = schedule(&[1, 2, 3, 4, 5], "10:00", "18:00");
    let config = EngineConfig {
        quick_bucket_capacity: 5,
        ..EngineConfig::default()
    };

    let quick = quick_slots_with_config(Some(&s), &[], Some(60), monday_8am(), None, &config);

    assert_eq!(quick.morning.len(), 5);
    assert_eq!(quick.evening.len(), 5);
}

#[test]
fn noon_itself_counts_as_evening() {
    let s = schedule(&[1], "11:30", "12:30");

    let quick = quick_slots(Some(&s), &[], Some(30), monday_8am(), Some(1));

    assert_eq!(quick.morning.len(), 1);
    assert_eq!(quick.morning[0].time, time(11, 30));
    assert_eq!(quick.evening.len(), 1);
    assert_eq!(quick.evening[0].time, time(12, 0));
}

#[test]
fn slots_serialize_for_the_ui() {
    let s = schedule(&[1], "09:00", "10:00");
    let slot = next_available(&s, &[], Some(60), monday_8am()).unwrap();

    let json = serde_json::to_value(&slot).unwrap();

    assert_eq!(json["date"], "2026-03-16");
    assert_eq!(json["time"], "09:00");
    assert_eq!(json["label"], "Сегодня в 09:00");
    assert_eq!(json["dayLabel"], "Сегодня");
    assert_eq!(json["period"], "morning");
    assert_eq!(json["durationMinutes"], 60);
}
