//! Tests for the provider input document.

use chrono::TimeZone;
use chrono_tz::Europe::Berlin;
use slot_engine::{quick_slots, ProviderSnapshot};

#[test]
fn snapshot_normalizes_schedule_and_filters_bookings() {
    let snapshot = ProviderSnapshot::from_json(
        r#"{
            "schedule": { "workingDays": [1], "startTime": "09:00", "endTime": "11:00" },
            "bookings": [
                { "date": "2026-03-16", "time": "09:00", "serviceDuration": 60 },
                { "date": "2026-03-16", "time": "10:00", "status": "cancelled" }
            ]
        }"#,
    )
    .unwrap();

    let schedule = snapshot.schedule().unwrap();
    let bookings = snapshot.active_bookings();
    assert_eq!(bookings.len(), 1);

    let now = Berlin.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap();
    let quick = quick_slots(Some(&schedule), &bookings, Some(60), now, Some(1));
    assert_eq!(quick.morning.len(), 1);
    assert_eq!(quick.morning[0].label, "Сегодня в 10:00");
}

#[test]
fn missing_schedule_is_none() {
    let snapshot = ProviderSnapshot::from_json(r#"{ "bookings": [] }"#).unwrap();

    assert!(snapshot.schedule().is_none());
}

#[test]
fn null_schedule_is_none() {
    let snapshot = ProviderSnapshot::from_json(r#"{ "schedule": null }"#).unwrap();

    assert!(snapshot.schedule().is_none());
    assert!(snapshot.active_bookings().is_empty());
}

#[test]
fn empty_schedule_object_normalizes_to_defaults() {
    let snapshot = ProviderSnapshot::from_json(r#"{ "schedule": {} }"#).unwrap();

    let schedule = snapshot.schedule().unwrap();
    assert_eq!(schedule.working_days().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
}
