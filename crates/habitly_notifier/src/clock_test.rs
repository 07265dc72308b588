// --- File: crates/habitly_notifier/src/clock_test.rs ---

use crate::clock::minute_stamp;
use chrono::{TimeZone, Utc};

#[test]
fn utc_afternoon_is_late_evening_in_reference_zone() {
    // 2024-03-01 14:59 UTC is 23:59 the same day at UTC+9.
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 14, 59, 0).unwrap();
    let stamp = minute_stamp(now);

    assert_eq!(stamp.time, "23:59");
    assert_eq!(stamp.date_key, "2024-03-01");
    assert_eq!(stamp.weekday, 5); // Friday
}

#[test]
fn date_and_weekday_flip_together_at_local_midnight() {
    // One minute later it is already Saturday 2024-03-02 locally.
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap();
    let stamp = minute_stamp(now);

    assert_eq!(stamp.time, "00:00");
    assert_eq!(stamp.date_key, "2024-03-02");
    assert_eq!(stamp.weekday, 6); // Saturday
}

#[test]
fn time_is_zero_padded() {
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 5, 30).unwrap();
    let stamp = minute_stamp(now);

    assert_eq!(stamp.time, "09:05");
}

#[test]
fn sunday_maps_to_zero() {
    let now = Utc.with_ymd_and_hms(2024, 3, 3, 1, 0, 0).unwrap();
    let stamp = minute_stamp(now);

    assert_eq!(stamp.date_key, "2024-03-03");
    assert_eq!(stamp.weekday, 0);
}
