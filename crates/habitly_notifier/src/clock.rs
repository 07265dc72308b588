// --- File: crates/habitly_notifier/src/clock.rs ---

use chrono::{DateTime, Datelike, Utc};

pub use habitly_common::models::REFERENCE_ZONE;

/// One minute of wall-clock time in the reference zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinuteStamp {
    /// Zero-padded `HH:MM`, the value habit alert times are matched against.
    pub time: String,
    /// Canonical `YYYY-MM-DD` date key for the same instant.
    pub date_key: String,
    /// Day-of-week of `date_key`, 0 = Sunday .. 6 = Saturday.
    pub weekday: u8,
}

/// Converts an instant to the minute stamp reminder matching runs on.
///
/// All three fields derive from a single zone conversion, so the weekday
/// always belongs to the calendar date the date key names. Around local
/// midnight these still flip together.
pub fn minute_stamp(now: DateTime<Utc>) -> MinuteStamp {
    let local = now.with_timezone(&REFERENCE_ZONE);
    let date = local.date_naive();
    MinuteStamp {
        time: local.format("%H:%M").to_string(),
        date_key: date.format("%Y-%m-%d").to_string(),
        weekday: date.weekday().num_days_from_sunday() as u8,
    }
}
