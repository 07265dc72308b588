// --- File: crates/habitly_common/src/models.rs ---
//! Domain models shared across the application.
//!
//! The central type is [`Habit`] together with its [`Recurrence`]. Stored
//! records are normalized into this canonical shape at the datastore
//! boundary, so nothing past that boundary needs to know about legacy field
//! layouts.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Reference time zone for alert times and date keys.
///
/// Alert times and habit date keys are interpreted in this zone regardless
/// of where a user's device happens to be. UTC+9, no daylight saving.
pub const REFERENCE_ZONE: Tz = chrono_tz::Asia::Seoul;

/// Canonical `YYYY-MM-DD` date key of an instant in the reference zone.
pub fn date_key_in_reference_zone(now: DateTime<Utc>) -> String {
    now.with_timezone(&REFERENCE_ZONE)
        .format("%Y-%m-%d")
        .to_string()
}

/// How often a habit recurs.
///
/// `Weekly` carries the applicable weekdays (0 = Sunday .. 6 = Saturday).
/// `Once` carries the single calendar day the habit applies to; a `None`
/// date means the stored record had neither a start date nor a usable
/// creation timestamp, and such a habit is never due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "repeat_type", rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly { days: Vec<u8> },
    Once { date: Option<String> },
}

/// A user-defined recurring or one-off task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Opaque datastore document id.
    pub id: String,
    /// Owning user id.
    pub user_id: String,
    /// Display name, interpolated into notification bodies.
    pub name: String,
    /// Optional alert time as zero-padded `HH:MM` in the reference zone.
    pub alert_time: Option<String>,
    /// Earliest date the habit is visible, as a `YYYY-MM-DD` date key.
    pub start_date: Option<String>,
    pub recurrence: Recurrence,
}

impl Habit {
    /// Whether the habit applies on the given day.
    ///
    /// `date_key` is a canonical `YYYY-MM-DD` string and `weekday` the
    /// matching day-of-week (0 = Sunday). Canonical date keys compare
    /// chronologically as plain strings, which is how the start-date gate
    /// works.
    pub fn is_due_on(&self, date_key: &str, weekday: u8) -> bool {
        if let Some(start) = self.start_date.as_deref() {
            if date_key < start {
                return false;
            }
        }
        match &self.recurrence {
            Recurrence::Daily => true,
            Recurrence::Weekly { days } => days.contains(&weekday),
            Recurrence::Once { date } => date.as_deref() == Some(date_key),
        }
    }
}

/// Day-of-week of a `YYYY-MM-DD` date key, 0 = Sunday .. 6 = Saturday.
///
/// Derived from the calendar date alone. A `NaiveDate` has no zone, so the
/// weekday can never disagree with the date key it was computed from.
/// Returns `None` for anything that is not a canonical date key.
pub fn weekday_of(date_key: &str) -> Option<u8> {
    NaiveDate::parse_from_str(date_key, "%Y-%m-%d")
        .ok()
        .map(|d| d.weekday().num_days_from_sunday() as u8)
}

/// Content of one push notification, independent of the delivery platform.
///
/// Platform presentation hints (urgency, sound, channel) are applied by the
/// delivery client; only the text travels through the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNote {
    pub title: String,
    pub body: String,
}

/// Receipt for a successfully submitted push message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushReceipt {
    /// Provider-assigned message id.
    pub message_id: String,
}
