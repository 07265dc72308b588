// --- File: crates/habitly_habits/src/logic.rs ---
use chrono::{NaiveDate, NaiveTime};
use habitly_common::models::{Habit, Recurrence};
use habitly_firestore::habits::{HabitChanges, HabitDraft};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum HabitInputError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("alert_time must be HH:MM (24h, zero-padded)")]
    BadAlertTime,
    #[error("{0} must be YYYY-MM-DD")]
    BadDate(&'static str),
    #[error("repeat_type must be daily, weekly or once")]
    BadRepeatType,
    #[error("weekly habits need at least one repeat day")]
    EmptyWeekly,
    #[error("repeat_days entries must be 0..=6 (0 = Sunday)")]
    BadWeekday,
}

// --- Data Structures ---

/// Query for the per-day habit listing.
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct DayQuery {
    /// Owning user id
    pub user_id: String,
    /// Date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", param(format = "date", example = "2025-05-05"))]
    pub date: String,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateHabitRequest {
    pub user_id: String,
    pub name: String,
    /// Alert time in HH:MM format, omit for no reminder
    pub alert_time: Option<String>,
    /// One of: daily, weekly, once
    pub repeat_type: String,
    /// Days of week for weekly habits, 0 = Sunday .. 6 = Saturday
    #[serde(default)]
    pub repeat_days: Vec<u8>,
    /// First day the habit applies; defaults to today on the server
    pub start_date: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BatchCreateRequest {
    pub habits: Vec<CreateHabitRequest>,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateHabitRequest {
    pub name: String,
    pub alert_time: Option<String>,
    pub repeat_type: String,
    #[serde(default)]
    pub repeat_days: Vec<u8>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ToggleCompletionRequest {
    pub user_id: String,
    pub habit_id: String,
    /// Date in YYYY-MM-DD format
    pub date: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ToggleCompletionResponse {
    pub completed: bool,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegisterTokenRequest {
    pub user_id: String,
    pub token: String,
}

/// One habit as returned by the API.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HabitView {
    pub id: String,
    pub name: String,
    pub alert_time: Option<String>,
    pub repeat_type: String,
    pub repeat_days: Vec<u8>,
    pub start_date: Option<String>,
}

/// A habit in the per-day listing, with its completion state for that day.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DayHabitView {
    #[serde(flatten)]
    pub habit: HabitView,
    pub completed: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DayHabitsResponse {
    pub date: String,
    pub habits: Vec<DayHabitView>,
}

impl HabitView {
    pub fn from_habit(habit: Habit) -> Self {
        let (repeat_type, repeat_days) = match &habit.recurrence {
            Recurrence::Daily => ("daily", vec![]),
            Recurrence::Weekly { days } => ("weekly", days.clone()),
            Recurrence::Once { .. } => ("once", vec![]),
        };
        Self {
            id: habit.id,
            name: habit.name,
            alert_time: habit.alert_time,
            repeat_type: repeat_type.to_string(),
            repeat_days,
            start_date: habit.start_date,
        }
    }
}

// --- Validation ---

pub fn is_valid_time(value: &str) -> bool {
    value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

pub fn is_valid_date_key(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn check_recurrence(repeat_type: &str, repeat_days: &[u8]) -> Result<(), HabitInputError> {
    match repeat_type {
        "daily" | "once" => Ok(()),
        "weekly" => {
            if repeat_days.is_empty() {
                return Err(HabitInputError::EmptyWeekly);
            }
            if repeat_days.iter().any(|d| *d > 6) {
                return Err(HabitInputError::BadWeekday);
            }
            Ok(())
        }
        _ => Err(HabitInputError::BadRepeatType),
    }
}

fn check_common(
    name: &str,
    alert_time: Option<&str>,
    repeat_type: &str,
    repeat_days: &[u8],
) -> Result<(), HabitInputError> {
    if name.trim().is_empty() {
        return Err(HabitInputError::EmptyName);
    }
    if let Some(time) = alert_time {
        if !time.is_empty() && !is_valid_time(time) {
            return Err(HabitInputError::BadAlertTime);
        }
    }
    check_recurrence(repeat_type, repeat_days)
}

/// Validates a create request and turns it into a storable draft.
///
/// `today` is the current date key in the reference zone; it becomes the
/// start date when the request omits one. An empty alert time is
/// normalized to none.
pub fn draft_from_request(
    req: CreateHabitRequest,
    today: &str,
) -> Result<HabitDraft, HabitInputError> {
    check_common(
        &req.name,
        req.alert_time.as_deref(),
        &req.repeat_type,
        &req.repeat_days,
    )?;
    let start_date = match req.start_date {
        Some(date) if !date.is_empty() => {
            if !is_valid_date_key(&date) {
                return Err(HabitInputError::BadDate("start_date"));
            }
            date
        }
        _ => today.to_string(),
    };
    Ok(HabitDraft {
        user_id: req.user_id,
        name: req.name.trim().to_string(),
        alert_time: req.alert_time.filter(|t| !t.is_empty()),
        repeat_type: req.repeat_type,
        repeat_days: req.repeat_days,
        start_date,
    })
}

/// Validates an update request and turns it into the field changes.
pub fn changes_from_request(req: UpdateHabitRequest) -> Result<HabitChanges, HabitInputError> {
    check_common(
        &req.name,
        req.alert_time.as_deref(),
        &req.repeat_type,
        &req.repeat_days,
    )?;
    Ok(HabitChanges {
        name: req.name.trim().to_string(),
        alert_time: req.alert_time.filter(|t| !t.is_empty()),
        repeat_type: req.repeat_type,
        repeat_days: req.repeat_days,
    })
}
