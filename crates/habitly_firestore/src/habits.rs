//! Habit repository
//!
//! Reads and writes the `habits` collection and performs the one
//! normalization this codebase allows itself at the boundary: stored
//! documents written before the `repeatType` field existed are folded into
//! the canonical [`Recurrence`] here, so no legacy fallback chain leaks
//! into business logic.

use crate::client::{FirestoreClient, FirestoreError};
use crate::value::{Document, Value};
use chrono::Utc;
use habitly_common::models::{Habit, Recurrence};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

const COLLECTION: &str = "habits";

/// Input for creating a habit.
#[derive(Debug, Clone)]
pub struct HabitDraft {
    pub user_id: String,
    pub name: String,
    pub alert_time: Option<String>,
    pub repeat_type: String,
    pub repeat_days: Vec<u8>,
    pub start_date: String,
}

/// Mutable habit fields; an update always writes all of them.
#[derive(Debug, Clone)]
pub struct HabitChanges {
    pub name: String,
    pub alert_time: Option<String>,
    pub repeat_type: String,
    pub repeat_days: Vec<u8>,
}

/// Repository over the `habits` collection.
#[derive(Clone)]
pub struct HabitRepository {
    client: Arc<FirestoreClient>,
}

impl HabitRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }

    /// All habits whose alert time equals the given `HH:MM` string.
    /// Malformed documents are logged and skipped, never fatal.
    pub async fn find_by_alert_time(
        &self,
        alert_time: &str,
    ) -> Result<Vec<Habit>, FirestoreError> {
        let docs = self
            .client
            .run_query(COLLECTION, &[("alertTime", Value::string(alert_time))])
            .await?;
        Ok(docs.iter().filter_map(habit_from_document).collect())
    }

    /// All habits of one user, oldest first.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Habit>, FirestoreError> {
        let mut docs = self
            .client
            .run_query(COLLECTION, &[("uid", Value::string(user_id))])
            .await?;
        // RFC 3339 timestamps sort chronologically as strings
        docs.sort_by(|a, b| created_at_of(a).cmp(&created_at_of(b)));
        Ok(docs.iter().filter_map(habit_from_document).collect())
    }

    pub async fn create(&self, draft: HabitDraft) -> Result<Habit, FirestoreError> {
        let mut fields = HashMap::new();
        fields.insert("uid".to_string(), Value::string(draft.user_id));
        fields.insert("name".to_string(), Value::string(draft.name));
        fields.insert(
            "alertTime".to_string(),
            Value::string(draft.alert_time.unwrap_or_default()),
        );
        fields.insert("repeatType".to_string(), Value::string(draft.repeat_type));
        fields.insert(
            "repeatDays".to_string(),
            Value::array(
                draft
                    .repeat_days
                    .iter()
                    .map(|d| Value::integer(i64::from(*d)))
                    .collect(),
            ),
        );
        fields.insert("startDate".to_string(), Value::string(draft.start_date));
        fields.insert(
            "createdAt".to_string(),
            Value::timestamp(Utc::now().to_rfc3339()),
        );

        let doc = self.client.create_document(COLLECTION, fields).await?;
        habit_from_document(&doc).ok_or_else(|| {
            FirestoreError::DecodeError(format!("created habit {} is unreadable", doc.doc_id()))
        })
    }

    pub async fn update(
        &self,
        habit_id: &str,
        changes: HabitChanges,
    ) -> Result<(), FirestoreError> {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), Value::string(changes.name));
        fields.insert(
            "alertTime".to_string(),
            Value::string(changes.alert_time.unwrap_or_default()),
        );
        fields.insert("repeatType".to_string(), Value::string(changes.repeat_type));
        fields.insert(
            "repeatDays".to_string(),
            Value::array(
                changes
                    .repeat_days
                    .iter()
                    .map(|d| Value::integer(i64::from(*d)))
                    .collect(),
            ),
        );

        self.client
            .update_fields(
                &format!("{}/{}", COLLECTION, habit_id),
                fields,
                &["name", "alertTime", "repeatType", "repeatDays"],
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, habit_id: &str) -> Result<(), FirestoreError> {
        self.client
            .delete_document(&format!("{}/{}", COLLECTION, habit_id))
            .await
    }
}

fn created_at_of(doc: &Document) -> Option<String> {
    doc.fields
        .get("createdAt")
        .and_then(Value::as_timestamp)
        .map(str::to_string)
}

/// Normalizes a stored habit document into the canonical domain shape.
///
/// Resolution order for the recurrence, preserved from the stored data
/// model's history:
/// 1. explicit `repeatType` field (`daily` / `weekly`; anything else is
///    treated as `once`)
/// 2. legacy `isRecurring` boolean: `true` means `daily`
/// 3. neither present: `once`
///
/// A `once` habit without a stored start date falls back to the UTC date of
/// its creation timestamp. Documents missing owner or name are unusable and
/// skipped with a warning.
pub fn habit_from_document(doc: &Document) -> Option<Habit> {
    let fields = &doc.fields;

    let Some(user_id) = fields.get("uid").and_then(Value::as_str) else {
        warn!("habit document {} has no uid, skipping", doc.doc_id());
        return None;
    };
    let Some(name) = fields.get("name").and_then(Value::as_str) else {
        warn!("habit document {} has no name, skipping", doc.doc_id());
        return None;
    };

    let alert_time = fields
        .get("alertTime")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let start_date = fields
        .get("startDate")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let created_date = fields
        .get("createdAt")
        .and_then(Value::as_timestamp)
        .and_then(|ts| ts.get(..10))
        .map(str::to_string);

    let once = || Recurrence::Once {
        date: start_date.clone().or_else(|| created_date.clone()),
    };

    let recurrence = match fields.get("repeatType").and_then(Value::as_str) {
        Some("daily") => Recurrence::Daily,
        Some("weekly") => Recurrence::Weekly {
            days: weekday_list(fields.get("repeatDays")),
        },
        Some(_) => once(),
        None => {
            if fields
                .get("isRecurring")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                Recurrence::Daily
            } else {
                once()
            }
        }
    };

    Some(Habit {
        id: doc.doc_id().to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        alert_time,
        start_date,
        recurrence,
    })
}

/// Weekday set of a stored `repeatDays` field. Anything that is not an
/// array of in-range integers degrades to the empty set, which is never
/// eligible.
fn weekday_list(value: Option<&Value>) -> Vec<u8> {
    value
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_i64)
                .filter(|d| (0..=6).contains(d))
                .map(|d| d as u8)
                .collect()
        })
        .unwrap_or_default()
}
