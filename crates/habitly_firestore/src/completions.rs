//! Completion repository
//!
//! Per-day, per-habit completion records. One document per
//! (user, habit, date); toggling flips the stored flag or creates the
//! record checked.

use crate::client::{FirestoreClient, FirestoreError};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

const COLLECTION: &str = "completions";

/// One completion record, as read back for a day's listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub id: String,
    pub habit_id: String,
    pub completed: bool,
}

/// Repository over the `completions` collection.
#[derive(Clone)]
pub struct CompletionRepository {
    client: Arc<FirestoreClient>,
}

impl CompletionRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }

    /// All completion records of one user on one date key.
    pub async fn find_for_day(
        &self,
        user_id: &str,
        date_key: &str,
    ) -> Result<Vec<Completion>, FirestoreError> {
        let docs = self
            .client
            .run_query(
                COLLECTION,
                &[
                    ("uid", Value::string(user_id)),
                    ("date", Value::string(date_key)),
                ],
            )
            .await?;

        Ok(docs
            .iter()
            .filter_map(|doc| {
                let habit_id = doc.fields.get("habitId").and_then(Value::as_str)?;
                Some(Completion {
                    id: doc.doc_id().to_string(),
                    habit_id: habit_id.to_string(),
                    completed: doc
                        .fields
                        .get("completed")
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                })
            })
            .collect())
    }

    /// Flips the completion state of a habit on a date. Returns the new
    /// state. Creates the record checked when none exists yet.
    pub async fn toggle(
        &self,
        user_id: &str,
        habit_id: &str,
        date_key: &str,
    ) -> Result<bool, FirestoreError> {
        let docs = self
            .client
            .run_query(
                COLLECTION,
                &[
                    ("uid", Value::string(user_id)),
                    ("date", Value::string(date_key)),
                    ("habitId", Value::string(habit_id)),
                ],
            )
            .await?;

        if let Some(doc) = docs.first() {
            let current = doc
                .fields
                .get("completed")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let mut fields = HashMap::new();
            fields.insert("completed".to_string(), Value::boolean(!current));
            self.client
                .update_fields(&doc.relative_path(), fields, &["completed"])
                .await?;
            Ok(!current)
        } else {
            let mut fields = HashMap::new();
            fields.insert("uid".to_string(), Value::string(user_id));
            fields.insert("habitId".to_string(), Value::string(habit_id));
            fields.insert("date".to_string(), Value::string(date_key));
            fields.insert("completed".to_string(), Value::boolean(true));
            self.client.create_document(COLLECTION, fields).await?;
            Ok(true)
        }
    }
}
