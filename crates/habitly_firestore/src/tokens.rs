//! Delivery token repository
//!
//! One document per user in `fcmTokens`, keyed by user id. The token is a
//! cache of the user's latest device registration; it is overwritten on
//! re-registration and deleted when delivery reports it permanently
//! invalid.

use crate::client::{FirestoreClient, FirestoreError};
use crate::value::Value;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

const COLLECTION: &str = "fcmTokens";

/// Repository over the `fcmTokens` collection.
#[derive(Clone)]
pub struct TokenRepository {
    client: Arc<FirestoreClient>,
}

impl TokenRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }

    /// The stored registration token for a user. An existing document with
    /// an empty token field counts as absent.
    pub async fn get(&self, user_id: &str) -> Result<Option<String>, FirestoreError> {
        let doc = self
            .client
            .get_document(&format!("{}/{}", COLLECTION, user_id))
            .await?;

        Ok(doc.and_then(|doc| {
            doc.fields
                .get("token")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        }))
    }

    /// Stores or overwrites the registration token for a user.
    pub async fn set(&self, user_id: &str, token: &str) -> Result<(), FirestoreError> {
        let mut fields = HashMap::new();
        fields.insert("token".to_string(), Value::string(token));
        fields.insert(
            "updatedAt".to_string(),
            Value::timestamp(Utc::now().to_rfc3339()),
        );
        self.client
            .set_document(COLLECTION, user_id, fields)
            .await?;
        Ok(())
    }

    /// Unconditionally deletes the token record for a user.
    pub async fn delete(&self, user_id: &str) -> Result<(), FirestoreError> {
        self.client
            .delete_document(&format!("{}/{}", COLLECTION, user_id))
            .await
    }
}
