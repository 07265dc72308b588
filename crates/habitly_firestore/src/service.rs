//! Store trait implementations backed by Firestore.
//!
//! Adapts the concrete repositories to the capability traits in
//! `habitly_common::services`, which is what the notifier consumes.

use crate::client::FirestoreError;
use crate::habits::HabitRepository;
use crate::tokens::TokenRepository;
use habitly_common::models::Habit;
use habitly_common::services::{BoxFuture, HabitStore, StoreError, TokenStore};

impl From<FirestoreError> for StoreError {
    fn from(err: FirestoreError) -> Self {
        match err {
            FirestoreError::AuthError(msg) => StoreError::Auth(msg),
            FirestoreError::RequestError(e) => StoreError::Request(e.to_string()),
            FirestoreError::ConfigError(msg) => StoreError::Api(msg),
            FirestoreError::ApiError(msg) => StoreError::Api(msg),
            FirestoreError::DecodeError(msg) => StoreError::Decode(msg),
        }
    }
}

/// [`HabitStore`] backed by the Firestore habit repository.
pub struct FirestoreHabitStore {
    repo: HabitRepository,
}

impl FirestoreHabitStore {
    pub fn new(repo: HabitRepository) -> Self {
        Self { repo }
    }
}

impl HabitStore for FirestoreHabitStore {
    fn find_by_alert_time(&self, alert_time: &str) -> BoxFuture<'_, Vec<Habit>, StoreError> {
        let alert_time = alert_time.to_string();
        Box::pin(async move {
            self.repo
                .find_by_alert_time(&alert_time)
                .await
                .map_err(StoreError::from)
        })
    }
}

/// [`TokenStore`] backed by the Firestore token repository.
pub struct FirestoreTokenStore {
    repo: TokenRepository,
}

impl FirestoreTokenStore {
    pub fn new(repo: TokenRepository) -> Self {
        Self { repo }
    }
}

impl TokenStore for FirestoreTokenStore {
    fn token_for_user(&self, user_id: &str) -> BoxFuture<'_, Option<String>, StoreError> {
        let user_id = user_id.to_string();
        Box::pin(async move { self.repo.get(&user_id).await.map_err(StoreError::from) })
    }

    fn put_token(&self, user_id: &str, token: &str) -> BoxFuture<'_, (), StoreError> {
        let user_id = user_id.to_string();
        let token = token.to_string();
        Box::pin(async move {
            self.repo
                .set(&user_id, &token)
                .await
                .map_err(StoreError::from)
        })
    }

    fn delete_token(&self, user_id: &str) -> BoxFuture<'_, (), StoreError> {
        let user_id = user_id.to_string();
        Box::pin(async move { self.repo.delete(&user_id).await.map_err(StoreError::from) })
    }
}
