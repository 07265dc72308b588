// --- File: crates/habitly_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! The notifier and the HTTP surface never talk to Firestore or FCM
//! directly; they depend on the narrow capabilities defined here. This keeps
//! the scheduled job a pure function of (clock, habit set, token set) and
//! makes both sides trivially mockable in tests.

use crate::models::{Habit, PushNote, PushReceipt};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Errors surfaced by the datastore-backed stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("HTTP request error: {0}")]
    Request(String),

    #[error("Datastore API error: {0}")]
    Api(String),

    #[error("Malformed document: {0}")]
    Decode(String),
}

/// Typed failure of a single push delivery.
///
/// `Unregistered` is the one variant callers act on: it marks the
/// registration token as permanently dead and triggers cleanup. Everything
/// else is transient from the caller's point of view and only logged.
#[derive(Error, Debug)]
pub enum PushDeliveryError {
    #[error("registration token is no longer valid")]
    Unregistered,

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("HTTP request error: {0}")]
    Request(String),

    #[error("Messaging API error: {0}")]
    Api(String),
}

impl PushDeliveryError {
    pub fn is_unregistered(&self) -> bool {
        matches!(self, PushDeliveryError::Unregistered)
    }
}

/// Read access to the habit collection.
pub trait HabitStore: Send + Sync {
    /// All habits whose alert time equals the given `HH:MM` string.
    fn find_by_alert_time(&self, alert_time: &str) -> BoxFuture<'_, Vec<Habit>, StoreError>;
}

/// Access to the per-user delivery token records.
pub trait TokenStore: Send + Sync {
    /// The stored registration token for a user, if any.
    fn token_for_user(&self, user_id: &str) -> BoxFuture<'_, Option<String>, StoreError>;

    /// Store or overwrite the registration token for a user.
    fn put_token(&self, user_id: &str, token: &str) -> BoxFuture<'_, (), StoreError>;

    /// Unconditionally delete the token record for a user. Deleting a
    /// missing record is not an error.
    fn delete_token(&self, user_id: &str) -> BoxFuture<'_, (), StoreError>;
}

/// Submission of one push message to one device registration.
pub trait PushSender: Send + Sync {
    fn send_push(
        &self,
        token: &str,
        note: &PushNote,
    ) -> BoxFuture<'_, PushReceipt, PushDeliveryError>;
}

/// A factory for creating service instances.
///
/// Implementations initialize collaborators from configuration; a `None`
/// means the corresponding feature is disabled or not configured.
pub trait ServiceFactory: Send + Sync {
    /// Get the habit store, if configured.
    fn habit_store(&self) -> Option<Arc<dyn HabitStore>>;

    /// Get the delivery token store, if configured.
    fn token_store(&self) -> Option<Arc<dyn TokenStore>>;

    /// Get the push sender, if configured.
    fn push_sender(&self) -> Option<Arc<dyn PushSender>>;
}
