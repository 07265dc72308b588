// --- File: crates/services/habitly_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the Firestore-backed stores and the FCM sender from the loaded
//! configuration and exposes them through the
//! [`habitly_common::services::ServiceFactory`] trait. Services come up only
//! when the Firebase configuration section is present; otherwise every
//! accessor returns `None` and the callers degrade gracefully.

use habitly_common::services::{HabitStore, PushSender, ServiceFactory, TokenStore};
use habitly_config::AppConfig;
use habitly_fcm::{FcmClient, FcmPushSender};
use habitly_firestore::client::FirestoreClient;
use habitly_firestore::habits::HabitRepository;
use habitly_firestore::service::{FirestoreHabitStore, FirestoreTokenStore};
use habitly_firestore::tokens::TokenRepository;
use std::sync::Arc;
use tracing::{info, warn};

pub struct HabitlyServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    habit_store: Option<Arc<dyn HabitStore>>,
    token_store: Option<Arc<dyn TokenStore>>,
    push_sender: Option<Arc<dyn PushSender>>,
}

impl HabitlyServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let mut factory = Self {
            config: config.clone(),
            habit_store: None,
            token_store: None,
            push_sender: None,
        };

        match config.firebase.as_ref() {
            Some(firebase) => {
                info!("Initializing Firestore stores and FCM sender...");
                let client = Arc::new(FirestoreClient::new(firebase.clone()));
                factory.habit_store = Some(Arc::new(FirestoreHabitStore::new(
                    HabitRepository::new(Arc::clone(&client)),
                )));
                factory.token_store = Some(Arc::new(FirestoreTokenStore::new(
                    TokenRepository::new(client),
                )));

                let mut fcm = FcmClient::new(firebase.clone());
                if let Some(channel) = config
                    .notifier
                    .as_ref()
                    .and_then(|n| n.channel_id.clone())
                {
                    fcm = fcm.with_channel_id(channel);
                }
                factory.push_sender = Some(Arc::new(FcmPushSender::new(fcm)));
            }
            None => {
                warn!("Firebase configuration missing, habit services unavailable");
            }
        }

        factory
    }
}

impl ServiceFactory for HabitlyServiceFactory {
    fn habit_store(&self) -> Option<Arc<dyn HabitStore>> {
        self.habit_store.clone()
    }

    fn token_store(&self) -> Option<Arc<dyn TokenStore>> {
        self.token_store.clone()
    }

    fn push_sender(&self) -> Option<Arc<dyn PushSender>> {
        self.push_sender.clone()
    }
}
