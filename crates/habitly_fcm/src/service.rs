// --- File: crates/habitly_fcm/src/service.rs ---

use crate::client::{FcmClient, FcmError};
use habitly_common::models::{PushNote, PushReceipt};
use habitly_common::services::{BoxFuture, PushDeliveryError, PushSender};

impl From<FcmError> for PushDeliveryError {
    fn from(err: FcmError) -> Self {
        match err {
            FcmError::Unregistered => PushDeliveryError::Unregistered,
            FcmError::AuthError(msg) => PushDeliveryError::Auth(msg),
            FcmError::RequestError(e) => PushDeliveryError::Request(e.to_string()),
            FcmError::ConfigError(msg) => PushDeliveryError::Auth(msg),
            FcmError::ApiError(msg) => PushDeliveryError::Api(msg),
        }
    }
}

/// [`PushSender`] backed by the FCM HTTP v1 API.
pub struct FcmPushSender {
    client: FcmClient,
}

impl FcmPushSender {
    pub fn new(client: FcmClient) -> Self {
        Self { client }
    }
}

impl PushSender for FcmPushSender {
    fn send_push(&self, token: &str, note: &PushNote) -> BoxFuture<'_, PushReceipt, PushDeliveryError> {
        let token = token.to_string();
        let note = note.clone();
        Box::pin(async move {
            self.client
                .send_to_token(&token, &note)
                .await
                .map_err(PushDeliveryError::from)
        })
    }
}
