//! Firebase Cloud Messaging client module
//!
//! Client for the FCM HTTP v1 API. Sends one push notification per device
//! registration token, with the presentation hints the habit reminders use
//! on every platform: high urgency, persistent display on web, default
//! sound, and a stable notification channel on Android.
//!
//! Delivery failures are classified: a token the platform reports as
//! permanently unregistered or invalid maps to [`FcmError::Unregistered`],
//! which callers use to clean up the stored token. Everything else is an
//! ordinary error.

use crate::auth::get_messaging_auth_token;
use habitly_common::http::default_client;
use habitly_common::models::{PushNote, PushReceipt};
use habitly_config::FirebaseConfig;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FCM_BASE_URL: &str = "https://fcm.googleapis.com/v1";

/// Default Android notification channel for habit reminders.
pub const DEFAULT_CHANNEL_ID: &str = "habit-alerts";

/// Errors that can occur when interacting with the FCM API
#[derive(Error, Debug)]
pub enum FcmError {
    /// The registration token is permanently invalid; the stored token
    /// record should be deleted.
    #[error("registration token is no longer valid")]
    Unregistered,

    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to the FCM API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by the FCM API
    #[error("FCM API error: {0}")]
    ApiError(String),
}

impl FcmError {
    pub fn is_unregistered(&self) -> bool {
        matches!(self, FcmError::Unregistered)
    }
}

/// Top-level send request wrapping a message, per the FCM HTTP v1 format.
#[derive(Debug, Serialize)]
pub struct FcmSendRequest {
    pub message: FcmMessage,
}

/// One message addressed to exactly one device registration token.
#[derive(Debug, Serialize)]
pub struct FcmMessage {
    pub token: String,
    pub notification: Notification,
    pub webpush: WebpushConfig,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
}

/// Title and body shown on the user's device.
#[derive(Debug, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Web push overrides: persistent, vibrating, high-urgency display.
#[derive(Debug, Serialize)]
pub struct WebpushConfig {
    pub notification: WebpushNotification,
    pub headers: WebpushHeaders,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpushNotification {
    pub icon: String,
    pub badge: String,
    pub require_interaction: bool,
    pub vibrate: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct WebpushHeaders {
    #[serde(rename = "Urgency")]
    pub urgency: String,
}

/// Android delivery and presentation hints.
#[derive(Debug, Serialize)]
pub struct AndroidConfig {
    pub priority: String,
    pub notification: AndroidNotification,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidNotification {
    pub channel_id: String,
    pub default_sound: bool,
    pub notification_priority: String,
}

/// APNs payload: default sound, badge count of one.
#[derive(Debug, Serialize)]
pub struct ApnsConfig {
    pub payload: ApnsPayload,
}

#[derive(Debug, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Serialize)]
pub struct Aps {
    pub sound: String,
    pub badge: u32,
}

/// Response from the FCM API after a successful send.
#[derive(Debug, Deserialize)]
pub struct FcmSendResponse {
    /// `projects/{project_id}/messages/{message_id}`
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct FcmErrorBody {
    error: FcmErrorDetail,
}

#[derive(Debug, Deserialize)]
struct FcmErrorDetail {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

/// Client for the Firebase Cloud Messaging HTTP v1 API.
pub struct FcmClient {
    client: Client,
    config: FirebaseConfig,
    base_url: String,
    channel_id: String,
}

impl FcmClient {
    /// Creates a client against the production FCM endpoint with the
    /// default notification channel.
    pub fn new(config: FirebaseConfig) -> Self {
        Self::with_base_url(config, FCM_BASE_URL.to_string())
    }

    /// Creates a client against a custom endpoint (mock server).
    pub fn with_base_url(config: FirebaseConfig, base_url: String) -> Self {
        Self {
            client: default_client().unwrap_or_else(|_| Client::new()),
            config,
            base_url,
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
        }
    }

    /// Overrides the Android notification channel.
    pub fn with_channel_id(mut self, channel_id: String) -> Self {
        self.channel_id = channel_id;
        self
    }

    fn build_message(&self, token: &str, note: &PushNote) -> FcmSendRequest {
        FcmSendRequest {
            message: FcmMessage {
                token: token.to_string(),
                notification: Notification {
                    title: note.title.clone(),
                    body: note.body.clone(),
                },
                webpush: WebpushConfig {
                    notification: WebpushNotification {
                        icon: "/icon-192.png".to_string(),
                        badge: "/icon-192.png".to_string(),
                        require_interaction: true,
                        vibrate: vec![200, 100, 200],
                    },
                    headers: WebpushHeaders {
                        urgency: "high".to_string(),
                    },
                },
                android: AndroidConfig {
                    priority: "HIGH".to_string(),
                    notification: AndroidNotification {
                        channel_id: self.channel_id.clone(),
                        default_sound: true,
                        notification_priority: "PRIORITY_HIGH".to_string(),
                    },
                },
                apns: ApnsConfig {
                    payload: ApnsPayload {
                        aps: Aps {
                            sound: "default".to_string(),
                            badge: 1,
                        },
                    },
                },
            },
        }
    }

    /// Sends one push notification to one device registration token.
    ///
    /// # Errors
    ///
    /// [`FcmError::Unregistered`] when the API reports the token as
    /// permanently invalid; other variants for auth, transport, and API
    /// failures.
    pub async fn send_to_token(
        &self,
        token: &str,
        note: &PushNote,
    ) -> Result<PushReceipt, FcmError> {
        let project_id = self.config.project_id.as_deref().ok_or_else(|| {
            FcmError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;

        let url = format!("{}/projects/{}/messages:send", self.base_url, project_id);

        let mut request = self.client.post(&url).json(&self.build_message(token, note));
        if self.config.key_path.is_some() {
            let auth_token = get_messaging_auth_token(&self.config)
                .await
                .map_err(|e| FcmError::AuthError(e.to_string()))?;
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", auth_token));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let sent: FcmSendResponse = response.json().await?;
        Ok(PushReceipt {
            message_id: sent.name,
        })
    }
}

/// Maps an FCM error response to the typed failure.
///
/// The v1 API reports a dead registration as HTTP 404 with an
/// `UNREGISTERED` error code in the details, or as an INVALID_ARGUMENT
/// complaint about the token itself. Both mean the same thing to callers:
/// stop storing this token.
fn classify_failure(status: StatusCode, body: &str) -> FcmError {
    let parsed: Option<FcmErrorBody> = serde_json::from_str(body).ok();

    if let Some(parsed) = &parsed {
        let has_unregistered_code = parsed.error.details.iter().any(|detail| {
            detail.get("errorCode").and_then(|c| c.as_str()) == Some("UNREGISTERED")
        });
        let invalid_token_argument = parsed.error.status.as_deref() == Some("INVALID_ARGUMENT")
            && parsed
                .error
                .message
                .as_deref()
                .is_some_and(|m| m.contains("registration token"));

        if has_unregistered_code || invalid_token_argument {
            return FcmError::Unregistered;
        }
    }

    if status == StatusCode::NOT_FOUND {
        return FcmError::Unregistered;
    }

    let message = parsed
        .and_then(|p| p.error.message)
        .unwrap_or_else(|| body.to_string());
    FcmError::ApiError(format!("{}: {}", status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_error_code_is_classified() {
        let body = r#"{"error":{"code":404,"status":"NOT_FOUND","message":"Requested entity was not found.","details":[{"@type":"type.googleapis.com/google.firebase.fcm.v1.FcmError","errorCode":"UNREGISTERED"}]}}"#;
        assert!(classify_failure(StatusCode::NOT_FOUND, body).is_unregistered());
    }

    #[test]
    fn invalid_token_argument_is_classified_as_unregistered() {
        let body = r#"{"error":{"code":400,"status":"INVALID_ARGUMENT","message":"The registration token is not a valid FCM registration token"}}"#;
        assert!(classify_failure(StatusCode::BAD_REQUEST, body).is_unregistered());
    }

    #[test]
    fn quota_failure_is_an_api_error() {
        let body = r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED","message":"Quota exceeded"}}"#;
        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(!err.is_unregistered());
        assert!(err.to_string().contains("Quota exceeded"));
    }

    #[test]
    fn unparseable_body_falls_back_to_raw_text() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(!err.is_unregistered());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn message_carries_platform_hints() {
        let client = FcmClient::with_base_url(
            FirebaseConfig {
                project_id: Some("p".to_string()),
                key_path: None,
            },
            "http://localhost".to_string(),
        );
        let note = PushNote {
            title: "습관 트래커".to_string(),
            body: "지금 \"Stretch\" 할 시간이에요!".to_string(),
        };
        let json = serde_json::to_value(client.build_message("tok", &note)).unwrap();

        assert_eq!(json["message"]["token"], "tok");
        assert_eq!(json["message"]["webpush"]["headers"]["Urgency"], "high");
        assert_eq!(
            json["message"]["webpush"]["notification"]["requireInteraction"],
            true
        );
        assert_eq!(
            json["message"]["android"]["notification"]["channelId"],
            "habit-alerts"
        );
        assert_eq!(json["message"]["apns"]["payload"]["aps"]["sound"], "default");
    }
}
