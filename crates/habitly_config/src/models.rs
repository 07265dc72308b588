// --- File: crates/habitly_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Firebase Config ---
// Shared by the Firestore and FCM clients. The service account key is a file
// path, not an inline secret; the key file itself stays outside the config.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FirebaseConfig {
    /// Google Cloud project that owns the Firestore database and FCM sender.
    pub project_id: Option<String>,
    /// Path to the service account key JSON. When absent the clients skip
    /// authentication, which is only useful against an emulator endpoint.
    pub key_path: Option<String>,
}

// --- Notifier Config ---
// Presentation of the scheduled habit reminders. All fields default to the
// stock strings so an empty `[notifier]` table is valid.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct NotifierConfig {
    /// Notification title. Defaults to "습관 트래커".
    pub title: Option<String>,
    /// Body template; `{name}` is replaced with the habit's display name.
    pub body_template: Option<String>,
    /// Android notification channel. Defaults to "habit-alerts".
    pub channel_id: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_habits: bool,
    #[serde(default)]
    pub use_notifier: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub notifier: Option<NotifierConfig>,
}
