//! Authentication for Firebase Cloud Messaging
//!
//! Exchanges the service account key for an OAuth2 access token carrying
//! the FCM messaging scope.

use habitly_config::FirebaseConfig;
use std::{error::Error, path::Path};
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

/// Obtains an OAuth2 access token for Firebase Cloud Messaging.
///
/// # Errors
///
/// Returns an error if the key_path is missing from the config, the key
/// file cannot be read, or the token exchange fails.
pub async fn get_messaging_auth_token(
    config: &FirebaseConfig,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or("Missing key_path in FirebaseConfig")?;

    let sa_key = read_service_account_key(Path::new(key_path)).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    // FCM requires the "https://www.googleapis.com/auth/firebase.messaging" scope
    let auth_token = auth
        .token(&["https://www.googleapis.com/auth/firebase.messaging"])
        .await?;

    match auth_token.token() {
        Some(token) => Ok(token.to_string()),
        None => Err("No token available".into()),
    }
}
