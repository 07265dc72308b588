//! Authentication for the Firestore REST API
//!
//! Produces OAuth2 access tokens from a service account key file. The same
//! key file usually also serves the FCM client; only the requested scope
//! differs.

use habitly_config::FirebaseConfig;
use std::{error::Error, path::Path};
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

/// Obtains an OAuth2 access token scoped for Firestore.
///
/// Reads the service account key from the path in the config and exchanges
/// it for a bearer token with the `datastore` scope.
///
/// # Errors
///
/// Returns an error if the key_path is missing, the key file cannot be
/// read, or the token exchange with Google's OAuth2 service fails.
pub async fn get_datastore_auth_token(
    config: &FirebaseConfig,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or("Missing key_path in FirebaseConfig")?;

    let sa_key = read_service_account_key(Path::new(key_path)).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    // Firestore REST access requires the "datastore" scope
    let auth_token = auth
        .token(&["https://www.googleapis.com/auth/datastore"])
        .await?;

    match auth_token.token() {
        Some(token) => Ok(token.to_string()),
        None => Err("No token available".into()),
    }
}
