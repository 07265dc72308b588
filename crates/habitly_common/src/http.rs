// --- File: crates/habitly_common/src/http.rs ---
//! HTTP client construction shared by the outbound API clients.

use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Default timeout for outbound HTTP requests in seconds.
///
/// The scheduled notifier relies on this bound: it imposes no timeout of its
/// own, so every datastore query and push send must terminate through the
/// client's timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Creates an HTTP client with the default timeout.
pub fn default_client() -> Result<Client, ReqwestError> {
    create_client(DEFAULT_TIMEOUT_SECS, true)
}

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `follow_redirects` - Whether the client should follow redirects
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}
