// --- File: crates/habitly_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared across the Habitly crates.
///
/// Each crate defines its own specific error enum and converts into this
/// taxonomy where a uniform HTTP mapping is needed.
#[derive(Error, Debug)]
pub enum HabitlyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for HabitlyError {
    fn status_code(&self) -> u16 {
        match self {
            HabitlyError::HttpError(_) => 500,
            HabitlyError::ParseError(_) => 400,
            HabitlyError::ConfigError(_) => 500,
            HabitlyError::AuthError(_) => 401,
            HabitlyError::ValidationError(_) => 400,
            HabitlyError::ExternalServiceError { .. } => 502,
            HabitlyError::NotFoundError(_) => 404,
            HabitlyError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for HabitlyError {
    fn from(err: reqwest::Error) -> Self {
        HabitlyError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for HabitlyError {
    fn from(err: serde_json::Error) -> Self {
        HabitlyError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> HabitlyError {
    HabitlyError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> HabitlyError {
    HabitlyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
