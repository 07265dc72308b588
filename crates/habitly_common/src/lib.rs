// --- File: crates/habitly_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP client construction
pub mod logging; // Logging utilities
pub mod models; // Domain models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{external_service_error, validation_error, HabitlyError, HttpStatusCode};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};

// Re-export the domain model for easier access
pub use models::{
    date_key_in_reference_zone, weekday_of, Habit, PushNote, PushReceipt, Recurrence,
    REFERENCE_ZONE,
};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

// Conditionally re-export feature-specific functions
#[cfg(feature = "habits")]
pub use features::is_habits_enabled;

#[cfg(feature = "notifier")]
pub use features::is_notifier_enabled;
