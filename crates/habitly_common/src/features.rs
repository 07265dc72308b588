//! Feature flag handling for the Habitly application.
//!
//! Features exist at two levels:
//!
//! 1. Compile-time cargo features (`habits`, `notifier`, `openapi`)
//! 2. Runtime flags in the configuration (`use_habits`, `use_notifier`)
//!
//! A feature is active only when it is compiled in, its runtime flag is set,
//! and its configuration section is present.

use habitly_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the habit CRUD surface is enabled at runtime.
#[cfg(feature = "habits")]
pub fn is_habits_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_habits, config.firebase.as_ref())
}

/// Check if the scheduled notifier is enabled at runtime.
#[cfg(feature = "notifier")]
pub fn is_notifier_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_notifier, config.firebase.as_ref())
}
