//! Runtime feature flags.
//!
//! A feature is on when its `use_*` flag is set in the configuration and its
//! configuration section is present.

use docsautomator_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the DocsAutomator node is enabled at runtime.
pub fn is_docsautomator_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_docsautomator, config.docsautomator.as_ref())
}
