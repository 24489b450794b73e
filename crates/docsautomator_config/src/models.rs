// --- File: crates/docsautomator_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Base URL of the hosted DocsAutomator API.
pub const DEFAULT_BASE_URL: &str = "https://api.docsautomator.co";

/// Marker value meaning "read this field from the environment".
pub const SECRET_FROM_ENV: &str = "secret_from_env";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which data-source tags the automation directory keeps.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AutomationFilter {
    /// Only automations whose data source is `API`.
    Api,
    /// Automations whose data source is `API` or `n8n`.
    ApiOrN8n,
}

impl AutomationFilter {
    pub fn allowed_sources(&self) -> &'static [&'static str] {
        match self {
            AutomationFilter::Api => &["API"],
            AutomationFilter::ApiOrN8n => &["API", "n8n"],
        }
    }

    pub fn allows(&self, source: Option<&str>) -> bool {
        source.is_some_and(|s| self.allowed_sources().contains(&s))
    }
}

// --- DocsAutomator Config ---
// Holds non-secret DocsAutomator config. The API key is normally injected from
// DOCSAUTOMATOR_SECRET_DOCSAUTOMATOR_API_KEY (or legacy DOCSAUTOMATOR_API_KEY).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DocsAutomatorConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub automation_filter: Option<AutomationFilter>,
    /// Request timeout; the HTTP client defaults apply when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for DocsAutomatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            automation_filter: None,
            timeout_secs: None,
        }
    }
}

impl DocsAutomatorConfig {
    /// The configured API key, or `None` if it is missing, blank or still the
    /// unresolved `secret_from_env` marker.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != SECRET_FROM_ENV)
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_docsautomator: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub docsautomator: Option<DocsAutomatorConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_allow_lists() {
        assert!(AutomationFilter::Api.allows(Some("API")));
        assert!(!AutomationFilter::Api.allows(Some("n8n")));
        assert!(AutomationFilter::ApiOrN8n.allows(Some("n8n")));
        assert!(!AutomationFilter::ApiOrN8n.allows(Some("Airtable")));
        assert!(!AutomationFilter::ApiOrN8n.allows(None));
    }

    #[test]
    fn test_api_key_ignores_marker_and_blank() {
        let mut config = DocsAutomatorConfig::default();
        assert_eq!(config.api_key(), None);

        config.api_key = Some(SECRET_FROM_ENV.to_string());
        assert_eq!(config.api_key(), None);

        config.api_key = Some("   ".to_string());
        assert_eq!(config.api_key(), None);

        config.api_key = Some("da_live_123".to_string());
        assert_eq!(config.api_key(), Some("da_live_123"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server":{"host":"127.0.0.1","port":8086},"docsautomator":{"automation_filter":"api_or_n8n"}}"#,
        )
        .unwrap();
        assert!(!config.use_docsautomator);
        let docs = config.docsautomator.unwrap();
        assert_eq!(docs.base_url, DEFAULT_BASE_URL);
        assert_eq!(docs.automation_filter, Some(AutomationFilter::ApiOrN8n));
        assert_eq!(docs.timeout_secs, None);
    }
}
