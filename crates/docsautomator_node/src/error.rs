// --- File: crates/docsautomator_node/src/error.rs ---
use docsautomator_common::{config_error, external_service_error, not_found, HttpStatusCode, NodeError};
use thiserror::Error;

/// DocsAutomator-specific error types.
#[derive(Error, Debug)]
pub enum DocsAutomatorError {
    /// Error occurred during a DocsAutomator API request
    #[error("DocsAutomator API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the DocsAutomator API
    #[error("DocsAutomator API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a DocsAutomator API response
    #[error("Failed to parse DocsAutomator API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete DocsAutomator configuration
    #[error("DocsAutomator configuration missing or incomplete: {0}")]
    ConfigError(String),

    /// No automation was selected for an operation that needs one
    #[error("Please select an automation")]
    MissingAutomation,

    /// The line-item text of a group is not valid JSON
    #[error("Invalid JSON format for line items in {group}: {message}")]
    InvalidLineItemJson { group: String, message: String },

    /// The line-item value of a group is not an array
    #[error("Line items for {group} must be a JSON array, found {found}")]
    LineItemsNotArray { group: String, found: &'static str },

    /// A line-item row is not a JSON object
    #[error("Line item at index {index} in {group} must be a JSON object")]
    LineItemRowNotObject { group: String, index: usize },

    /// The same line-item group was configured twice
    #[error("Line item type {0} is configured more than once")]
    DuplicateLineItemGroup(String),

    /// The placeholder values could not be turned into a flat object
    #[error("Invalid placeholder values: {0}")]
    InvalidPlaceholderValues(String),

    /// An input row does not have the shape of its operation
    #[error("Invalid input row: {0}")]
    InvalidRow(String),
}

impl DocsAutomatorError {
    /// True for validation failures raised before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DocsAutomatorError::MissingAutomation
                | DocsAutomatorError::InvalidLineItemJson { .. }
                | DocsAutomatorError::LineItemsNotArray { .. }
                | DocsAutomatorError::LineItemRowNotObject { .. }
                | DocsAutomatorError::DuplicateLineItemGroup(_)
                | DocsAutomatorError::InvalidPlaceholderValues(_)
                | DocsAutomatorError::InvalidRow(_)
        )
    }
}

/// Convert DocsAutomatorError to NodeError
impl From<DocsAutomatorError> for NodeError {
    fn from(err: DocsAutomatorError) -> Self {
        match err {
            DocsAutomatorError::RequestError(e) => {
                NodeError::HttpError(format!("DocsAutomator request error: {}", e))
            }
            DocsAutomatorError::ApiError {
                status_code: 401 | 403,
                message,
            } => NodeError::AuthError(format!("DocsAutomator rejected the API key: {}", message)),
            DocsAutomatorError::ApiError {
                status_code: 404,
                message,
            } => not_found(format!("DocsAutomator: {}", message)),
            DocsAutomatorError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "DocsAutomator API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            DocsAutomatorError::ParseError(e) => {
                NodeError::ParseError(format!("DocsAutomator response parse error: {}", e))
            }
            DocsAutomatorError::ConfigError(msg) => config_error(msg),
            other => NodeError::ValidationError(other.to_string()),
        }
    }
}

impl HttpStatusCode for DocsAutomatorError {
    fn status_code(&self) -> u16 {
        match self {
            DocsAutomatorError::RequestError(_) => 502,
            DocsAutomatorError::ApiError { status_code, .. } => *status_code,
            DocsAutomatorError::ParseError(_) => 502,
            DocsAutomatorError::ConfigError(_) => 500,
            _ => 400,
        }
    }
}
