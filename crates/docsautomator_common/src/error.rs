// --- File: crates/docsautomator_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by every crate in the workspace.
///
/// Integration crates keep their own error enums and implement
/// `From<SpecificError> for NodeError` so the host surface only has to render
/// one type.
#[derive(Error, Debug)]
pub enum NodeError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The remote API rejected the credential
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// A node parameter failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for NodeError {
    fn status_code(&self) -> u16 {
        match self {
            NodeError::HttpError(_) => 500,
            NodeError::ParseError(_) => 400,
            NodeError::ConfigError(_) => 500,
            NodeError::AuthError(_) => 401,
            NodeError::ValidationError(_) => 400,
            NodeError::ExternalServiceError { .. } => 502,
            NodeError::NotFoundError(_) => 404,
            NodeError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, NodeError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, NodeError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, NodeError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| NodeError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, NodeError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| NodeError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for NodeError {
    fn from(err: reqwest::Error) -> Self {
        NodeError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for NodeError {
    fn from(err: std::io::Error) -> Self {
        NodeError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> NodeError {
    NodeError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> NodeError {
    NodeError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> NodeError {
    NodeError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> NodeError {
    NodeError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(validation_error("bad").status_code(), 400);
        assert_eq!(config_error("missing").status_code(), 500);
        assert_eq!(external_service_error("DocsAutomator API", "boom").status_code(), 502);
        assert_eq!(not_found("automation").status_code(), 404);
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let err = result.context("loading config").unwrap_err();
        assert_eq!(err.to_string(), "Internal error: loading config: disk");
    }

    #[test]
    fn test_external_service_error_display() {
        let err = external_service_error("DocsAutomator API", "Status: 401, Message: nope");
        assert_eq!(
            err.to_string(),
            "External service error: DocsAutomator API - Status: 401, Message: nope"
        );
    }
}
