// --- File: crates/docsautomator_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Runtime feature flags
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod routes; // Route definitions
pub mod services; // Service abstractions

pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, not_found, validation_error, Context,
    HttpStatusCode, NodeError,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    map_json_error, IntoHttpResponse,
};

pub use logging::{init, init_with_level, log_result};

pub use features::{is_docsautomator_enabled, is_feature_enabled};

pub use services::{BoxFuture, DocumentService};
