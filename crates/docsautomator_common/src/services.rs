// --- File: crates/docsautomator_common/src/services.rs ---
//! Service abstractions for the remote document-generation API.
//!
//! The node logic is written against [`DocumentService`] instead of a concrete
//! HTTP client, so directory lookup, discovery and execution can run against
//! the real API, a mock server, or an in-process fake.

use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Operations of a document-generation API.
///
/// Every method returns the raw JSON body of the remote response; shaping it
/// is left to the caller.
pub trait DocumentService: Send + Sync {
    /// Error type returned by document service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// List the configured automations.
    fn list_automations(&self) -> BoxFuture<'_, Value, Self::Error>;

    /// List the placeholders of one automation.
    fn list_placeholders(&self, automation_id: &str) -> BoxFuture<'_, Value, Self::Error>;

    /// Create a document from an automation with the given payload.
    fn create_document(
        &self,
        automation_id: &str,
        payload: &Map<String, Value>,
    ) -> BoxFuture<'_, Value, Self::Error>;

    /// Fetch a single automation.
    fn get_automation(&self, automation_id: &str) -> BoxFuture<'_, Value, Self::Error>;

    /// Create an automation.
    fn create_automation(&self, body: &Value) -> BoxFuture<'_, Value, Self::Error>;

    /// Update an automation.
    fn update_automation(&self, automation_id: &str, body: &Value)
        -> BoxFuture<'_, Value, Self::Error>;

    /// Delete an automation.
    fn delete_automation(&self, automation_id: &str) -> BoxFuture<'_, Value, Self::Error>;

    /// Duplicate an automation.
    fn duplicate_automation(&self, automation_id: &str) -> BoxFuture<'_, Value, Self::Error>;

    /// Duplicate a Google Doc template.
    fn duplicate_template(&self, body: &Value) -> BoxFuture<'_, Value, Self::Error>;
}
