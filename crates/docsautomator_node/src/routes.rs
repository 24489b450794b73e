// --- File: crates/docsautomator_node/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use docsautomator_config::AppConfig;
use std::sync::Arc;

use crate::handlers::{
    automations_handler, credentials_test_handler, execute_handler, line_item_types_handler,
    operations_handler, placeholders_handler, DocsAutomatorState,
};

/// Creates a router containing all routes for the DocsAutomator node.
///
/// Paths are relative to the mount point (`/api` in the backend).
pub fn routes(config: Arc<AppConfig>) -> Router {
    let docsautomator_state = Arc::new(DocsAutomatorState { config });

    Router::new()
        // Loader callbacks backing the host's dynamic widgets
        .route("/docsautomator/automations", get(automations_handler))
        .route("/docsautomator/placeholders", get(placeholders_handler))
        .route(
            "/docsautomator/line-item-types",
            get(line_item_types_handler),
        )
        // Batch execution
        .route("/docsautomator/execute", post(execute_handler))
        .route("/docsautomator/operations", post(operations_handler))
        .route(
            "/docsautomator/credentials/test",
            post(credentials_test_handler),
        )
        .with_state(docsautomator_state)
}
