// --- File: crates/docsautomator_node/src/handlers.rs ---
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
};
use docsautomator_common::{config_error, is_docsautomator_enabled, map_json_error, NodeError};
use docsautomator_config::{AppConfig, AutomationFilter, DocsAutomatorConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::client::DocsAutomatorClient;
use crate::execute::{execute_operation_rows, execute_rows};
use crate::loaders::{load_automation_options, load_line_item_types, load_placeholder_fields};
#[cfg(feature = "openapi")]
use crate::models::DocumentRequest;
use crate::models::{ExecutionOutput, OptionEntry, ResourceMapperFields};

// --- State for DocsAutomator Handlers ---
// The API client is built per request from the config, so the key is read once per batch.
#[derive(Clone)]
pub struct DocsAutomatorState {
    pub config: Arc<AppConfig>,
}

impl DocsAutomatorState {
    fn settings(&self) -> Result<&DocsAutomatorConfig, NodeError> {
        if !is_docsautomator_enabled(&self.config) {
            return Err(config_error("DocsAutomator service is disabled."));
        }
        self.config
            .docsautomator
            .as_ref()
            .ok_or_else(|| config_error("DocsAutomator configuration not loaded."))
    }

    fn client(&self) -> Result<DocsAutomatorClient, NodeError> {
        Ok(DocsAutomatorClient::from_config(self.settings()?)?)
    }

    fn automation_filter(&self) -> Option<AutomationFilter> {
        self.config
            .docsautomator
            .as_ref()
            .and_then(|c| c.automation_filter)
    }
}

// --- Request / response types ---

#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutomationQuery {
    #[serde(default)]
    pub automation_id: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineItemTypesQuery {
    #[serde(default)]
    pub automation_id: Option<String>,
    /// Comma-separated group keys already chosen in other rows.
    #[serde(default)]
    pub selected: Option<String>,
}

impl LineItemTypesQuery {
    pub fn selected_keys(&self) -> Vec<String> {
        self.selected
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Rows stay raw JSON here and are decoded one by one during the batch.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<DocumentRequest>))]
    pub items: Vec<Value>,
    #[serde(default)]
    pub continue_on_fail: bool,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub items: Vec<Value>,
    #[serde(default)]
    pub continue_on_fail: bool,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialTestResponse {
    pub ok: bool,
    pub message: String,
}

// --- Loader handlers ---

/// Options for the automation selector.
#[axum::debug_handler]
pub async fn automations_handler(
    State(state): State<Arc<DocsAutomatorState>>,
) -> Result<Json<Vec<OptionEntry>>, NodeError> {
    let client = state.client()?;
    Ok(Json(
        load_automation_options(&client, state.automation_filter()).await,
    ))
}

/// Resource-mapper fields for the selected automation.
#[axum::debug_handler]
pub async fn placeholders_handler(
    State(state): State<Arc<DocsAutomatorState>>,
    Query(query): Query<AutomationQuery>,
) -> Result<Json<ResourceMapperFields>, NodeError> {
    let client = state.client()?;
    let automation_id = query.automation_id.unwrap_or_default();
    Ok(Json(load_placeholder_fields(&client, &automation_id).await))
}

/// Line-item type options for one selector.
#[axum::debug_handler]
pub async fn line_item_types_handler(
    State(state): State<Arc<DocsAutomatorState>>,
    Query(query): Query<LineItemTypesQuery>,
) -> Result<Json<Vec<OptionEntry>>, NodeError> {
    let client = state.client()?;
    let selected = query.selected_keys();
    let automation_id = query.automation_id.unwrap_or_default();
    Ok(Json(
        load_line_item_types(&client, &automation_id, &selected).await,
    ))
}

// --- Execution handlers ---

/// Runs `createDocument` for every item.
#[axum::debug_handler]
pub async fn execute_handler(
    State(state): State<Arc<DocsAutomatorState>>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<Vec<ExecutionOutput>>, Response> {
    let client = state.client().map_err(IntoResponse::into_response)?;
    map_json_error(
        execute_rows(&client, request.items, request.continue_on_fail).await,
        NodeError::from,
    )
}

/// Runs automation and template lifecycle operations.
#[axum::debug_handler]
pub async fn operations_handler(
    State(state): State<Arc<DocsAutomatorState>>,
    Json(request): Json<OperationsRequest>,
) -> Result<Json<Vec<ExecutionOutput>>, Response> {
    let client = state.client().map_err(IntoResponse::into_response)?;
    map_json_error(
        execute_operation_rows(&client, request.items, request.continue_on_fail).await,
        NodeError::from,
    )
}

/// Checks the configured API key against the remote API.
///
/// Always answers 200; a missing key or a disabled node is reported as
/// `ok: false` like a rejected key.
#[axum::debug_handler]
pub async fn credentials_test_handler(
    State(state): State<Arc<DocsAutomatorState>>,
) -> Json<CredentialTestResponse> {
    let client = match state.client() {
        Ok(client) => client,
        Err(error) => {
            warn!(%error, "DocsAutomator credentials not usable");
            return Json(CredentialTestResponse {
                ok: false,
                message: error.to_string(),
            });
        }
    };
    match client.test_credentials().await {
        Ok(()) => {
            info!("DocsAutomator credentials verified");
            Json(CredentialTestResponse {
                ok: true,
                message: "Connection successful".to_string(),
            })
        }
        Err(error) => {
            warn!(%error, "DocsAutomator credential test failed");
            Json(CredentialTestResponse {
                ok: false,
                message: error.to_string(),
            })
        }
    }
}
