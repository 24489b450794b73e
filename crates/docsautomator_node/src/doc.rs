// --- File: crates/docsautomator_node/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    AutomationQuery, CredentialTestResponse, ExecuteRequest, LineItemTypesQuery,
    OperationsRequest,
};
use crate::models::{
    DocumentRequest, ExecutionOutput, LineItemSelection, OptionEntry, OptionKind, PairedItem,
    PlaceholderField, PlaceholderValues, ResourceMapperField, ResourceMapperFields,
};

#[utoipa::path(
    get,
    path = "/docsautomator/automations", // Path relative to /api
    responses(
        (status = 200, description = "Automation options; a single notice entry when none are found or loading failed", body = [OptionEntry]),
        (status = 500, description = "DocsAutomator disabled or API key missing")
    ),
    tag = "DocsAutomator"
)]
fn doc_automations_handler() {}

#[utoipa::path(
    get,
    path = "/docsautomator/placeholders",
    params(AutomationQuery),
    responses(
        (status = 200, description = "Resource-mapper fields for the automation", body = ResourceMapperFields),
        (status = 500, description = "DocsAutomator disabled or API key missing")
    ),
    tag = "DocsAutomator"
)]
fn doc_placeholders_handler() {}

#[utoipa::path(
    get,
    path = "/docsautomator/line-item-types",
    params(LineItemTypesQuery),
    responses(
        (status = 200, description = "Line-item type options; groups chosen elsewhere are offered back as already selected", body = [OptionEntry]),
        (status = 500, description = "DocsAutomator disabled or API key missing")
    ),
    tag = "DocsAutomator"
)]
fn doc_line_item_types_handler() {}

#[utoipa::path(
    post,
    path = "/docsautomator/execute",
    request_body(content = ExecuteRequest, example = json!({
        "items": [{
            "automationId": "abc123",
            "placeholderValues": { "mode": "resourceMapper", "mappingMode": "defineBelow", "value": { "name": "Alice" } },
            "lineItems": [{ "lineItemType": "line_items_1", "items": "[{\"item\":\"Widget\",\"qty\":2}]" }],
            "isPreview": true
        }],
        "continueOnFail": false
    })),
    responses(
        (status = 200, description = "One output per input row, paired by index", body = [ExecutionOutput]),
        (status = 400, description = "Validation failed (no automation, malformed line items)"),
        (status = 401, description = "API key rejected"),
        (status = 502, description = "DocsAutomator API error")
    ),
    tag = "DocsAutomator"
)]
fn doc_execute_handler() {}

#[utoipa::path(
    post,
    path = "/docsautomator/operations",
    request_body(content = OperationsRequest, example = json!({
        "items": [
            { "operation": "getAutomation", "automationId": "abc123" },
            { "operation": "duplicateAutomation", "automationId": "abc123" }
        ],
        "continueOnFail": true
    })),
    responses(
        (status = 200, description = "Raw API responses, one per row", body = [ExecutionOutput]),
        (status = 400, description = "Validation failed"),
        (status = 502, description = "DocsAutomator API error")
    ),
    tag = "DocsAutomator"
)]
fn doc_operations_handler() {}

#[utoipa::path(
    post,
    path = "/docsautomator/credentials/test",
    responses(
        (status = 200, description = "Result of the credential check", body = CredentialTestResponse),
        (status = 500, description = "DocsAutomator disabled or API key missing")
    ),
    tag = "DocsAutomator"
)]
fn doc_credentials_test_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_automations_handler,
        doc_placeholders_handler,
        doc_line_item_types_handler,
        doc_execute_handler,
        doc_operations_handler,
        doc_credentials_test_handler
    ),
    components(
        schemas(
            OptionEntry,
            OptionKind,
            ResourceMapperField,
            ResourceMapperFields,
            PlaceholderField,
            PlaceholderValues,
            LineItemSelection,
            DocumentRequest,
            ExecuteRequest,
            OperationsRequest,
            ExecutionOutput,
            PairedItem,
            CredentialTestResponse
        )
    ),
    tags(
        (name = "DocsAutomator", description = "DocsAutomator document generation")
    )
)]
pub struct DocsAutomatorApiDoc;
