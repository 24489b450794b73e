// --- File: crates/docsautomator_node/src/execute.rs ---
//! Batch execution of operation rows.
//!
//! Rows run strictly in input order, one at a time. Each `createDocument` row
//! walks `Idle -> ValidatingAutomationSelected -> ValidatingLineItems ->
//! Submitting -> Succeeded | Failed`; every transition is a `debug` event.

use std::fmt;

use docsautomator_common::DocumentService;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, warn};

use crate::error::DocsAutomatorError;
use crate::models::{DocumentRequest, ExecutionOutput, Operation, PairedItem};
use crate::payload::{assemble_payload, ProcessingFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Idle,
    ValidatingAutomationSelected,
    ValidatingLineItems,
    Submitting,
    Succeeded,
    Failed,
}

impl RowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowState::Idle => "idle",
            RowState::ValidatingAutomationSelected => "validating_automation_selected",
            RowState::ValidatingLineItems => "validating_line_items",
            RowState::Submitting => "submitting",
            RowState::Succeeded => "succeeded",
            RowState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RowState::Succeeded | RowState::Failed)
    }
}

impl fmt::Display for RowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the state of one row and logs every transition.
#[derive(Debug)]
struct RowTracker {
    index: usize,
    operation: &'static str,
    state: RowState,
}

impl RowTracker {
    fn new(index: usize, operation: &'static str) -> Self {
        Self {
            index,
            operation,
            state: RowState::Idle,
        }
    }

    fn advance(&mut self, next: RowState) {
        debug!(
            row = self.index,
            operation = self.operation,
            from = %self.state,
            to = %next,
            "row state transition"
        );
        self.state = next;
    }

    fn finish<T>(&mut self, result: &Result<T, DocsAutomatorError>) {
        self.advance(if result.is_ok() {
            RowState::Succeeded
        } else {
            RowState::Failed
        });
    }
}

fn require_automation(automation_id: &str) -> Result<&str, DocsAutomatorError> {
    let id = automation_id.trim();
    if id.is_empty() {
        return Err(DocsAutomatorError::MissingAutomation);
    }
    Ok(id)
}

/// Lifecycle bodies default to an empty object when not given.
fn body_or_empty(body: &Value) -> Value {
    match body {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    }
}

async fn submit_document<S>(
    service: &S,
    request: &DocumentRequest,
    row: &mut RowTracker,
) -> Result<Value, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    row.advance(RowState::ValidatingAutomationSelected);
    let automation_id = require_automation(&request.automation_id)?;

    row.advance(RowState::ValidatingLineItems);
    let main_values = request.placeholder_values.clone().into_main_values()?;
    let payload = assemble_payload(
        main_values,
        &request.line_items,
        ProcessingFlags {
            is_preview: request.is_preview,
            is_async: request.is_async,
        },
    )?;

    row.advance(RowState::Submitting);
    service.create_document(automation_id, &payload).await
}

/// Validates, assembles and submits one `createDocument` row.
///
/// The response body is returned unmodified.
pub async fn create_document_row<S>(
    service: &S,
    request: &DocumentRequest,
    index: usize,
) -> Result<Value, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    let mut row = RowTracker::new(index, "createDocument");
    let result = submit_document(service, request, &mut row).await;
    row.finish(&result);
    result
}

async fn dispatch<S>(
    service: &S,
    operation: &Operation,
    row: &mut RowTracker,
) -> Result<Value, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    match operation {
        Operation::CreateDocument(request) => submit_document(service, request, row).await,
        Operation::ListAutomations => {
            row.advance(RowState::Submitting);
            service.list_automations().await
        }
        Operation::CreateAutomation { body } => {
            row.advance(RowState::Submitting);
            service.create_automation(&body_or_empty(body)).await
        }
        Operation::DuplicateTemplate { body } => {
            row.advance(RowState::Submitting);
            service.duplicate_template(&body_or_empty(body)).await
        }
        Operation::GetAutomation { automation_id } => {
            row.advance(RowState::ValidatingAutomationSelected);
            let id = require_automation(automation_id)?;
            row.advance(RowState::Submitting);
            service.get_automation(id).await
        }
        Operation::UpdateAutomation {
            automation_id,
            body,
        } => {
            row.advance(RowState::ValidatingAutomationSelected);
            let id = require_automation(automation_id)?;
            row.advance(RowState::Submitting);
            service.update_automation(id, &body_or_empty(body)).await
        }
        Operation::DeleteAutomation { automation_id } => {
            row.advance(RowState::ValidatingAutomationSelected);
            let id = require_automation(automation_id)?;
            row.advance(RowState::Submitting);
            service.delete_automation(id).await
        }
        Operation::DuplicateAutomation { automation_id } => {
            row.advance(RowState::ValidatingAutomationSelected);
            let id = require_automation(automation_id)?;
            row.advance(RowState::Submitting);
            service.duplicate_automation(id).await
        }
    }
}

/// Runs a single operation row.
pub async fn run_operation<S>(
    service: &S,
    operation: &Operation,
    index: usize,
) -> Result<Value, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    let mut row = RowTracker::new(index, operation.name());
    let result = dispatch(service, operation, &mut row).await;
    row.finish(&result);
    result
}

/// Decodes one host row into an operation row.
pub fn decode_operation(row: Value) -> Result<Operation, DocsAutomatorError> {
    serde_json::from_value(row).map_err(|e| DocsAutomatorError::InvalidRow(e.to_string()))
}

/// Decodes one host row into a `createDocument` row.
pub fn decode_document_request(row: Value) -> Result<Operation, DocsAutomatorError> {
    serde_json::from_value(row)
        .map(Operation::CreateDocument)
        .map_err(|e| DocsAutomatorError::InvalidRow(e.to_string()))
}

/// Runs decoded rows in order. A row that failed to decode fails like any
/// other row.
async fn run_batch<S>(
    service: &S,
    rows: Vec<Result<Operation, DocsAutomatorError>>,
    continue_on_fail: bool,
) -> Result<Vec<ExecutionOutput>, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    info!(rows = rows.len(), continue_on_fail, "executing batch");
    let mut outputs = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let (operation, result) = match row {
            Ok(operation) => {
                let result = run_operation(service, &operation, index).await;
                (operation.name(), result)
            }
            Err(err) => ("undecoded", Err(err)),
        };
        let json = match result {
            Ok(response) => response,
            Err(err) => {
                if err.is_validation() {
                    warn!(row = index, operation, error = %err, "row rejected");
                } else {
                    error!(row = index, operation, error = %err, "row failed");
                }
                if !continue_on_fail {
                    return Err(err);
                }
                json!({ "error": err.to_string() })
            }
        };
        outputs.push(ExecutionOutput {
            json,
            paired_item: PairedItem { item: index },
        });
    }

    Ok(outputs)
}

/// Runs `operations` in order.
///
/// A failing row aborts the batch with its error, unless `continue_on_fail`
/// is set: then the row's output is `{"error": "<message>"}` and the next row
/// runs.
pub async fn execute_operations<S>(
    service: &S,
    operations: Vec<Operation>,
    continue_on_fail: bool,
) -> Result<Vec<ExecutionOutput>, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    run_batch(service, operations.into_iter().map(Ok).collect(), continue_on_fail).await
}

/// Runs `createDocument` for every request; see [`execute_operations`].
pub async fn execute<S>(
    service: &S,
    requests: Vec<DocumentRequest>,
    continue_on_fail: bool,
) -> Result<Vec<ExecutionOutput>, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    let operations = requests.into_iter().map(Operation::CreateDocument).collect();
    execute_operations(service, operations, continue_on_fail).await
}

/// Like [`execute_operations`], for rows still in host JSON form. Each row is
/// decoded on its own, so a malformed row only fails that row.
pub async fn execute_operation_rows<S>(
    service: &S,
    rows: Vec<Value>,
    continue_on_fail: bool,
) -> Result<Vec<ExecutionOutput>, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    let operations = rows.into_iter().map(decode_operation).collect();
    run_batch(service, operations, continue_on_fail).await
}

/// Like [`execute`], for rows still in host JSON form.
pub async fn execute_rows<S>(
    service: &S,
    rows: Vec<Value>,
    continue_on_fail: bool,
) -> Result<Vec<ExecutionOutput>, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    let operations = rows.into_iter().map(decode_document_request).collect();
    run_batch(service, operations, continue_on_fail).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_state_names() {
        assert_eq!(RowState::ValidatingLineItems.to_string(), "validating_line_items");
        assert!(RowState::Failed.is_terminal());
        assert!(!RowState::Submitting.is_terminal());
    }

    #[test]
    fn test_require_automation() {
        assert!(matches!(
            require_automation("   "),
            Err(DocsAutomatorError::MissingAutomation)
        ));
        assert_eq!(require_automation(" abc123 ").unwrap(), "abc123");
    }

    #[test]
    fn test_decode_failures_are_row_errors() {
        let err = decode_document_request(json!({ "automationId": "a1", "isPreview": "yes" }))
            .unwrap_err();
        assert!(matches!(err, DocsAutomatorError::InvalidRow(_)));
        assert!(err.to_string().contains("expected a boolean"));

        let err = decode_operation(json!({ "operation": "launchRocket" })).unwrap_err();
        assert!(err.is_validation());

        let op = decode_operation(json!({ "operation": "listAutomations" })).unwrap();
        assert_eq!(op, Operation::ListAutomations);
    }

    #[test]
    fn test_body_or_empty() {
        assert_eq!(body_or_empty(&Value::Null), json!({}));
        assert_eq!(body_or_empty(&json!({ "name": "x" })), json!({ "name": "x" }));
    }
}
