// --- File: crates/docsautomator_node/src/lib.rs ---
// Declare modules within this crate
pub mod client;
pub mod directory;
pub mod doc;
pub mod error;
pub mod execute;
pub mod handlers;
pub mod loaders;
pub mod models;
pub mod payload;
pub mod placeholders;
pub mod presentation;
pub mod routes;

pub use client::DocsAutomatorClient;
pub use error::DocsAutomatorError;
pub use execute::{
    create_document_row, decode_document_request, decode_operation, execute, execute_operation_rows,
    execute_operations, execute_rows, run_operation, RowState,
};
pub use models::{
    AutomationDescriptor, DocumentRequest, ExecutionOutput, LineItemGroup, LineItemSelection,
    Operation, OptionEntry, OptionKind, PlaceholderSchema, PlaceholderValues,
    ResourceMapperFields,
};
pub use payload::{assemble_payload, ProcessingFlags};
pub use routes::routes;
