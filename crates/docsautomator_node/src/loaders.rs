// --- File: crates/docsautomator_node/src/loaders.rs ---
//! Loader callbacks backing the host's dynamic parameter widgets.
//!
//! These run while the user edits the node, so none of them fail: every
//! error is logged and becomes a sentinel entry or notice.

use docsautomator_common::DocumentService;
use docsautomator_config::AutomationFilter;
use tracing::warn;

use crate::directory::{automation_options, lookup_automations};
use crate::error::DocsAutomatorError;
use crate::models::{OptionEntry, ResourceMapperFields};
use crate::placeholders::discover_schema;
use crate::presentation::{
    line_item_type_fallback, line_item_type_options, notice_only, resource_mapper_fields,
    ERROR_LOADING_PLACEHOLDERS, SELECT_AUTOMATION_FIRST,
};

/// Options for the automation selector.
pub async fn load_automation_options<S>(
    service: &S,
    filter: Option<AutomationFilter>,
) -> Vec<OptionEntry>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    automation_options(&lookup_automations(service, filter).await)
}

/// Options for a line-item type selector. `selected` holds the group keys
/// already chosen in the node's other line-item rows.
pub async fn load_line_item_types<S>(
    service: &S,
    automation_id: &str,
    selected: &[String],
) -> Vec<OptionEntry>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    if automation_id.trim().is_empty() {
        return vec![OptionEntry::notice(SELECT_AUTOMATION_FIRST)];
    }

    match discover_schema(service, automation_id).await {
        Ok(schema) => line_item_type_options(&schema, selected),
        Err(error) => {
            warn!(automation_id, %error, "error fetching line item types");
            line_item_type_fallback(selected)
        }
    }
}

/// Fields for the placeholder resource mapper.
pub async fn load_placeholder_fields<S>(service: &S, automation_id: &str) -> ResourceMapperFields
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    if automation_id.trim().is_empty() {
        return notice_only(SELECT_AUTOMATION_FIRST);
    }

    match discover_schema(service, automation_id).await {
        Ok(schema) => resource_mapper_fields(&schema),
        Err(error) => {
            warn!(automation_id, %error, "error fetching placeholders");
            notice_only(ERROR_LOADING_PLACEHOLDERS)
        }
    }
}
