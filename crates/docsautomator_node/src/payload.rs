// --- File: crates/docsautomator_node/src/payload.rs ---
//! Request body assembly for `createDocument`.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::DocsAutomatorError;
use crate::models::{LineItemSelection, PlaceholderValues};

/// Processing flags. `false` is sent as an absent key, never as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingFlags {
    pub is_preview: bool,
    pub is_async: bool,
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl PlaceholderValues {
    /// Flattens any editor shape into the main-field map.
    pub fn into_main_values(self) -> Result<Map<String, Value>, DocsAutomatorError> {
        match self {
            PlaceholderValues::Json { json } => {
                if json.trim().is_empty() {
                    return Ok(Map::new());
                }
                match serde_json::from_str::<Value>(&json) {
                    Ok(Value::Object(map)) => Ok(map),
                    Ok(other) => Err(DocsAutomatorError::InvalidPlaceholderValues(format!(
                        "expected a JSON object, found {}",
                        json_type_name(&other)
                    ))),
                    Err(e) => Err(DocsAutomatorError::InvalidPlaceholderValues(e.to_string())),
                }
            }
            PlaceholderValues::Fields { fields } => Ok(fields
                .into_iter()
                .filter(|field| !field.name.trim().is_empty())
                .map(|field| (field.name, field.value))
                .collect()),
            PlaceholderValues::ResourceMapper { value, .. } => Ok(value.unwrap_or_default()),
        }
    }
}

/// Parses and validates the rows of one selection.
///
/// Returns `Ok(None)` when the selection is not configured yet (blank text or
/// `null`), which callers skip. Errors name the trimmed group key, the one
/// the rows are sent under.
pub fn parse_line_items(
    selection: &LineItemSelection,
) -> Result<Option<Vec<Value>>, DocsAutomatorError> {
    let group = selection.group.trim();

    let parsed = match &selection.items {
        Value::Null => return Ok(None),
        Value::String(text) if text.trim().is_empty() => return Ok(None),
        Value::String(text) => serde_json::from_str::<Value>(text).map_err(|e| {
            DocsAutomatorError::InvalidLineItemJson {
                group: group.to_string(),
                message: e.to_string(),
            }
        })?,
        other => other.clone(),
    };

    let rows = match parsed {
        Value::Array(rows) => rows,
        other => {
            return Err(DocsAutomatorError::LineItemsNotArray {
                group: group.to_string(),
                found: json_type_name(&other),
            })
        }
    };

    if let Some(index) = rows.iter().position(|row| !row.is_object()) {
        return Err(DocsAutomatorError::LineItemRowNotObject {
            group: group.to_string(),
            index,
        });
    }

    Ok(Some(rows))
}

/// Builds the `createDocument` body.
///
/// Main values first, then the set flags, then one array per configured
/// line-item group under the group key. Selections with an empty group key or
/// blank rows are skipped; a group key used twice is rejected.
pub fn assemble_payload(
    main_values: Map<String, Value>,
    selections: &[LineItemSelection],
    flags: ProcessingFlags,
) -> Result<Map<String, Value>, DocsAutomatorError> {
    let mut payload = main_values;

    if flags.is_preview {
        payload.insert("isPreview".to_string(), Value::Bool(true));
    }
    if flags.is_async {
        payload.insert("async".to_string(), Value::Bool(true));
    }

    let mut seen: Vec<&str> = Vec::with_capacity(selections.len());
    for selection in selections {
        let group = selection.group.trim();
        if group.is_empty() {
            continue;
        }
        if seen.contains(&group) {
            return Err(DocsAutomatorError::DuplicateLineItemGroup(group.to_string()));
        }
        seen.push(group);

        match parse_line_items(selection)? {
            Some(rows) => {
                debug!(group, rows = rows.len(), "line items attached");
                payload.insert(group.to_string(), Value::Array(rows));
            }
            None => debug!(group, "line items not configured, skipped"),
        }
    }

    Ok(payload)
}
