// --- File: crates/docsautomator_node/src/placeholders.rs ---
//! Placeholder schema discovery.
//!
//! `parse_placeholder_schema` is the single place that understands the
//! `/listPlaceholdersV2` response; option lists and resource-mapper fields are
//! both formatted from its output.

use docsautomator_common::DocumentService;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::DocsAutomatorError;
use crate::models::{LineItemGroup, PlaceholderSchema};

static LINE_ITEM_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^line_items_(\d+)$").expect("static regex"));

/// Digits of a `line_items_<n>` key; `None` for any other key or `n == 0`.
///
/// The digits are kept as text, so any length is accepted.
pub fn line_item_group_number(key: &str) -> Option<&str> {
    LINE_ITEM_KEY
        .captures(key)
        .and_then(|caps| caps.get(1))
        .map(|n| n.as_str())
        .filter(|n| n.bytes().any(|b| b != b'0'))
}

/// `"foo_bar"` becomes `"Foo Bar"`: underscores to spaces, then the first
/// letter of every word upper-cased. The rest of each word is left as is.
pub fn title_case(placeholder: &str) -> String {
    let spaced = placeholder.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut previous_is_word = false;
    for c in spaced.chars() {
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !previous_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        previous_is_word = is_word;
    }
    out
}

/// String entries of a placeholder array, first occurrence wins.
fn field_names(values: &[Value]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(values.len());
    for name in values.iter().filter_map(Value::as_str) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Parses the body of `/listPlaceholdersV2`.
///
/// `placeholders.main` (if an array) gives the main fields; every other
/// `line_items_<n>` key holding an array gives a group. Anything else is
/// ignored, and a body without `placeholders` gives an empty schema.
pub fn parse_placeholder_schema(response: &Value) -> PlaceholderSchema {
    let Some(placeholders) = response.get("placeholders").and_then(Value::as_object) else {
        return PlaceholderSchema::default();
    };

    let main = placeholders
        .get("main")
        .and_then(Value::as_array)
        .map(|values| field_names(values))
        .unwrap_or_default();

    let line_item_groups = placeholders
        .iter()
        .filter_map(|(key, value)| {
            let number = line_item_group_number(key)?;
            let fields = value.as_array()?;
            Some(LineItemGroup {
                key: key.clone(),
                number: number.to_string(),
                fields: field_names(fields),
            })
        })
        .collect();

    PlaceholderSchema {
        main,
        line_item_groups,
    }
}

/// Fetches and parses the placeholder schema of one automation.
pub async fn discover_schema<S>(
    service: &S,
    automation_id: &str,
) -> Result<PlaceholderSchema, DocsAutomatorError>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    let response = service.list_placeholders(automation_id).await?;
    let schema = parse_placeholder_schema(&response);
    debug!(
        automation_id,
        main = schema.main.len(),
        groups = schema.line_item_groups.len(),
        "placeholder schema discovered"
    );
    Ok(schema)
}
