// --- File: crates/docsautomator_node/src/directory.rs ---
//! Automation directory lookup.
//!
//! The `/automations` endpoint has answered with a bare array and with
//! several wrapper objects over time. [`decode_directory`] tries the known
//! shapes in a fixed order and the first match wins.

use docsautomator_common::DocumentService;
use docsautomator_config::AutomationFilter;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DocsAutomatorError;
use crate::models::{AutomationDescriptor, OptionEntry};

pub const NO_AUTOMATIONS_FOUND: &str = "No automations found";
pub const ERROR_LOADING_AUTOMATIONS: &str = "Error loading automations";

/// Keys a wrapper object may hold the automation array under, by priority.
const WRAPPER_KEYS: [&str; 3] = ["automations", "data", "results"];

/// The recognised shapes of a directory response.
#[derive(Debug, PartialEq)]
pub enum DirectoryShape<'a> {
    /// `[ ... ]`
    Bare(&'a [Value]),
    /// `{ "automations" | "data" | "results": [ ... ] }`
    Wrapped { key: &'static str, items: &'a [Value] },
    /// An object whose first array-valued property holds the items.
    Degraded { key: &'a str, items: &'a [Value] },
    /// Nothing usable.
    NoData,
}

impl<'a> DirectoryShape<'a> {
    pub fn items(&self) -> &'a [Value] {
        match *self {
            DirectoryShape::Bare(items)
            | DirectoryShape::Wrapped { items, .. }
            | DirectoryShape::Degraded { items, .. } => items,
            DirectoryShape::NoData => &[],
        }
    }
}

type ShapeMatcher = for<'a> fn(&'a Value) -> Option<DirectoryShape<'a>>;

fn match_bare(value: &Value) -> Option<DirectoryShape<'_>> {
    value.as_array().map(|items| DirectoryShape::Bare(items))
}

fn match_wrapped(value: &Value) -> Option<DirectoryShape<'_>> {
    let object = value.as_object()?;
    WRAPPER_KEYS.iter().copied().find_map(|key| {
        object
            .get(key)
            .and_then(Value::as_array)
            .map(|items| DirectoryShape::Wrapped { key, items })
    })
}

fn match_degraded(value: &Value) -> Option<DirectoryShape<'_>> {
    value.as_object()?.iter().find_map(|(key, v)| {
        v.as_array().map(|items| DirectoryShape::Degraded {
            key: key.as_str(),
            items,
        })
    })
}

const MATCHERS: [ShapeMatcher; 3] = [match_bare, match_wrapped, match_degraded];

/// Classifies a directory response.
pub fn decode_directory(value: &Value) -> DirectoryShape<'_> {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(value))
        .unwrap_or(DirectoryShape::NoData)
}

/// First non-empty string (or number) among `keys`.
fn first_text(object: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Projects one directory entry; entries without an identifier are dropped.
pub fn descriptor_from_value(value: &Value) -> Option<AutomationDescriptor> {
    let object = value.as_object()?;
    let id = first_text(object, &["id", "_id", "docId"])?;
    let name = first_text(object, &["name", "title", "id"]).unwrap_or_else(|| id.clone());
    let data_source = first_text(object, &["dataSource", "source"]);

    Some(AutomationDescriptor {
        id,
        name,
        data_source,
    })
}

/// Normalises a directory response into descriptors, applying `filter`.
///
/// Never empty: when nothing survives, a single "none found" sentinel is
/// returned.
pub fn normalize_directory(
    response: &Value,
    filter: Option<AutomationFilter>,
) -> Vec<AutomationDescriptor> {
    let shape = decode_directory(response);
    if let DirectoryShape::Degraded { key, .. } = &shape {
        debug!(key = %key, "automation list found under unexpected key");
    }

    let descriptors: Vec<AutomationDescriptor> = shape
        .items()
        .iter()
        .filter_map(descriptor_from_value)
        .filter(|d| filter.map_or(true, |f| f.allows(d.data_source.as_deref())))
        .collect();

    if descriptors.is_empty() {
        return vec![AutomationDescriptor::sentinel(NO_AUTOMATIONS_FOUND)];
    }
    descriptors
}

/// Fetches and normalises the automation directory.
///
/// Transport and API failures are logged and turned into a single
/// "error loading" sentinel; this never fails.
pub async fn lookup_automations<S>(
    service: &S,
    filter: Option<AutomationFilter>,
) -> Vec<AutomationDescriptor>
where
    S: DocumentService<Error = DocsAutomatorError>,
{
    match service.list_automations().await {
        Ok(response) => normalize_directory(&response, filter),
        Err(error) => {
            warn!(%error, "error fetching automations");
            vec![AutomationDescriptor::sentinel(ERROR_LOADING_AUTOMATIONS)]
        }
    }
}

/// Formats descriptors as an option list: `"<name> (<id>)"` for real
/// automations, a notice for sentinels.
pub fn automation_options(descriptors: &[AutomationDescriptor]) -> Vec<OptionEntry> {
    descriptors
        .iter()
        .map(|d| {
            if d.is_sentinel() {
                OptionEntry::notice(d.name.clone())
            } else {
                OptionEntry::available(format!("{} ({})", d.name, d.id), d.id.clone())
            }
        })
        .collect()
}
