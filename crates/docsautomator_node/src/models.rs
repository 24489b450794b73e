// --- File: crates/docsautomator_node/src/models.rs ---
//! Data structures exchanged between the node and its host.
//!
//! Field names on the wire are camelCase to match the host's parameter names
//! (`automationId`, `lineItemType`, `isPreview`, ...).

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Directory ---

/// One automation as presented to the user.
///
/// An empty `id` marks a sentinel ("none found", "error loading"): it is never
/// a valid selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationDescriptor {
    pub id: String,
    pub name: String,
    pub data_source: Option<String>,
}

impl AutomationDescriptor {
    pub fn sentinel(label: &str) -> Self {
        Self {
            id: String::new(),
            name: label.to_string(),
            data_source: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id.is_empty()
    }
}

// --- Placeholders ---

/// A repeating line-item block and its placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemGroup {
    /// `line_items_<n>`; also the payload key for the block.
    pub key: String,
    /// Digits of the key, as written.
    pub number: String,
    pub fields: Vec<String>,
}

/// Placeholders of one automation, in remote order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderSchema {
    pub main: Vec<String>,
    pub line_item_groups: Vec<LineItemGroup>,
}

impl PlaceholderSchema {
    pub fn group(&self, key: &str) -> Option<&LineItemGroup> {
        self.line_item_groups.iter().find(|g| g.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.line_item_groups.is_empty()
    }
}

// --- Option lists ---

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionKind {
    /// A value the user may pick.
    Available,
    /// A value the user already picked elsewhere; still valid, offered back
    /// so the host keeps accepting the saved configuration.
    AlreadySelected,
    /// Informational entry with an empty value; not selectable.
    Notice,
}

/// An entry of a dynamically loaded option list.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub name: String,
    pub value: String,
    pub kind: OptionKind,
}

impl OptionEntry {
    pub fn available(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: OptionKind::Available,
        }
    }

    pub fn already_selected(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: OptionKind::AlreadySelected,
        }
    }

    pub fn notice(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            kind: OptionKind::Notice,
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.kind != OptionKind::Notice
    }
}

/// A field of the host's resource mapper.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMapperField {
    pub id: String,
    pub display_name: String,
    pub default_match: bool,
    pub can_be_used_to_match: bool,
    pub required: bool,
    pub display: bool,
    #[serde(rename = "type")]
    pub field_type: String,
    pub read_only: bool,
}

/// The resource-mapper payload: fields plus an optional notice.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMapperFields {
    pub fields: Vec<ResourceMapperField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_fields_notice: Option<String>,
}

// --- Execution input ---

/// One row of a structured key/value placeholder editor.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderField {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Main placeholder values in one of the host's editor shapes.
///
/// `mode` selects the shape. Without it the value is read as the host's
/// resource-mapper parameter (`{mappingMode, value, matchingColumns, schema}`).
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PlaceholderValues {
    /// Free-form JSON object text.
    Json {
        #[serde(default)]
        json: String,
    },
    /// Structured key/value rows.
    Fields {
        #[serde(default)]
        fields: Vec<PlaceholderField>,
    },
    /// Resource-mapper output: `value` holds the mapped fields.
    #[serde(rename_all = "camelCase")]
    ResourceMapper {
        #[serde(default)]
        mapping_mode: Option<String>,
        #[serde(default)]
        #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
        value: Option<Map<String, Value>>,
    },
}

#[derive(Deserialize)]
#[serde(remote = "PlaceholderValues", tag = "mode", rename_all = "camelCase")]
enum TaggedPlaceholderValues {
    Json {
        #[serde(default)]
        json: String,
    },
    Fields {
        #[serde(default)]
        fields: Vec<PlaceholderField>,
    },
    #[serde(rename_all = "camelCase")]
    ResourceMapper {
        #[serde(default)]
        mapping_mode: Option<String>,
        #[serde(default)]
        value: Option<Map<String, Value>>,
    },
}

impl<'de> Deserialize<'de> for PlaceholderValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw = Value::deserialize(deserializer)?;
        match &mut raw {
            Value::Null => return Ok(PlaceholderValues::default()),
            Value::Object(map) => {
                map.entry("mode")
                    .or_insert_with(|| Value::from("resourceMapper"));
            }
            _ => {}
        }
        TaggedPlaceholderValues::deserialize(raw).map_err(de::Error::custom)
    }
}

impl Default for PlaceholderValues {
    fn default() -> Self {
        PlaceholderValues::ResourceMapper {
            mapping_mode: None,
            value: None,
        }
    }
}

/// A line-item group selection: the group key plus its rows.
///
/// `items` is normally the JSON text typed by the user; an already-parsed
/// JSON value is accepted too.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemSelection {
    #[serde(rename = "lineItemType", default)]
    pub group: String,
    #[serde(default)]
    pub items: Value,
}

impl LineItemSelection {
    pub fn new(group: impl Into<String>, items: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            items: Value::String(items.into()),
        }
    }
}

/// Parameters of one document-creation row.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    #[serde(default)]
    pub automation_id: String,
    #[serde(default)]
    pub placeholder_values: PlaceholderValues,
    #[serde(default)]
    pub line_items: Vec<LineItemSelection>,
    #[serde(default)]
    pub is_preview: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
}

/// One operation row. `CreateDocument` is the primary one; the others are
/// pass-through calls for automation and template management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum Operation {
    CreateDocument(DocumentRequest),
    ListAutomations,
    #[serde(rename_all = "camelCase")]
    GetAutomation {
        #[serde(default)]
        automation_id: String,
    },
    CreateAutomation {
        #[serde(default)]
        body: Value,
    },
    #[serde(rename_all = "camelCase")]
    UpdateAutomation {
        #[serde(default)]
        automation_id: String,
        #[serde(default)]
        body: Value,
    },
    #[serde(rename_all = "camelCase")]
    DeleteAutomation {
        #[serde(default)]
        automation_id: String,
    },
    #[serde(rename_all = "camelCase")]
    DuplicateAutomation {
        #[serde(default)]
        automation_id: String,
    },
    DuplicateTemplate {
        #[serde(default)]
        body: Value,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateDocument(_) => "createDocument",
            Operation::ListAutomations => "listAutomations",
            Operation::GetAutomation { .. } => "getAutomation",
            Operation::CreateAutomation { .. } => "createAutomation",
            Operation::UpdateAutomation { .. } => "updateAutomation",
            Operation::DeleteAutomation { .. } => "deleteAutomation",
            Operation::DuplicateAutomation { .. } => "duplicateAutomation",
            Operation::DuplicateTemplate { .. } => "duplicateTemplate",
        }
    }
}

// --- Execution output ---

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// The result of one input row, paired with the row's index.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutput {
    pub json: Value,
    pub paired_item: PairedItem,
}
