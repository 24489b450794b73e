// --- File: crates/docsautomator_node/src/presentation.rs ---
//! Host-facing views of a [`PlaceholderSchema`].
//!
//! Everything here is pure formatting: the loaders in `loaders.rs` do the
//! fetching and decide which builder to call on success or failure.

use crate::models::{OptionEntry, PlaceholderSchema, ResourceMapperField, ResourceMapperFields};
use crate::placeholders::{line_item_group_number, title_case};

pub const SELECT_AUTOMATION_FIRST: &str = "Please select an automation first";
pub const ALL_LINE_ITEM_TYPES_ADDED: &str = "All available line item types have been added";
pub const NO_LINE_ITEM_TYPES_FOUND: &str = "No line item types found for this automation";
pub const ERROR_LOADING_LINE_ITEM_TYPES: &str = "Error loading line item types";
pub const NO_PLACEHOLDERS_FOUND: &str = "No placeholders found for this automation";
pub const ERROR_LOADING_PLACEHOLDERS: &str = "Error loading placeholders";
pub const LINE_ITEMS_CONFIGURED_SEPARATELY: &str = "Note: Line item placeholders (shown with ↳) should be configured in the separate \"Line Items\" section below.";

/// `line_items_3` is shown as `Line Items 3`; unknown keys as themselves.
pub fn line_item_label(key: &str) -> String {
    match line_item_group_number(key) {
        Some(number) => format!("Line Items {}", number),
        None => key.to_string(),
    }
}

/// Non-empty keys, first occurrence wins.
pub fn distinct_selected(selected: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(selected.len());
    for key in selected.iter().map(|k| k.trim()).filter(|k| !k.is_empty()) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

fn already_selected_options(selected: &[String]) -> impl Iterator<Item = OptionEntry> + '_ {
    selected
        .iter()
        .map(|key| OptionEntry::already_selected(line_item_label(key), key.clone()))
}

/// Line-item type options for one selector.
///
/// Groups not yet chosen come first as selectable entries, then every group
/// already chosen elsewhere (kept valid for the host), then a notice when
/// nothing new is left to pick.
pub fn line_item_type_options(schema: &PlaceholderSchema, selected: &[String]) -> Vec<OptionEntry> {
    let selected = distinct_selected(selected);

    let mut options: Vec<OptionEntry> = schema
        .line_item_groups
        .iter()
        .filter(|group| !selected.contains(&group.key))
        .map(|group| OptionEntry::available(line_item_label(&group.key), group.key.clone()))
        .collect();
    let nothing_new = options.is_empty();

    options.extend(already_selected_options(&selected));

    if nothing_new {
        options.push(OptionEntry::notice(if selected.is_empty() {
            NO_LINE_ITEM_TYPES_FOUND
        } else {
            ALL_LINE_ITEM_TYPES_ADDED
        }));
    }
    options
}

/// Options when the schema could not be loaded: the already chosen groups,
/// rebuilt from their keys, plus an error notice.
pub fn line_item_type_fallback(selected: &[String]) -> Vec<OptionEntry> {
    let selected = distinct_selected(selected);
    let mut options: Vec<OptionEntry> = already_selected_options(&selected).collect();
    options.push(OptionEntry::notice(ERROR_LOADING_LINE_ITEM_TYPES));
    options
}

fn mapper_field(id: String, display_name: String, read_only: bool) -> ResourceMapperField {
    ResourceMapperField {
        id,
        display_name,
        default_match: false,
        can_be_used_to_match: false,
        required: false,
        display: true,
        field_type: "string".to_string(),
        read_only,
    }
}

/// Resource-mapper fields: editable main placeholders, then for each group a
/// read-only header and read-only reference fields.
pub fn resource_mapper_fields(schema: &PlaceholderSchema) -> ResourceMapperFields {
    let mut fields: Vec<ResourceMapperField> = schema
        .main
        .iter()
        .map(|placeholder| mapper_field(placeholder.clone(), title_case(placeholder), false))
        .collect();

    for group in &schema.line_item_groups {
        fields.push(mapper_field(
            format!("{}_header", group.key),
            format!(
                "--- {} (configured separately) ---",
                group.key.replace('_', " ").to_uppercase()
            ),
            true,
        ));
        fields.extend(group.fields.iter().map(|placeholder| {
            mapper_field(
                format!("{}_{}", group.key, placeholder),
                format!("  ↳ {}", title_case(placeholder)),
                true,
            )
        }));
    }

    if fields.is_empty() {
        return notice_only(NO_PLACEHOLDERS_FOUND);
    }

    let empty_fields_notice = (!schema.line_item_groups.is_empty())
        .then(|| LINE_ITEMS_CONFIGURED_SEPARATELY.to_string());

    ResourceMapperFields {
        fields,
        empty_fields_notice,
    }
}

/// An empty field list carrying only a notice.
pub fn notice_only(notice: &str) -> ResourceMapperFields {
    ResourceMapperFields {
        fields: Vec::new(),
        empty_fields_notice: Some(notice.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItemGroup, OptionKind};

    fn schema(main: &[&str], groups: &[(&str, &[&str])]) -> PlaceholderSchema {
        PlaceholderSchema {
            main: main.iter().map(|s| s.to_string()).collect(),
            line_item_groups: groups
                .iter()
                .map(|(key, fields)| LineItemGroup {
                    key: key.to_string(),
                    number: line_item_group_number(key).unwrap().to_string(),
                    fields: fields.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn keys(selected: &[&str]) -> Vec<String> {
        selected.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_options_exclude_selected_but_offer_them_back() {
        let s = schema(&[], &[("line_items_1", &["a"]), ("line_items_2", &["b"])]);
        let options = line_item_type_options(&s, &keys(&["line_items_1"]));

        assert_eq!(
            options,
            vec![
                OptionEntry::available("Line Items 2", "line_items_2"),
                OptionEntry::already_selected("Line Items 1", "line_items_1"),
            ]
        );
    }

    #[test]
    fn test_all_selected_adds_notice() {
        let s = schema(&[], &[("line_items_1", &["a"])]);
        let options = line_item_type_options(&s, &keys(&["line_items_1", "line_items_1"]));

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].kind, OptionKind::AlreadySelected);
        assert_eq!(options[1], OptionEntry::notice(ALL_LINE_ITEM_TYPES_ADDED));
    }

    #[test]
    fn test_selected_group_missing_from_remote_is_kept() {
        let s = schema(&[], &[("line_items_2", &[])]);
        let options = line_item_type_options(&s, &keys(&["line_items_5"]));
        assert!(options.contains(&OptionEntry::already_selected("Line Items 5", "line_items_5")));
        assert!(options.contains(&OptionEntry::available("Line Items 2", "line_items_2")));
    }

    #[test]
    fn test_no_groups_at_all() {
        let options = line_item_type_options(&schema(&["name"], &[]), &[]);
        assert_eq!(options, vec![OptionEntry::notice(NO_LINE_ITEM_TYPES_FOUND)]);
    }

    #[test]
    fn test_fallback_keeps_selection() {
        let options = line_item_type_fallback(&keys(&["line_items_1", ""]));
        assert_eq!(
            options,
            vec![
                OptionEntry::already_selected("Line Items 1", "line_items_1"),
                OptionEntry::notice(ERROR_LOADING_LINE_ITEM_TYPES),
            ]
        );
    }

    #[test]
    fn test_resource_mapper_fields() {
        let s = schema(&["foo_bar"], &[("line_items_1", &["unit_price"])]);
        let mapped = resource_mapper_fields(&s);

        assert_eq!(mapped.fields.len(), 3);
        assert_eq!(mapped.fields[0].id, "foo_bar");
        assert_eq!(mapped.fields[0].display_name, "Foo Bar");
        assert!(!mapped.fields[0].read_only);

        assert_eq!(mapped.fields[1].id, "line_items_1_header");
        assert_eq!(
            mapped.fields[1].display_name,
            "--- LINE ITEMS 1 (configured separately) ---"
        );
        assert!(mapped.fields[1].read_only);

        assert_eq!(mapped.fields[2].id, "line_items_1_unit_price");
        assert_eq!(mapped.fields[2].display_name, "  ↳ Unit Price");
        assert_eq!(
            mapped.empty_fields_notice.as_deref(),
            Some(LINE_ITEMS_CONFIGURED_SEPARATELY)
        );
    }

    #[test]
    fn test_resource_mapper_main_only_has_no_notice() {
        let mapped = resource_mapper_fields(&schema(&["name"], &[]));
        assert_eq!(mapped.fields.len(), 1);
        assert_eq!(mapped.empty_fields_notice, None);
    }

    #[test]
    fn test_resource_mapper_empty_schema() {
        assert_eq!(
            resource_mapper_fields(&PlaceholderSchema::default()),
            notice_only(NO_PLACEHOLDERS_FOUND)
        );
    }
}
