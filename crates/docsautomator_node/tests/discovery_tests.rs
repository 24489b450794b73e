//! Schema discovery and the loader fallbacks.


use docsautomator_config::AutomationFilter;
use docsautomator_node::loaders::{
    load_automation_options, load_line_item_types, load_placeholder_fields,
};
use docsautomator_node::presentation::{
    ALL_LINE_ITEM_TYPES_ADDED, ERROR_LOADING_LINE_ITEM_TYPES, ERROR_LOADING_PLACEHOLDERS,
    SELECT_AUTOMATION_FIRST,
};
use docsautomator_node::OptionEntry;
use fixtures::{create_test_client, record_events, FakeDocsAutomator, UNREACHABLE_BASE_URL};
use tracing::Level;

fn selected(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[tokio::test]
async fn test_selected_group_survives_transport_error() {
    let (events, _guard) = record_events();
    let client = create_test_client(UNREACHABLE_BASE_URL);

    let options = load_line_item_types(&client, "abc123", &selected(&["line_items_2"])).await;

    assert_eq!(
        options,
        vec![
            OptionEntry::already_selected("Line Items 2", "line_items_2"),
            OptionEntry::notice(ERROR_LOADING_LINE_ITEM_TYPES),
        ]
    );

    let warnings = events.with_message("error fetching line item types");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].level, Level::WARN);
    assert_eq!(warnings[0].field("automation_id"), Some("abc123"));
}

#[tokio::test]
async fn test_line_item_types_exclude_other_rows() {
    let fake = FakeDocsAutomator::default();

    let options = load_line_item_types(&fake, "abc123", &selected(&["line_items_1"])).await;
    assert_eq!(
        options,
        vec![
            OptionEntry::available("Line Items 2", "line_items_2"),
            OptionEntry::already_selected("Line Items 1", "line_items_1"),
        ]
    );

    let options =
        load_line_item_types(&fake, "abc123", &selected(&["line_items_1", "line_items_2"])).await;
    assert_eq!(options.last(), Some(&OptionEntry::notice(ALL_LINE_ITEM_TYPES_ADDED)));
    assert!(options.iter().all(|o| o.kind != docsautomator_node::OptionKind::Available));
}

#[tokio::test]
async fn test_no_automation_selected_skips_the_api() {
    let fake = FakeDocsAutomator::default();

    assert_eq!(
        load_line_item_types(&fake, "  ", &[]).await,
        vec![OptionEntry::notice(SELECT_AUTOMATION_FIRST)]
    );
    let mapped = load_placeholder_fields(&fake, "").await;
    assert!(mapped.fields.is_empty());
    assert_eq!(mapped.empty_fields_notice.as_deref(), Some(SELECT_AUTOMATION_FIRST));

    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_placeholder_error_becomes_notice() {
    let (events, _guard) = record_events();
    let fake = FakeDocsAutomator {
        placeholders: None,
        ..FakeDocsAutomator::default()
    };

    let mapped = load_placeholder_fields(&fake, "abc123").await;
    assert!(mapped.fields.is_empty());
    assert_eq!(
        mapped.empty_fields_notice.as_deref(),
        Some(ERROR_LOADING_PLACEHOLDERS)
    );
    assert_eq!(events.with_message("error fetching placeholders").len(), 1);
}

#[tokio::test]
async fn test_directory_filter_applies() {
    let fake = FakeDocsAutomator::default();

    let options = load_automation_options(&fake, Some(AutomationFilter::Api)).await;
    assert_eq!(options, vec![OptionEntry::available("Invoice (abc123)", "abc123")]);

    let options = load_automation_options(&fake, Some(AutomationFilter::ApiOrN8n)).await;
    assert_eq!(options.len(), 2);
}
