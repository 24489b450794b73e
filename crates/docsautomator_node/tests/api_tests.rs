//! DocsAutomator API client and node operations against a mock server.


use docsautomator_common::{HttpStatusCode, NodeError};
use docsautomator_node::directory::{ERROR_LOADING_AUTOMATIONS, NO_AUTOMATIONS_FOUND};
use docsautomator_node::loaders::{load_automation_options, load_placeholder_fields};
use docsautomator_node::models::{LineItemSelection, PlaceholderValues};
use docsautomator_node::{execute, execute_operations, DocsAutomatorError, DocumentRequest, Operation, OptionEntry};
use fixtures::{automation_items, create_test_client, placeholders_response, TEST_API_KEY};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn invoice_request() -> DocumentRequest {
    let mut values = Map::new();
    values.insert("name".to_string(), json!("Alice"));

    DocumentRequest {
        automation_id: "abc123".to_string(),
        placeholder_values: PlaceholderValues::ResourceMapper {
            mapping_mode: Some("defineBelow".to_string()),
            value: Some(values),
        },
        line_items: vec![LineItemSelection::new(
            "line_items_1",
            r#"[{"item":"Widget","qty":2}]"#,
        )],
        is_preview: true,
        is_async: false,
    }
}

#[tokio::test]
async fn test_create_document_end_to_end() {
    let server = MockServer::start().await;
    let expected_body = json!({
        "name": "Alice",
        "isPreview": true,
        "line_items_1": [{ "item": "Widget", "qty": 2 }]
    });
    let remote_response = json!({
        "pdfUrl": "https://docs.example.com/abc123.pdf",
        "googleDocUrl": "https://docs.google.com/document/d/xyz"
    });

    Mock::given(method("POST"))
        .and(path("/createDocument"))
        .and(query_param("docId", "abc123"))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&remote_response))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri());
    let outputs = execute(&client, vec![invoice_request()], false)
        .await
        .unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].json, remote_response);
    assert_eq!(outputs[0].paired_item.item, 0);

    // Key order on the wire: main values, flags, line items.
    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8(received[0].body.clone()).unwrap();
    assert_eq!(
        body,
        r#"{"name":"Alice","isPreview":true,"line_items_1":[{"item":"Widget","qty":2}]}"#
    );
}

#[tokio::test]
async fn test_flags_false_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/createDocument"))
        .and(body_json(json!({ "async": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "queued" })))
        .expect(1)
        .mount(&server)
        .await;

    let request = DocumentRequest {
        automation_id: "abc123".to_string(),
        placeholder_values: PlaceholderValues::default(),
        line_items: vec![],
        is_preview: false,
        is_async: true,
    };
    let client = create_test_client(&server.uri());
    let outputs = execute(&client, vec![request], false).await.unwrap();
    assert_eq!(outputs[0].json, json!({ "status": "queued" }));
}

#[tokio::test]
async fn test_invalid_line_items_never_reach_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut request = invoice_request();
    request.line_items = vec![LineItemSelection::new("line_items_1", "[1,2]")];

    let client = create_test_client(&server.uri());
    let err = execute(&client, vec![request], false).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Line item at index 0 in line_items_1 must be a JSON object"
    );
}

#[tokio::test]
async fn test_api_error_is_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/createDocument"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri());
    let err = execute(&client, vec![invoice_request()], false)
        .await
        .unwrap_err();

    match &err {
        DocsAutomatorError::ApiError {
            status_code,
            message,
        } => {
            assert_eq!(*status_code, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("unexpected error: {other}"),
    }
    let node_error: NodeError = err.into();
    assert!(matches!(node_error, NodeError::AuthError(_)));
    assert_eq!(node_error.status_code(), 401);
}

#[tokio::test]
async fn test_directory_wrappers_produce_same_options() {
    let mut option_lists: Vec<Vec<OptionEntry>> = Vec::new();

    for body in [
        automation_items(),
        json!({ "automations": automation_items() }),
        json!({ "data": automation_items() }),
        json!({ "results": automation_items() }),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/automations"))
            .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = create_test_client(&server.uri());
        option_lists.push(load_automation_options(&client, None).await);
    }

    assert_eq!(
        option_lists[0],
        vec![
            OptionEntry::available("Invoice (abc123)", "abc123"),
            OptionEntry::available("Quote (def456)", "def456"),
            OptionEntry::available("ghi789 (ghi789)", "ghi789"),
        ]
    );
    assert!(option_lists.iter().all(|list| list == &option_lists[0]));
}

#[tokio::test]
async fn test_directory_empty_and_error_sentinels() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/automations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "automations": [] })))
        .mount(&server)
        .await;
    let client = create_test_client(&server.uri());
    assert_eq!(
        load_automation_options(&client, None).await,
        vec![OptionEntry::notice(NO_AUTOMATIONS_FOUND)]
    );

    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/automations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&failing)
        .await;
    let client = create_test_client(&failing.uri());
    assert_eq!(
        load_automation_options(&client, None).await,
        vec![OptionEntry::notice(ERROR_LOADING_AUTOMATIONS)]
    );
}

#[tokio::test]
async fn test_placeholder_fields_from_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listPlaceholdersV2"))
        .and(query_param("automationId", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(placeholders_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri());
    let mapped = load_placeholder_fields(&client, "abc123").await;

    let ids: Vec<&str> = mapped.fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "customer_name",
            "invoice_date",
            "line_items_1_header",
            "line_items_1_item",
            "line_items_1_qty",
            "line_items_2_header",
            "line_items_2_sku",
            "line_items_2_unit_price",
        ]
    );
    assert_eq!(mapped.fields[0].display_name, "Customer Name");
    assert_eq!(mapped.fields[7].display_name, "  ↳ Unit Price");
}

#[tokio::test]
async fn test_lifecycle_operations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/automation"))
        .and(query_param("automationId", "a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a1", "title": "Invoice" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/updateAutomation"))
        .and(query_param("automationId", "a1"))
        .and(body_json(json!({ "title": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updated": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/deleteAutomation"))
        .and(query_param("automationId", "a1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/duplicateAutomation"))
        .and(query_param("automationId", "a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a2" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/duplicateGoogleDocTemplate"))
        .and(body_json(json!({ "docId": "tmpl" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("copied"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/createAutomation"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a3" })))
        .expect(1)
        .mount(&server)
        .await;

    let operations = vec![
        Operation::GetAutomation {
            automation_id: "a1".to_string(),
        },
        Operation::UpdateAutomation {
            automation_id: "a1".to_string(),
            body: json!({ "title": "Renamed" }),
        },
        Operation::DeleteAutomation {
            automation_id: "a1".to_string(),
        },
        Operation::DuplicateAutomation {
            automation_id: "a1".to_string(),
        },
        Operation::DuplicateTemplate {
            body: json!({ "docId": "tmpl" }),
        },
        Operation::CreateAutomation { body: Value::Null },
    ];

    let client = create_test_client(&server.uri());
    let outputs = execute_operations(&client, operations, false).await.unwrap();

    let results: Vec<Value> = outputs.into_iter().map(|o| o.json).collect();
    assert_eq!(
        results,
        vec![
            json!({ "id": "a1", "title": "Invoice" }),
            json!({ "updated": true }),
            Value::Null,
            json!({ "id": "a2" }),
            json!("copied"),
            json!({ "id": "a3" }),
        ]
    );
}

#[tokio::test]
async fn test_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/automations"))
        .and(header("authorization", "Bearer good-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/automations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" })))
        .mount(&server)
        .await;

    let good = docsautomator_node::DocsAutomatorClient::new("good-key").with_base_url(server.uri());
    assert!(good.test_credentials().await.is_ok());

    let bad = create_test_client(&server.uri());
    let err = bad.test_credentials().await.unwrap_err();
    assert!(matches!(
        err,
        DocsAutomatorError::ApiError {
            status_code: 401,
            ..
        }
    ));
}
