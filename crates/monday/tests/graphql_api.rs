//! Integration tests for the GraphQL client and column accessor against a
//! fake monday endpoint.

use std::time::Duration;

use assert_matches::assert_matches;
use colcalc_monday::accessor::MondayColumnAccessor;
use colcalc_monday::{ColumnAccessor, MondayApiError, MondayClientFactory, SubscriptionAccessor};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const TOKEN: &str = "short-lived-token";

fn factory(server: &MockServer) -> MondayClientFactory {
    MondayClientFactory::new(
        format!("{}/v2", server.uri()),
        "2024-04",
        Duration::from_secs(5),
    )
    .expect("client builds")
}

fn accessor(server: &MockServer) -> MondayColumnAccessor {
    MondayColumnAccessor::new(factory(server).client_for(TOKEN))
}

fn data(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": body, "account_id": 1 }))
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_sends_token_and_api_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2"))
        .and(header("authorization", TOKEN))
        .and(header("api-version", "2024-04"))
        .respond_with(data(json!({ "me": { "id": "1" } })))
        .expect(1)
        .mount(&server)
        .await;

    let result: Value = factory(&server)
        .client_for(TOKEN)
        .execute("query { me { id } }", json!({}))
        .await
        .unwrap();
    assert_eq!(result["me"]["id"], "1");
}

#[tokio::test]
async fn graphql_errors_become_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Field 'nope' doesn't exist" }]
        })))
        .mount(&server)
        .await;

    let result = factory(&server)
        .client_for(TOKEN)
        .execute::<Value>("query { nope }", json!({}))
        .await;
    assert_matches!(result, Err(MondayApiError::GraphQl(messages)) if messages.len() == 1);
}

#[tokio::test]
async fn http_failure_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Not Authenticated"))
        .mount(&server)
        .await;

    let result = factory(&server)
        .client_for(TOKEN)
        .execute::<Value>("query { me { id } }", json!({}))
        .await;
    assert_matches!(result, Err(MondayApiError::ApiError { status: 401, .. }));
}

// ---------------------------------------------------------------------------
// Column reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn number_read_prefers_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "itemId": ["11"], "columnId": ["numbers"] } })))
        .respond_with(data(json!({
            "items": [{ "column_values": [
                { "id": "numbers", "text": "42", "type": "numbers", "value": "{\"value\":\"99\"}" }
            ] }]
        })))
        .mount(&server)
        .await;

    assert_eq!(accessor(&server).read_column_as_number("11", "numbers").await, Some(42.0));
}

#[tokio::test]
async fn number_read_unwraps_json_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data(json!({
            "items": [{ "column_values": [
                { "id": "numbers", "text": null, "value": "{\"value\":\"7\"}" }
            ] }]
        })))
        .mount(&server)
        .await;

    assert_eq!(accessor(&server).read_column_as_number("11", "numbers").await, Some(7.0));
}

#[tokio::test]
async fn missing_item_reads_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data(json!({ "items": [] })))
        .mount(&server)
        .await;

    let accessor = accessor(&server);
    assert_eq!(accessor.read_column_as_number("11", "numbers").await, None);
    assert_eq!(accessor.read_column_raw("11", "numbers").await, None);
    assert_eq!(accessor.resolve_board_for_item("11").await, None);
}

#[tokio::test]
async fn transport_failure_reads_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(accessor(&server).read_column_as_number("11", "numbers").await, None);
}

#[tokio::test]
async fn board_lookup_and_all_columns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("board { id }"))
        .respond_with(data(json!({ "items": [{ "id": "11", "board": { "id": "500" } }] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("column { title }"))
        .respond_with(data(json!({
            "items": [{ "column_values": [
                { "id": "numbers", "text": "3", "type": "numbers", "value": "\"3\"", "column": { "title": "Qty" } }
            ] }]
        })))
        .mount(&server)
        .await;

    let accessor = accessor(&server);
    assert_eq!(accessor.resolve_board_for_item("11").await.as_deref(), Some("500"));

    let columns = accessor.read_all_columns("11").await.unwrap();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].title.as_deref(), Some("Qty"));
}

#[tokio::test]
async fn first_board_item_fetches_a_single_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("items_page(limit: 1) { items { id } }"))
        .and(body_partial_json(json!({ "variables": { "boardId": ["500"] } })))
        .respond_with(data(json!({
            "boards": [{ "items_page": { "items": [{ "id": "1" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        accessor(&server).first_item_on_board("500").await.as_deref(),
        Some("1")
    );
}

#[tokio::test]
async fn empty_board_has_no_first_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data(json!({ "boards": [{ "items_page": { "items": [] } }] })))
        .mount(&server)
        .await;

    assert_eq!(accessor(&server).first_item_on_board("500").await, None);
}

// ---------------------------------------------------------------------------
// Column writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn write_to_number_column_wraps_non_json_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("settings_str"))
        .respond_with(data(json!({
            "boards": [{ "columns": [{ "id": "numbers2", "title": "Result", "type": "numbers" }] }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("change_column_value"))
        .and(body_partial_json(json!({ "variables": { "value": "{\"value\":\"n/a\"}" } })))
        .respond_with(data(json!({ "change_column_value": { "id": "11" } })))
        .expect(1)
        .mount(&server)
        .await;

    let confirmation = accessor(&server)
        .write_column("500", "11", "numbers2", "n/a")
        .await
        .unwrap();
    assert_eq!(confirmation.id, "11");
}

#[tokio::test]
async fn write_numeric_result_is_sent_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("settings_str"))
        .respond_with(data(json!({
            "boards": [{ "columns": [{ "id": "numbers2", "type": "numbers" }] }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("change_column_value"))
        .and(body_partial_json(json!({ "variables": { "value": "12.5" } })))
        .respond_with(data(json!({ "change_column_value": { "id": "11" } })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(accessor(&server)
        .write_column("500", "11", "numbers2", "12.5")
        .await
        .is_some());
}

#[tokio::test]
async fn failed_write_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error_message": "Complexity budget exhausted"
        })))
        .mount(&server)
        .await;

    assert!(accessor(&server)
        .write_column("500", "11", "numbers2", "1")
        .await
        .is_none());
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_and_list_subscriptions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("create_webhook"))
        .and(body_partial_json(json!({ "variables": { "boardId": "500", "config": { "columnId": "numbers" } } })))
        .respond_with(data(json!({ "create_webhook": { "id": "9001" } })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("webhooks {"))
        .respond_with(data(json!({
            "webhooks": [{ "id": "9001", "board_id": 500, "event": "change_column_value", "config": "{}" }]
        })))
        .mount(&server)
        .await;

    let accessor = accessor(&server);
    let id = accessor
        .create_subscription(
            "https://example.com/webhook",
            "change_column_value",
            Some("500"),
            Some("numbers"),
        )
        .await;
    assert_eq!(id.as_deref(), Some("9001"));

    let hooks = accessor.list_subscriptions().await.unwrap();
    assert_eq!(hooks[0].board_id.as_deref(), Some("500"));
}

#[tokio::test]
async fn delete_rejects_non_numeric_id_without_calling_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data(json!({ "delete_webhook": { "id": "1" } })))
        .expect(0)
        .mount(&server)
        .await;

    assert!(!accessor(&server).delete_subscription("abc").await);
}

#[tokio::test]
async fn delete_numeric_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "id": 9001 } })))
        .respond_with(data(json!({ "delete_webhook": { "id": "9001" } })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(accessor(&server).delete_subscription("9001").await);
}
