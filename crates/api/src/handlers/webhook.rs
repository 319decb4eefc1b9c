//! Inbound platform webhook.
//!
//! Never fails: the platform retries non-2xx deliveries, so every body,
//! including a malformed one, is acknowledged.

use axum::body::Bytes;
use axum::response::{IntoResponse, Response};
use axum::Json;
use colcalc_core::types::id_from_value;
use serde_json::{json, Value};

use crate::response::Acknowledgement;

/// POST /webhook
///
/// Echoes `{ challenge }` during URL verification; otherwise logs the event.
pub async fn receive_webhook(body: Bytes) -> Response {
    let parsed = match serde_json::from_slice::<Value>(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, bytes = body.len(), "Ignoring malformed webhook body");
            return Json(Acknowledgement::ok()).into_response();
        }
    };

    if let Some(challenge) = parsed.get("challenge") {
        tracing::info!("Answering webhook challenge");
        return Json(json!({ "challenge": challenge })).into_response();
    }

    let event = parsed.get("event").unwrap_or(&Value::Null);
    let field = |key: &str| event.get(key).and_then(id_from_value);
    let event_type = event.get("type").and_then(|t| t.as_str());
    tracing::info!(
        event_type = ?event_type,
        board_id = ?field("boardId"),
        item_id = ?field("pulseId"),
        column_id = ?field("columnId"),
        "Webhook event received"
    );

    Json(Acknowledgement::ok()).into_response()
}
