//! Recipe-editor callbacks: the text transformation action, its option
//! list, and the item trigger.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use colcalc_core::transform::{TransformationType, TRANSFORMATION_OPTIONS};
use colcalc_core::types::flexible_id;
use colcalc_monday::models::ColumnValue;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::session::Session;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// `{ "payload": { "inputFields": {..} } }` envelope of recipe callbacks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest<T> {
    pub payload: RecipePayload<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload<T> {
    pub input_fields: T,
}

/// Selected entry of a remote list field.
#[derive(Debug, Deserialize)]
pub struct ListSelection {
    pub value: Option<String>,
}

/// Input fields of the text transformation action.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformFields {
    #[serde(default, deserialize_with = "flexible_id")]
    pub board_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub item_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub source_column_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub target_column_id: Option<String>,
    #[serde(default)]
    pub transformation_type: Option<ListSelection>,
}

/// Input fields of the item trigger.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerFields {
    #[serde(default, deserialize_with = "flexible_id")]
    pub item_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemColumnsResponse {
    pub board_id: String,
    pub item_id: String,
    pub column_values: Vec<ColumnValue>,
}

fn require(value: Option<String>, name: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::BadRequest(format!("{name} is required")))
}

/// POST /monday/execute_action
///
/// Copies the source column into the target column, upper- or lower-cased.
/// An empty source column is not an error.
pub async fn execute_action(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<RecipeRequest<TransformFields>>,
) -> AppResult<Json<serde_json::Value>> {
    let columns = state.accessors.columns_for(session.platform_token()?);
    let fields = request.payload.input_fields;
    let item_id = require(fields.item_id, "itemId")?;
    let source_column_id = require(fields.source_column_id, "sourceColumnId")?;

    let Some(text) = columns.read_column_raw(&item_id, &source_column_id).await else {
        tracing::debug!(item_id = %item_id, source_column_id = %source_column_id, "Source column is empty");
        return Ok(Json(json!({})));
    };

    let board_id = require(fields.board_id, "boardId")?;
    let target_column_id = require(fields.target_column_id, "targetColumnId")?;
    let transformation = TransformationType::from_wire(
        fields
            .transformation_type
            .as_ref()
            .and_then(|t| t.value.as_deref()),
    );

    columns
        .write_column(&board_id, &item_id, &target_column_id, &transformation.apply(&text))
        .await
        .ok_or_else(|| AppError::InternalError("Failed to write transformed text".into()))?;

    tracing::info!(item_id = %item_id, ?transformation, "Text transformation written");
    Ok(Json(json!({})))
}

/// POST /monday/get_remote_list_options
pub async fn remote_list_options(_session: Session) -> impl IntoResponse {
    Json(TRANSFORMATION_OPTIONS)
}

/// POST /trigger
///
/// Resolves the item's board and returns every column value.
pub async fn item_trigger(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<RecipeRequest<TriggerFields>>,
) -> AppResult<Response> {
    let columns = state.accessors.columns_for(session.platform_token()?);
    let item_id = require(request.payload.input_fields.item_id, "itemId")?;

    let board_id = columns
        .resolve_board_for_item(&item_id)
        .await
        .ok_or_else(|| AppError::BadRequest("Could not find board ID for the item".into()))?;

    let column_values = match columns.read_all_columns(&item_id).await {
        Some(values) if !values.is_empty() => values,
        _ => {
            return Ok(
                Json(json!({ "message": "No column values found for this item" })).into_response(),
            );
        }
    };

    Ok(Json(ItemColumnsResponse {
        board_id,
        item_id,
        column_values,
    })
    .into_response())
}
