//! Handlers for multiplication and calculation history.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use colcalc_core::payload::MultiplicationPayload;
use serde_json::Value;

use crate::auth::session::Session;
use crate::calculation::{MultiplicationOrchestrator, MultiplicationOutcome};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::{HistoryParams, ListAllParams};
use crate::response::{Acknowledgement, BoardHistoryResponse, ItemHistoryResponse};
use crate::state::AppState;

/// POST /execute-multiplication (alias POST /calculate)
///
/// Accepts automation trigger, action, and flat item-view bodies.
pub async fn execute_multiplication(
    State(state): State<AppState>,
    session: Session,
    AppJson(body): AppJson<Value>,
) -> AppResult<Response> {
    let payload = MultiplicationPayload::from_json(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    let orchestrator =
        MultiplicationOrchestrator::new(state.accessors.clone(), state.calculation_log.clone());

    let response = match orchestrator.execute(&session, payload).await? {
        MultiplicationOutcome::Acknowledged => Json(Acknowledgement::ok()).into_response(),
        MultiplicationOutcome::Computed(result) => Json(result).into_response(),
    };
    Ok(response)
}

/// GET /item/{item_id}/calculations
pub async fn item_history(
    State(state): State<AppState>,
    _session: Session,
    Path(item_id): Path<String>,
    AppQuery(params): AppQuery<HistoryParams>,
) -> Json<ItemHistoryResponse> {
    let history = state.calculation_log.list_by_item(&item_id, params.limit).await;
    Json(ItemHistoryResponse {
        item_id,
        count: history.len(),
        history,
    })
}

/// GET /board/{board_id}/calculations
pub async fn board_history(
    State(state): State<AppState>,
    _session: Session,
    Path(board_id): Path<String>,
    AppQuery(params): AppQuery<HistoryParams>,
) -> Json<BoardHistoryResponse> {
    let history = state.calculation_log.list_by_board(&board_id, params.limit).await;
    Json(BoardHistoryResponse {
        board_id,
        count: history.len(),
        history,
    })
}

/// GET /calculations?page=&limit=&accountId=
///
/// `accountId` falls back to the session's account. With neither, every
/// account's records are listed.
pub async fn list_calculations(
    State(state): State<AppState>,
    session: Session,
    AppQuery(params): AppQuery<ListAllParams>,
) -> impl IntoResponse {
    let account_id = params
        .account_id
        .filter(|a| !a.is_empty())
        .or(session.account_id);
    Json(
        state
            .calculation_log
            .list_all(params.limit, params.page, account_id.as_deref())
            .await,
    )
}
