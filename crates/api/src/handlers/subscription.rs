//! Handlers for webhook subscription management.
//!
//! Thin pass-through to the platform; failures surface as 500.

use axum::extract::State;
use axum::Json;
use colcalc_core::types::flexible_id;
use colcalc_monday::models::Webhook;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::session::Session;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::Acknowledgement;
use crate::state::AppState;

/// Request body for `POST /subscribe`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[validate(url)]
    pub webhook_url: String,
    #[validate(length(min = 1))]
    pub event: String,
    #[serde(default, deserialize_with = "flexible_id")]
    pub board_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub column_id: Option<String>,
}

/// Request body for `POST /unsubscribe`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    #[serde(default, deserialize_with = "flexible_id")]
    pub subscription_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub success: bool,
    pub subscription_id: String,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionsResponse {
    pub subscriptions: Vec<Webhook>,
}

/// POST /subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    session: Session,
    AppJson(input): AppJson<SubscribeRequest>,
) -> AppResult<Json<SubscribeResponse>> {
    input.validate().map_err(|e| {
        let mut fields: Vec<_> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::BadRequest(format!("Invalid subscription request: {}", fields.join(", ")))
    })?;

    let subscriptions = state.accessors.subscriptions_for(session.platform_token()?);
    let subscription_id = subscriptions
        .create_subscription(
            &input.webhook_url,
            &input.event,
            input.board_id.as_deref(),
            input.column_id.as_deref(),
        )
        .await
        .ok_or_else(|| AppError::InternalError("Failed to create webhook subscription".into()))?;

    Ok(Json(SubscribeResponse {
        success: true,
        subscription_id,
    }))
}

/// POST /unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    session: Session,
    AppJson(input): AppJson<UnsubscribeRequest>,
) -> AppResult<Json<Acknowledgement>> {
    let subscription_id = input
        .subscription_id
        .ok_or_else(|| AppError::BadRequest("subscriptionId is required".into()))?;

    let subscriptions = state.accessors.subscriptions_for(session.platform_token()?);
    if !subscriptions.delete_subscription(&subscription_id).await {
        return Err(AppError::InternalError(format!(
            "Failed to delete webhook subscription {subscription_id}"
        )));
    }
    Ok(Json(Acknowledgement::ok()))
}

/// GET /subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<SubscriptionsResponse>> {
    let subscriptions = state
        .accessors
        .subscriptions_for(session.platform_token()?)
        .list_subscriptions()
        .await
        .ok_or_else(|| AppError::InternalError("Failed to list webhook subscriptions".into()))?;
    Ok(Json(SubscriptionsResponse { subscriptions }))
}
