use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: &'static str,
}

/// GET /health -- liveness only; storage and platform are not checked.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        message: "Healthy",
    })
}

/// Mount health check routes at `/` and `/health`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
}
