use axum::routing::post;
use axum::Router;

use crate::handlers::integration;
use crate::state::AppState;

/// Recipe action callbacks, mounted under `/monday` only.
///
/// ```text
/// /execute_action                 text transformation (POST)
/// /get_remote_list_options        transformation choices (POST)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/execute_action", post(integration::execute_action))
        .route(
            "/get_remote_list_options",
            post(integration::remote_list_options),
        )
}

/// Item trigger, mounted with the other API routes.
pub fn trigger_router() -> Router<AppState> {
    Router::new().route("/trigger", post(integration::item_trigger))
}
