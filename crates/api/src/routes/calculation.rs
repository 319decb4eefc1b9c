use axum::routing::{get, post};
use axum::Router;

use crate::handlers::calculation;
use crate::state::AppState;

/// Multiplication and history routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/execute-multiplication",
            post(calculation::execute_multiplication),
        )
        .route("/calculate", post(calculation::execute_multiplication))
        .route(
            "/item/{item_id}/calculations",
            get(calculation::item_history),
        )
        .route(
            "/board/{board_id}/calculations",
            get(calculation::board_history),
        )
        .route("/calculations", get(calculation::list_calculations))
}
