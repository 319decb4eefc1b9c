pub mod calculation;
pub mod health;
pub mod integration;
pub mod subscription;

use axum::Router;

use crate::state::AppState;

/// Build the session-protected route tree (mounted at `/` and `/monday`).
///
/// Route hierarchy:
///
/// ```text
/// /execute-multiplication                 multiply two columns (POST)
/// /calculate                              alias of the above (POST)
/// /item/{item_id}/calculations            item history (GET)
/// /board/{board_id}/calculations          board history (GET)
/// /calculations                           paged global listing (GET)
///
/// /subscribe                              create webhook (POST)
/// /unsubscribe                            delete webhook (POST)
/// /subscriptions                          list webhooks (GET)
/// /webhook                                inbound events, public (POST)
///
/// /trigger                                item columns for a recipe (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(calculation::router())
        .merge(subscription::router())
        .merge(integration::trigger_router())
}
