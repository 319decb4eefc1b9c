use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{subscription, webhook};
use crate::state::AppState;

/// Webhook subscription management and the inbound webhook.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscription::subscribe))
        .route("/unsubscribe", post(subscription::unsubscribe))
        .route("/subscriptions", get(subscription::list_subscriptions))
        .route("/webhook", post(webhook::receive_webhook))
}
