//! Session extractor for Axum handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use colcalc_core::error::CoreError;
use serde::Deserialize;

use crate::auth::session::{verify_session_token, Session};
use crate::error::AppError;
use crate::state::AppState;

/// `?token=` fallback used by the item view, which cannot set headers on
/// plain links.
#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Session token from the `Authorization` header (raw or `Bearer <token>`),
/// else from the `token` query parameter.
fn session_token(parts: &Parts) -> Option<String> {
    let from_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    from_header.or_else(|| {
        Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.token)
            .filter(|t| !t.is_empty())
    })
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing session token".into()))
        })?;

        verify_session_token(&token, &state.config.session).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AppError::Core(CoreError::Unauthorized("Invalid or expired session token".into()))
        })
    }
}
