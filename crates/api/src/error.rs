use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use colcalc_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ message, code, fields? }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `colcalc_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation { message, .. } => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
                }
                CoreError::InvalidNumbers { .. } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_NUMBERS",
                    "Could not read valid numbers from the source or factor column".to_string(),
                ),
                CoreError::Unauthorized(reason) => {
                    tracing::debug!(reason = %reason, "Unauthorized request");
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized".to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let mut body = json!({
            "message": message,
            "code": code,
        });
        if let AppError::Core(core) = &self {
            if !core.fields().is_empty() {
                body["fields"] = json!(core.fields());
            }
        }

        (status, axum::Json(body)).into_response()
    }
}
