//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for per-item and per-board history.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// `?page=&limit=&accountId=` for the global listing.
///
/// Values are clamped by the calculation log.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAllParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub account_id: Option<String>,
}
