//! Shared response bodies for API handlers.

use colcalc_db::models::calculation::Calculation;
use serde::Serialize;

/// `{ "success": true }`, returned by acknowledgement-only endpoints.
#[derive(Debug, Serialize)]
pub struct Acknowledgement {
    pub success: bool,
}

impl Acknowledgement {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// History of a single item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemHistoryResponse {
    pub item_id: String,
    pub count: usize,
    pub history: Vec<Calculation>,
}

/// History of a whole board.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardHistoryResponse {
    pub board_id: String,
    pub count: usize,
    pub history: Vec<Calculation>,
}
