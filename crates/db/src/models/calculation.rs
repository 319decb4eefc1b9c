//! Calculation log models and DTOs.
//!
//! Rows serialize with camelCase keys (`itemId`, `sourceValue`, ...) because
//! the embedded item view reads them verbatim.

use colcalc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Operation name recorded when none is given.
pub const DEFAULT_OPERATION: &str = "multiplication";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `calculations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub id: DbId,
    pub item_id: String,
    pub board_id: String,
    pub source_column_id: String,
    pub source_value: f64,
    pub factor_column_id: String,
    pub factor_value: f64,
    pub target_column_id: String,
    pub result: f64,
    pub operation: String,
    pub account_id: Option<String>,
    #[sqlx(rename = "created_at")]
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for appending a calculation. `timestamp` is stamped by the caller
/// at write time.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCalculation {
    pub item_id: String,
    pub board_id: String,
    pub source_column_id: String,
    pub source_value: f64,
    pub factor_column_id: String,
    pub factor_value: f64,
    pub target_column_id: String,
    pub result: f64,
    pub operation: String,
    pub account_id: Option<String>,
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// One page of the global listing. `total` ignores paging.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationPage {
    pub data: Vec<Calculation>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
