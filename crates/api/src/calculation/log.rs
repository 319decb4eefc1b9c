//! Fail-soft calculation history.
//!
//! Storage failures never reach the caller: appends report `false`, reads
//! come back empty. Every failure is logged.

use std::sync::Arc;

use colcalc_core::pagination::{
    clamp_limit, clamp_page, page_offset, BOARD_HISTORY_LIMIT, ITEM_HISTORY_LIMIT,
    LIST_ALL_LIMIT, MAX_LIMIT,
};
use colcalc_db::models::calculation::{
    Calculation, CalculationPage, CreateCalculation, DEFAULT_OPERATION,
};
use colcalc_db::CalculationStore;

/// A computed multiplication, before it is timestamped.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationEntry {
    pub item_id: String,
    pub board_id: String,
    pub source_column_id: String,
    pub source_value: f64,
    pub factor_column_id: String,
    pub factor_value: f64,
    pub target_column_id: String,
    pub result: f64,
    pub account_id: Option<String>,
}

/// History of computed multiplications over a [`CalculationStore`].
#[derive(Clone)]
pub struct CalculationLog {
    store: Arc<dyn CalculationStore>,
}

impl CalculationLog {
    pub fn new(store: Arc<dyn CalculationStore>) -> Self {
        Self { store }
    }

    /// Stamp `entry` with the current time and persist it.
    pub async fn append(&self, entry: CalculationEntry) -> bool {
        let input = CreateCalculation {
            item_id: entry.item_id,
            board_id: entry.board_id,
            source_column_id: entry.source_column_id,
            source_value: entry.source_value,
            factor_column_id: entry.factor_column_id,
            factor_value: entry.factor_value,
            target_column_id: entry.target_column_id,
            result: entry.result,
            operation: DEFAULT_OPERATION.to_string(),
            account_id: entry.account_id,
            timestamp: chrono::Utc::now(),
        };

        match self.store.insert(&input).await {
            Ok(row) => {
                tracing::debug!(
                    calculation_id = row.id,
                    item_id = %row.item_id,
                    result = row.result,
                    "Calculation recorded"
                );
                true
            }
            Err(e) => {
                tracing::error!(item_id = %input.item_id, error = %e, "Failed to record calculation");
                false
            }
        }
    }

    /// Newest-first history of one item (default 20 rows).
    pub async fn list_by_item(&self, item_id: &str, limit: Option<i64>) -> Vec<Calculation> {
        let limit = clamp_limit(limit, ITEM_HISTORY_LIMIT, MAX_LIMIT);
        self.store
            .list_by_item(item_id, limit)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(item_id, error = %e, "Failed to load item history");
                Vec::new()
            })
    }

    /// Newest-first history of one board (default 50 rows).
    pub async fn list_by_board(&self, board_id: &str, limit: Option<i64>) -> Vec<Calculation> {
        let limit = clamp_limit(limit, BOARD_HISTORY_LIMIT, MAX_LIMIT);
        self.store
            .list_by_board(board_id, limit)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(board_id, error = %e, "Failed to load board history");
                Vec::new()
            })
    }

    /// One page of all records, optionally scoped to an account.
    ///
    /// Without `account_id` every tenant's records are listed.
    pub async fn list_all(
        &self,
        limit: Option<i64>,
        page: Option<i64>,
        account_id: Option<&str>,
    ) -> CalculationPage {
        let limit = clamp_limit(limit, LIST_ALL_LIMIT, MAX_LIMIT);
        let page = clamp_page(page);
        let offset = page_offset(page, limit);

        let rows = self.store.list_page(account_id, limit, offset).await;
        let total = self.store.count(account_id).await;

        match (rows, total) {
            (Ok(data), Ok(total)) => CalculationPage {
                data,
                total,
                page,
                limit,
            },
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(account_id, page, limit, error = %e, "Failed to list calculations");
                CalculationPage {
                    data: Vec::new(),
                    total: 0,
                    page,
                    limit,
                }
            }
        }
    }
}
