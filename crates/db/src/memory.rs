//! Process-local calculation store.
//!
//! Selected with `CALCULATION_STORE=memory` for local development without
//! Postgres. Contents are lost on restart.

use std::cmp::Reverse;

use async_trait::async_trait;
use colcalc_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::calculation::{Calculation, CreateCalculation};
use crate::store::CalculationStore;

#[derive(Default)]
struct Inner {
    rows: Vec<Calculation>,
    next_id: DbId,
}

/// In-memory [`CalculationStore`] with the same ordering rules as the
/// Postgres store: newest `timestamp` first, ties by descending id.
#[derive(Default)]
pub struct MemoryCalculationStore {
    inner: RwLock<Inner>,
}

impl MemoryCalculationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Rows matching `filter`, newest first, after skipping `offset` and
    /// taking at most `limit`.
    async fn select<F>(&self, filter: F, limit: i64, offset: i64) -> Vec<Calculation>
    where
        F: Fn(&Calculation) -> bool,
    {
        let inner = self.inner.read().await;
        let mut rows: Vec<Calculation> = inner.rows.iter().filter(|r| filter(r)).cloned().collect();
        rows.sort_by_key(|r| Reverse((r.timestamp, r.id)));
        rows.into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect()
    }
}

fn account_matches(row: &Calculation, account_id: Option<&str>) -> bool {
    account_id.map_or(true, |a| row.account_id.as_deref() == Some(a))
}

#[async_trait]
impl CalculationStore for MemoryCalculationStore {
    async fn insert(&self, input: &CreateCalculation) -> Result<Calculation, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let row = Calculation {
            id: inner.next_id,
            item_id: input.item_id.clone(),
            board_id: input.board_id.clone(),
            source_column_id: input.source_column_id.clone(),
            source_value: input.source_value,
            factor_column_id: input.factor_column_id.clone(),
            factor_value: input.factor_value,
            target_column_id: input.target_column_id.clone(),
            result: input.result,
            operation: input.operation.clone(),
            account_id: input.account_id.clone(),
            timestamp: input.timestamp,
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn list_by_item(
        &self,
        item_id: &str,
        limit: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        Ok(self.select(|r| r.item_id == item_id, limit, 0).await)
    }

    async fn list_by_board(
        &self,
        board_id: &str,
        limit: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        Ok(self.select(|r| r.board_id == board_id, limit, 0).await)
    }

    async fn list_page(
        &self,
        account_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        Ok(self
            .select(|r| account_matches(r, account_id), limit, offset)
            .await)
    }

    async fn count(&self, account_id: Option<&str>) -> Result<i64, sqlx::Error> {
        let inner = self.inner.read().await;
        let n = inner
            .rows
            .iter()
            .filter(|r| account_matches(r, account_id))
            .count();
        Ok(n as i64)
    }
}
