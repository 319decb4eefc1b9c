//! Storage seam for the calculation log.

use async_trait::async_trait;

use crate::models::calculation::{Calculation, CreateCalculation};
use crate::repositories::CalculationRepo;
use crate::DbPool;

/// Append-only calculation storage.
///
/// Implementations surface failures as [`sqlx::Error`]; deciding whether a
/// failure matters is left to the caller.
#[async_trait]
pub trait CalculationStore: Send + Sync {
    async fn insert(&self, input: &CreateCalculation) -> Result<Calculation, sqlx::Error>;

    async fn list_by_item(&self, item_id: &str, limit: i64)
        -> Result<Vec<Calculation>, sqlx::Error>;

    async fn list_by_board(
        &self,
        board_id: &str,
        limit: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error>;

    async fn list_page(
        &self,
        account_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error>;

    async fn count(&self, account_id: Option<&str>) -> Result<i64, sqlx::Error>;
}

/// Postgres-backed store delegating to [`CalculationRepo`].
#[derive(Clone)]
pub struct PgCalculationStore {
    pool: DbPool,
}

impl PgCalculationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CalculationStore for PgCalculationStore {
    async fn insert(&self, input: &CreateCalculation) -> Result<Calculation, sqlx::Error> {
        CalculationRepo::create(&self.pool, input).await
    }

    async fn list_by_item(
        &self,
        item_id: &str,
        limit: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        CalculationRepo::list_by_item(&self.pool, item_id, limit).await
    }

    async fn list_by_board(
        &self,
        board_id: &str,
        limit: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        CalculationRepo::list_by_board(&self.pool, board_id, limit).await
    }

    async fn list_page(
        &self,
        account_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        CalculationRepo::list_page(&self.pool, account_id, limit, offset).await
    }

    async fn count(&self, account_id: Option<&str>) -> Result<i64, sqlx::Error> {
        CalculationRepo::count(&self.pool, account_id).await
    }
}
