//! Repository for the `calculations` table.

use sqlx::PgPool;

use crate::models::calculation::{Calculation, CreateCalculation};

/// Column list for `calculations` queries.
const COLUMNS: &str = "\
    id, item_id, board_id, source_column_id, source_value, \
    factor_column_id, factor_value, target_column_id, result, \
    operation, account_id, created_at";

/// Append-only access to the calculation log. Rows are never updated or
/// deleted.
pub struct CalculationRepo;

impl CalculationRepo {
    /// Insert a calculation row and return it with its generated id.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCalculation,
    ) -> Result<Calculation, sqlx::Error> {
        let query = format!(
            "INSERT INTO calculations \
                (item_id, board_id, source_column_id, source_value, \
                 factor_column_id, factor_value, target_column_id, result, \
                 operation, account_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Calculation>(&query)
            .bind(&input.item_id)
            .bind(&input.board_id)
            .bind(&input.source_column_id)
            .bind(input.source_value)
            .bind(&input.factor_column_id)
            .bind(input.factor_value)
            .bind(&input.target_column_id)
            .bind(input.result)
            .bind(&input.operation)
            .bind(&input.account_id)
            .bind(input.timestamp)
            .fetch_one(pool)
            .await
    }

    /// Most recent calculations for one item, newest first.
    pub async fn list_by_item(
        pool: &PgPool,
        item_id: &str,
        limit: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calculations \
             WHERE item_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Calculation>(&query)
            .bind(item_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recent calculations for one board, newest first.
    pub async fn list_by_board(
        pool: &PgPool,
        board_id: &str,
        limit: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calculations \
             WHERE board_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Calculation>(&query)
            .bind(board_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// One offset page across all calculations, optionally scoped to an
    /// account. `None` returns every account's rows.
    pub async fn list_page(
        pool: &PgPool,
        account_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calculations \
             WHERE ($1::TEXT IS NULL OR account_id = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Calculation>(&query)
            .bind(account_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count calculations matching the same filter as [`Self::list_page`].
    pub async fn count(pool: &PgPool, account_id: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM calculations \
             WHERE ($1::TEXT IS NULL OR account_id = $1)",
        )
        .bind(account_id)
        .fetch_one(pool)
        .await
    }
}
