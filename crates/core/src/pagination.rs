//! Limit and page clamping for history queries.

/// Default number of records returned for a single item's history.
pub const ITEM_HISTORY_LIMIT: i64 = 20;

/// Default number of records returned for a board's history.
pub const BOARD_HISTORY_LIMIT: i64 = 50;

/// Default page size for the global listing.
pub const LIST_ALL_LIMIT: i64 = 100;

/// Upper bound on any requested page size.
pub const MAX_LIMIT: i64 = 500;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided 1-based page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Rows to skip for a 1-based `page` of `limit` rows.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit)
}
