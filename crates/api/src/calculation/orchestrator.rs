//! Column multiplication workflow.
//!
//! Normalize the request, fill in missing identifiers from the platform,
//! read both operands, write the product back, and record it.

use std::sync::Arc;

use colcalc_core::error::CoreError;
use colcalc_core::payload::{InputFields, MultiplicationPayload, PayloadOrigin};
use colcalc_monday::{AccessorFactory, ColumnAccessor};
use serde::Serialize;

use crate::auth::session::Session;
use crate::calculation::log::{CalculationEntry, CalculationLog};

/// Completed multiplication as reported to action callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplicationResult {
    pub success: bool,
    pub result: f64,
    pub board_id: String,
    pub item_id: String,
    pub source_column_id: String,
    pub factor_column_id: String,
    pub target_column_id: String,
    pub source_value: f64,
    pub factor_value: f64,
}

/// What the caller is told after a successful run.
#[derive(Debug, Clone, PartialEq)]
pub enum MultiplicationOutcome {
    /// Automation triggers only need an acknowledgement.
    Acknowledged,
    /// Actions get the full result.
    Computed(MultiplicationResult),
}

/// Identifiers after every fallback has been applied.
struct ResolvedTarget {
    item_id: String,
    board_id: String,
    source_column_id: String,
    factor_column_id: String,
    target_column_id: String,
}

/// Runs one multiplication on behalf of a session.
pub struct MultiplicationOrchestrator {
    accessors: Arc<dyn AccessorFactory>,
    log: CalculationLog,
}

impl MultiplicationOrchestrator {
    pub fn new(accessors: Arc<dyn AccessorFactory>, log: CalculationLog) -> Self {
        Self { accessors, log }
    }

    pub async fn execute(
        &self,
        session: &Session,
        payload: MultiplicationPayload,
    ) -> Result<MultiplicationOutcome, CoreError> {
        let token = session.platform_token()?;
        let columns = self.accessors.columns_for(token);

        let target = payload.into_target();
        let origin = target.origin;
        let resolved = resolve_target(columns.as_ref(), target.fields).await?;

        let source_value = columns
            .read_column_as_number(&resolved.item_id, &resolved.source_column_id)
            .await;
        let factor_value = columns
            .read_column_as_number(&resolved.item_id, &resolved.factor_column_id)
            .await;

        let (source_value, factor_value) = match (source_value, factor_value) {
            (Some(source), Some(factor)) => (source, factor),
            (source, factor) => {
                let mut fields = Vec::new();
                if source.is_none() {
                    fields.push("sourceValue");
                }
                if factor.is_none() {
                    fields.push("factorValue");
                }
                tracing::warn!(
                    item_id = %resolved.item_id,
                    ?fields,
                    "Column values are not numbers"
                );
                return Err(CoreError::InvalidNumbers { fields });
            }
        };

        let result = source_value * factor_value;

        columns
            .write_column(
                &resolved.board_id,
                &resolved.item_id,
                &resolved.target_column_id,
                &format_result(result),
            )
            .await
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "Failed to write result to column {} of item {}",
                    resolved.target_column_id, resolved.item_id
                ))
            })?;

        tracing::info!(
            item_id = %resolved.item_id,
            board_id = %resolved.board_id,
            source_value,
            factor_value,
            result,
            "Multiplication written"
        );

        // Best effort: the column already holds the result.
        self.log
            .append(CalculationEntry {
                item_id: resolved.item_id.clone(),
                board_id: resolved.board_id.clone(),
                source_column_id: resolved.source_column_id.clone(),
                source_value,
                factor_column_id: resolved.factor_column_id.clone(),
                factor_value,
                target_column_id: resolved.target_column_id.clone(),
                result,
                account_id: session.account_id.clone(),
            })
            .await;

        Ok(match origin {
            PayloadOrigin::AutomationTrigger => MultiplicationOutcome::Acknowledged,
            PayloadOrigin::Action => MultiplicationOutcome::Computed(MultiplicationResult {
                success: true,
                result,
                board_id: resolved.board_id,
                item_id: resolved.item_id,
                source_column_id: resolved.source_column_id,
                factor_column_id: resolved.factor_column_id,
                target_column_id: resolved.target_column_id,
                source_value,
                factor_value,
            }),
        })
    }
}

/// Apply the item, board, and target column fallbacks, then require the
/// rest.
async fn resolve_target(
    columns: &dyn ColumnAccessor,
    fields: InputFields,
) -> Result<ResolvedTarget, CoreError> {
    let InputFields {
        mut board_id,
        mut item_id,
        source_column_id,
        factor_column_id,
        target_column_id,
    } = fields;

    if item_id.is_none() {
        if let Some(board) = &board_id {
            item_id = columns.first_item_on_board(board).await;
            tracing::debug!(board_id = %board, item_id = ?item_id, "Defaulted to first item on board");
        }
    }

    if board_id.is_none() {
        if let Some(item) = &item_id {
            board_id = columns.resolve_board_for_item(item).await;
        }
    }

    match (item_id, board_id, source_column_id, factor_column_id) {
        (Some(item_id), Some(board_id), Some(source_column_id), Some(factor_column_id)) => {
            Ok(ResolvedTarget {
                // Result overwrites the source column when no target is given.
                target_column_id: target_column_id.unwrap_or_else(|| source_column_id.clone()),
                item_id,
                board_id,
                source_column_id,
                factor_column_id,
            })
        }
        (item, board, source, factor) => {
            let missing = [
                ("itemId", item.is_none()),
                ("boardId", board.is_none()),
                ("sourceColumnId", source.is_none()),
                ("factorColumnId", factor.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            Err(CoreError::missing_fields(missing))
        }
    }
}

/// Text written to the target column: integral values without a decimal
/// point, non-finite values spelled out.
fn format_result(result: f64) -> String {
    if result.is_nan() {
        "NaN".to_string()
    } else if result.is_infinite() {
        if result > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        result.to_string()
    }
}
