//! Fail-soft access to item columns and webhook subscriptions.
//!
//! Every method logs remote failures and returns `None` / `false` instead
//! of an error. Callers treat `None` as "value unavailable".

use std::sync::Arc;

use async_trait::async_trait;
use colcalc_core::numeric::parse_column_number;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::client::{MondayApiError, MondayClient, MondayClientFactory};
use crate::models::{
    BoardsData, ChangeColumnData, ColumnInfo, ColumnValue, CreateWebhookData,
    DeleteWebhookData, ItemsData, Webhook, WebhooksData, WriteConfirmation,
};
use crate::queries;

/// Item column reads and writes.
#[async_trait]
pub trait ColumnAccessor: Send + Sync {
    /// Raw stored value of one column, `None` if the item, column, or a
    /// non-empty value is missing.
    async fn read_column_raw(&self, item_id: &str, column_id: &str) -> Option<String>;

    /// Column value interpreted as a number (see
    /// [`colcalc_core::numeric::parse_column_number`]).
    async fn read_column_as_number(&self, item_id: &str, column_id: &str) -> Option<f64>;

    /// Write `value`, wrapping it for number columns.
    async fn write_column(
        &self,
        board_id: &str,
        item_id: &str,
        column_id: &str,
        value: &str,
    ) -> Option<WriteConfirmation>;

    async fn resolve_board_for_item(&self, item_id: &str) -> Option<String>;

    async fn read_all_columns(&self, item_id: &str) -> Option<Vec<ColumnValue>>;

    /// Id of the first item on a board in platform order.
    async fn first_item_on_board(&self, board_id: &str) -> Option<String>;
}

/// Webhook subscription management, passed straight through to the platform.
#[async_trait]
pub trait SubscriptionAccessor: Send + Sync {
    /// Register a webhook; returns the new subscription id.
    async fn create_subscription(
        &self,
        webhook_url: &str,
        event: &str,
        board_id: Option<&str>,
        column_id: Option<&str>,
    ) -> Option<String>;

    /// Remove a webhook. Ids that are not integers are rejected locally.
    async fn delete_subscription(&self, subscription_id: &str) -> bool;

    async fn list_subscriptions(&self) -> Option<Vec<Webhook>>;
}

/// Hands out accessors bound to one caller's short-lived token.
pub trait AccessorFactory: Send + Sync {
    fn columns_for(&self, token: &str) -> Arc<dyn ColumnAccessor>;

    fn subscriptions_for(&self, token: &str) -> Arc<dyn SubscriptionAccessor>;
}

// ---------------------------------------------------------------------------
// monday implementation
// ---------------------------------------------------------------------------

/// [`AccessorFactory`] producing [`MondayColumnAccessor`]s.
#[derive(Debug, Clone)]
pub struct MondayAccessorFactory {
    clients: MondayClientFactory,
}

impl MondayAccessorFactory {
    pub fn new(clients: MondayClientFactory) -> Self {
        Self { clients }
    }
}

impl AccessorFactory for MondayAccessorFactory {
    fn columns_for(&self, token: &str) -> Arc<dyn ColumnAccessor> {
        Arc::new(MondayColumnAccessor::new(self.clients.client_for(token)))
    }

    fn subscriptions_for(&self, token: &str) -> Arc<dyn SubscriptionAccessor> {
        Arc::new(MondayColumnAccessor::new(self.clients.client_for(token)))
    }
}

/// Column and subscription access over a token-bound [`MondayClient`].
#[derive(Debug, Clone)]
pub struct MondayColumnAccessor {
    client: MondayClient,
}

impl MondayColumnAccessor {
    pub fn new(client: MondayClient) -> Self {
        Self { client }
    }

    /// Execute a query, logging and discarding any error.
    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Option<T> {
        match self.client.execute::<T>(query, variables).await {
            Ok(data) => Some(data),
            Err(e) => {
                log_failure(operation, &e);
                None
            }
        }
    }

    /// First column value of the first item returned by `query`.
    async fn first_column_value(
        &self,
        operation: &'static str,
        query: &str,
        item_id: &str,
        column_id: &str,
    ) -> Option<ColumnValue> {
        let data: ItemsData = self
            .fetch(
                operation,
                query,
                json!({ "itemId": [item_id], "columnId": [column_id] }),
            )
            .await?;
        data.items
            .into_iter()
            .next()?
            .column_values?
            .into_iter()
            .next()
    }

    /// Column definition used to decide how a write is encoded.
    async fn column_info(&self, board_id: &str, column_id: &str) -> Option<ColumnInfo> {
        let data: BoardsData = self
            .fetch(
                "column_info",
                queries::COLUMN_INFO,
                json!({ "boardId": [board_id], "columnId": [column_id] }),
            )
            .await?;
        data.boards.into_iter().next()?.columns?.into_iter().next()
    }
}

fn log_failure(operation: &'static str, error: &MondayApiError) {
    match error {
        MondayApiError::GraphQl(_) | MondayApiError::MissingData => {
            tracing::warn!(operation, error = %error, "monday API call returned no usable data");
        }
        _ => {
            tracing::error!(operation, error = %error, "monday API call failed");
        }
    }
}

/// Encode `value` for a write to a column of the given definition.
///
/// Number columns receive `{"value":"<value>"}` unless `value` is already
/// valid JSON; every other column type gets the value verbatim.
pub fn format_column_write(column: Option<&ColumnInfo>, value: &str) -> String {
    match column {
        Some(info) if info.is_numeric() => {
            if serde_json::from_str::<Value>(value).is_ok() {
                value.to_string()
            } else {
                json!({ "value": value }).to_string()
            }
        }
        _ => value.to_string(),
    }
}

#[async_trait]
impl ColumnAccessor for MondayColumnAccessor {
    async fn read_column_raw(&self, item_id: &str, column_id: &str) -> Option<String> {
        self.first_column_value("read_column_raw", queries::COLUMN_VALUE, item_id, column_id)
            .await?
            .value
            .filter(|v| !v.is_empty())
    }

    async fn read_column_as_number(&self, item_id: &str, column_id: &str) -> Option<f64> {
        let column = self
            .first_column_value(
                "read_column_as_number",
                queries::COLUMN_VALUE_WITH_TEXT,
                item_id,
                column_id,
            )
            .await?;

        let parsed = parse_column_number(column.text.as_deref(), column.value.as_deref());
        if parsed.is_none() {
            tracing::warn!(
                item_id,
                column_id,
                text = ?column.text,
                value = ?column.value,
                "Could not parse number from column value"
            );
        }
        parsed
    }

    async fn write_column(
        &self,
        board_id: &str,
        item_id: &str,
        column_id: &str,
        value: &str,
    ) -> Option<WriteConfirmation> {
        let info = self.column_info(board_id, column_id).await;
        let formatted = format_column_write(info.as_ref(), value);

        let data: ChangeColumnData = self
            .fetch(
                "write_column",
                queries::CHANGE_COLUMN_VALUE,
                json!({
                    "boardId": board_id,
                    "itemId": item_id,
                    "columnId": column_id,
                    "value": formatted,
                }),
            )
            .await?;

        let confirmation = data.change_column_value;
        if confirmation.is_none() {
            tracing::warn!(board_id, item_id, column_id, "Column write was not acknowledged");
        }
        confirmation
    }

    async fn resolve_board_for_item(&self, item_id: &str) -> Option<String> {
        let data: ItemsData = self
            .fetch(
                "resolve_board_for_item",
                queries::ITEM_BOARD,
                json!({ "itemId": [item_id] }),
            )
            .await?;
        data.items.into_iter().next()?.board.map(|b| b.id)
    }

    async fn read_all_columns(&self, item_id: &str) -> Option<Vec<ColumnValue>> {
        let data: ItemsData = self
            .fetch(
                "read_all_columns",
                queries::ITEM_COLUMNS,
                json!({ "itemId": [item_id] }),
            )
            .await?;
        let columns = data.items.into_iter().next()?.column_values?;
        Some(columns.into_iter().map(ColumnValue::with_title).collect())
    }

    async fn first_item_on_board(&self, board_id: &str) -> Option<String> {
        let data: BoardsData = self
            .fetch(
                "first_item_on_board",
                queries::BOARD_FIRST_ITEM,
                json!({ "boardId": [board_id] }),
            )
            .await?;
        let item = data.boards.into_iter().next()?.items_page?.items.into_iter().next()?;
        Some(item.id)
    }
}

#[async_trait]
impl SubscriptionAccessor for MondayColumnAccessor {
    async fn create_subscription(
        &self,
        webhook_url: &str,
        event: &str,
        board_id: Option<&str>,
        column_id: Option<&str>,
    ) -> Option<String> {
        let mut config = serde_json::Map::new();
        if let Some(column_id) = column_id {
            config.insert("columnId".into(), json!(column_id));
        }
        let config = (!config.is_empty()).then(|| Value::Object(config));

        let (query, variables) = match board_id {
            Some(board_id) => (
                queries::CREATE_WEBHOOK,
                json!({ "boardId": board_id, "url": webhook_url, "event": event, "config": config }),
            ),
            None => (
                queries::CREATE_WEBHOOK_UNSCOPED,
                json!({ "url": webhook_url, "event": event, "config": config }),
            ),
        };

        let data: CreateWebhookData = self.fetch("create_subscription", query, variables).await?;
        let id = data.create_webhook.map(|w| w.id);
        match &id {
            Some(id) => tracing::info!(subscription_id = %id, event, "Webhook subscription created"),
            None => tracing::warn!(event, "Webhook creation returned no id"),
        }
        id
    }

    async fn delete_subscription(&self, subscription_id: &str) -> bool {
        let Ok(id) = subscription_id.trim().parse::<i64>() else {
            tracing::warn!(subscription_id, "Invalid subscription id format");
            return false;
        };

        let data: Option<DeleteWebhookData> = self
            .fetch("delete_subscription", queries::DELETE_WEBHOOK, json!({ "id": id }))
            .await;
        let deleted = data.and_then(|d| d.delete_webhook).is_some();
        if deleted {
            tracing::info!(subscription_id = id, "Webhook subscription deleted");
        }
        deleted
    }

    async fn list_subscriptions(&self) -> Option<Vec<Webhook>> {
        let data: WebhooksData = self
            .fetch("list_subscriptions", queries::LIST_WEBHOOKS, json!({}))
            .await?;
        Some(data.webhooks)
    }
}
