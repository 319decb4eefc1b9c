//! Platform response shapes.

use colcalc_core::types::flexible_id;
use serde::{Deserialize, Serialize};

/// One column value of an item as returned by `column_values`.
///
/// Every field except `id` is optional because queries select different
/// subsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    /// Raw JSON-encoded value as stored by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Owning column, selected when the title is needed.
    #[serde(default, skip_serializing)]
    pub column: Option<ColumnTitle>,
}

impl ColumnValue {
    /// Copy the nested column title onto `title` when it is missing.
    pub fn with_title(mut self) -> Self {
        if self.title.is_none() {
            self.title = self.column.take().map(|c| c.title);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ColumnTitle {
    pub title: String,
}

/// A board column definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnInfo {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub settings_str: Option<String>,
}

impl ColumnInfo {
    /// Number columns expect `{"value": ".."}`-wrapped writes.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.column_type.to_ascii_lowercase().as_str(),
            "numeric" | "numbers"
        )
    }
}

/// Acknowledgement of a column write: the id of the changed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteConfirmation {
    pub id: String,
}

/// A webhook subscription registered with the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    #[serde(default, deserialize_with = "flexible_id")]
    pub board_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub app_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// `data` payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct IdRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemNode {
    #[serde(default)]
    pub board: Option<IdRef>,
    #[serde(default)]
    pub column_values: Option<Vec<ColumnValue>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsData {
    #[serde(default)]
    pub items: Vec<ItemNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsPage {
    #[serde(default)]
    pub items: Vec<IdRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoardNode {
    #[serde(default)]
    pub columns: Option<Vec<ColumnInfo>>,
    #[serde(default)]
    pub items_page: Option<ItemsPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoardsData {
    #[serde(default)]
    pub boards: Vec<BoardNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeColumnData {
    pub change_column_value: Option<WriteConfirmation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateWebhookData {
    pub create_webhook: Option<IdRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteWebhookData {
    pub delete_webhook: Option<IdRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebhooksData {
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
}
