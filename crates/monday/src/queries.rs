//! GraphQL documents sent to the platform.

pub(crate) const COLUMN_VALUE: &str = "\
query ($itemId: [ID!], $columnId: [String!]) {
  items(ids: $itemId) {
    column_values(ids: $columnId) { id value }
  }
}";

pub(crate) const COLUMN_VALUE_WITH_TEXT: &str = "\
query ($itemId: [ID!], $columnId: [String!]) {
  items(ids: $itemId) {
    column_values(ids: $columnId) { id value type text }
  }
}";

pub(crate) const COLUMN_INFO: &str = "\
query ($boardId: [ID!], $columnId: [String!]) {
  boards(ids: $boardId) {
    columns(ids: $columnId) { id title type settings_str }
  }
}";

pub(crate) const CHANGE_COLUMN_VALUE: &str = "\
mutation ($boardId: ID!, $itemId: ID!, $columnId: String!, $value: JSON!) {
  change_column_value(board_id: $boardId, item_id: $itemId, column_id: $columnId, value: $value) { id }
}";

pub(crate) const ITEM_BOARD: &str = "\
query ($itemId: [ID!]) {
  items(ids: $itemId) { id board { id } }
}";

pub(crate) const ITEM_COLUMNS: &str = "\
query ($itemId: [ID!]) {
  items(ids: $itemId) {
    column_values { id text type value column { title } }
  }
}";

pub(crate) const BOARD_FIRST_ITEM: &str = "\
query ($boardId: [ID!]) {
  boards(ids: $boardId) {
    items_page(limit: 1) { items { id } }
  }
}";

pub(crate) const CREATE_WEBHOOK: &str = "\
mutation ($boardId: ID!, $url: String!, $event: WebhookEventType!, $config: JSON) {
  create_webhook(board_id: $boardId, url: $url, event: $event, config: $config) { id }
}";

pub(crate) const CREATE_WEBHOOK_UNSCOPED: &str = "\
mutation ($url: String!, $event: WebhookEventType!, $config: JSON) {
  create_webhook(url: $url, event: $event, config: $config) { id }
}";

pub(crate) const DELETE_WEBHOOK: &str = "\
mutation ($id: ID!) {
  delete_webhook(id: $id) { id }
}";

pub(crate) const LIST_WEBHOOKS: &str = "\
query {
  webhooks { id board_id app_id url event config }
}";
