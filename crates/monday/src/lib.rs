//! monday.com GraphQL client and column accessor.
//!
//! - [`client`] -- typed GraphQL transport bound to one short-lived token.
//! - [`accessor`] -- fail-soft column reads/writes and webhook subscription
//!   calls used by the HTTP layer.
//! - [`models`] -- response shapes returned by the platform.

pub mod accessor;
pub mod client;
pub mod models;
mod queries;

pub use accessor::{AccessorFactory, ColumnAccessor, MondayAccessorFactory, SubscriptionAccessor};
pub use client::{MondayApiError, MondayClient, MondayClientFactory};
