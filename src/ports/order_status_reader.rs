//! Order Status Reader Port - read-only view of the order backend.
//!
//! Consumed by the order lookup tool. Identifiers passed here are already
//! canonical (`OP` followed by five digits).

use async_trait::async_trait;

use crate::domain::tools::OrderId;

/// Errors that can occur while reading order status
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderStoreError {
    #[error("Order backend unavailable: {0}")]
    Unavailable(String),
}

/// Port for looking up the current status of an order.
#[async_trait]
pub trait OrderStatusReader: Send + Sync {
    /// Returns `Ok(None)` when no such order exists.
    async fn status_of(&self, order: &OrderId) -> Result<Option<String>, OrderStoreError>;
}
