//! In-memory order store for development and testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::tools::OrderId;
use crate::ports::{OrderStatusReader, OrderStoreError};

/// Order statuses held in memory, keyed by canonical order id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    statuses: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the demo orders.
    pub fn with_demo_orders() -> Self {
        let statuses = [
            ("OP12345", "shipped"),
            ("OP67890", "awaiting payment"),
            ("OP11223", "cancelled"),
        ]
        .into_iter()
        .map(|(id, status)| (id.to_string(), status.to_string()))
        .collect();

        Self {
            statuses: Arc::new(RwLock::new(statuses)),
        }
    }

    /// Sets or replaces the status of an order.
    pub async fn set_status(&self, order: &OrderId, status: impl Into<String>) {
        self.statuses
            .write()
            .await
            .insert(order.as_str().to_string(), status.into());
    }
}

#[async_trait]
impl OrderStatusReader for InMemoryOrderStore {
    async fn status_of(&self, order: &OrderId) -> Result<Option<String>, OrderStoreError> {
        Ok(self.statuses.read().await.get(order.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_orders_are_seeded() {
        let store = InMemoryOrderStore::with_demo_orders();
        let order = OrderId::parse("OP67890").unwrap();

        assert_eq!(
            store.status_of(&order).await.unwrap().as_deref(),
            Some("awaiting payment")
        );
    }

    #[tokio::test]
    async fn unknown_order_is_none() {
        let store = InMemoryOrderStore::new();
        let order = OrderId::parse("OP00000").unwrap();

        assert!(store.status_of(&order).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_status_overwrites() {
        let store = InMemoryOrderStore::with_demo_orders();
        let order = OrderId::parse("OP12345").unwrap();

        store.set_status(&order, "delivered").await;

        assert_eq!(store.status_of(&order).await.unwrap().as_deref(), Some("delivered"));
    }
}
