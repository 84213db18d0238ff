use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use async_trait::async_trait;

use crate::models::Order;

use super::order_store::{OrderStore, StoreError};

// ============================================================================
// In-Memory Order Store
// ============================================================================

/// Insertion-ordered in-memory store, safe for concurrent submissions.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, mut order: Order) -> Result<Order, StoreError> {
        order.id = Some(Uuid::new_v4());

        let mut orders = self.orders.write().await;
        orders.push(order.clone());

        tracing::debug!(
            order_id = ?order.id,
            isbn = %order.isbn,
            status = ?order.status,
            "Order persisted"
        );

        Ok(order)
    }

    async fn find_all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().await.clone())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
