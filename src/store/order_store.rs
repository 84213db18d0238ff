use async_trait::async_trait;

use crate::models::Order;

// ============================================================================
// Order Store Contract
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached; the order was not persisted and no
    /// partial record exists.
    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist an order, assigning its id. Returns the full stored record.
    async fn save(&self, order: Order) -> Result<Order, StoreError>;

    /// Snapshot of all persisted orders at call time.
    async fn find_all(&self) -> Result<Vec<Order>, StoreError>;
}
