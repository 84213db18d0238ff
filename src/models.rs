use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Domain Models
// ============================================================================

/// Catalog record as returned by the remote book catalog.
///
/// The submission pipeline treats a resolved `Book` purely as a presence
/// signal; its fields are carried through for callers but never interpreted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Book {
    pub id: Option<i64>,
    pub isbn: String,
    pub title: String,
}

/// Incoming submission payload: a reference into the catalog.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderRequest {
    pub isbn: String,
}

/// A submitted order. Created exactly once per submission and never mutated
/// afterwards; a status change would mean creating a new order.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Order {
    /// Assigned by the order store on save; `None` before persistence.
    pub id: Option<Uuid>,
    pub isbn: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// A not-yet-persisted order for the given catalog reference.
    pub fn new(isbn: String, status: OrderStatus) -> Self {
        Self {
            id: None,
            isbn,
            status,
            created_at: Utc::now(),
        }
    }
}

/// Terminal order status. Only terminal states are ever persisted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Accepted,
    Rejected,
}

impl OrderStatus {
    /// Lowercase label used for metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
