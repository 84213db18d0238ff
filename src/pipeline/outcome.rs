use crate::models::{Book, OrderStatus};

// ============================================================================
// Order Outcome Derivation
// ============================================================================

/// Maps the terminal catalog lookup outcome to an order status.
///
/// Total and deterministic: a resolved entry is the only path to `Accepted`;
/// every absent outcome (not found, transport failure, retries exhausted)
/// maps to `Rejected`. Nothing else influences the mapping.
pub fn derive_status(lookup: Option<&Book>) -> OrderStatus {
    match lookup {
        Some(_) => OrderStatus::Accepted,
        None => OrderStatus::Rejected,
    }
}
