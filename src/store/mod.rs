// ============================================================================
// Order Store - Persistence Seam
// ============================================================================
//
// The store is an external collaborator with a narrow contract: save an
// order (assigning its id) and list all orders. The in-memory implementation
// backs the service by default and the test suites.
//
// ============================================================================

pub mod in_memory;
pub mod order_store;

pub use in_memory::InMemoryOrderStore;
pub use order_store::{OrderStore, StoreError};
