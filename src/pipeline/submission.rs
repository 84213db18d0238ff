use std::sync::Arc;
use std::time::Instant;

use crate::catalog::CatalogClient;
use crate::metrics::Metrics;
use crate::models::{Order, OrderRequest};
use crate::store::{OrderStore, StoreError};

use super::outcome::derive_status;
use super::policy::{LookupRetryConfig, RetryTimeoutPolicy};

// ============================================================================
// Order Submission Pipeline
// ============================================================================
//
// Orchestrates: Request -> Catalog resolution -> Status derivation -> Store
//
// Catalog failure never surfaces to the caller; it is absorbed into a
// REJECTED order. Only store unavailability fails a submission, in which
// case nothing was persisted.
//
// ============================================================================

pub struct OrderPipeline {
    policy: RetryTimeoutPolicy,
    store: Arc<dyn OrderStore>,
    metrics: Arc<Metrics>,
}

impl OrderPipeline {
    /// Each pipeline owns its policy and collaborator handles; there is no
    /// shared global state between pipelines.
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        store: Arc<dyn OrderStore>,
        config: LookupRetryConfig,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            policy: RetryTimeoutPolicy::new(catalog, config),
            store,
            metrics,
        }
    }

    /// Submit one order: resolve the catalog reference, derive the terminal
    /// status, persist and return the stored record.
    pub async fn submit(&self, request: OrderRequest) -> Result<Order, StoreError> {
        tracing::info!(isbn = %request.isbn, "Submitting an order");

        let started = Instant::now();
        let resolved = self.policy.resolve(&request.isbn).await;
        self.metrics
            .record_lookup(resolved.is_some(), started.elapsed().as_secs_f64());

        let status = derive_status(resolved.as_ref());
        let order = Order::new(request.isbn, status);

        let persisted = self.store.save(order).await?;
        self.metrics.record_submission(persisted.status);

        tracing::info!(
            order_id = ?persisted.id,
            isbn = %persisted.isbn,
            status = ?persisted.status,
            "✅ Order persisted"
        );

        Ok(persisted)
    }

    /// All persisted orders, as the store currently sees them.
    pub async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        tracing::info!("Accessing all the orders");
        self.store.find_all().await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
