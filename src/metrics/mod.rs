use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};

use crate::models::OrderStatus;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Order submissions by terminal status
// - Catalog lookup outcomes (resolved vs empty after retries)
// - Catalog resolution latency (including retries and backoff)
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the service
pub struct Metrics {
    registry: Registry,

    pub orders_submitted_total: IntCounterVec,
    pub catalog_lookup_outcomes_total: IntCounterVec,
    pub catalog_lookup_duration: Histogram,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_submitted_total = IntCounterVec::new(
            Opts::new("orders_submitted_total", "Orders persisted, by terminal status"),
            &["status"],
        )?;
        registry.register(Box::new(orders_submitted_total.clone()))?;

        let catalog_lookup_outcomes_total = IntCounterVec::new(
            Opts::new(
                "catalog_lookup_outcomes_total",
                "Terminal catalog lookup outcomes after retries",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(catalog_lookup_outcomes_total.clone()))?;

        let catalog_lookup_duration = Histogram::with_opts(
            HistogramOpts::new(
                "catalog_lookup_duration_seconds",
                "Catalog resolution duration including retries and backoff",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        )?;
        registry.register(Box::new(catalog_lookup_duration.clone()))?;

        Ok(Self {
            registry,
            orders_submitted_total,
            catalog_lookup_outcomes_total,
            catalog_lookup_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a persisted order
    pub fn record_submission(&self, status: OrderStatus) {
        self.orders_submitted_total
            .with_label_values(&[status.as_str()])
            .inc();
    }

    /// Record a terminal catalog lookup outcome and its duration
    pub fn record_lookup(&self, resolved: bool, duration_secs: f64) {
        let outcome = if resolved { "resolved" } else { "empty" };
        self.catalog_lookup_outcomes_total
            .with_label_values(&[outcome])
            .inc();
        self.catalog_lookup_duration.observe(duration_secs);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(metrics.registry.gather().len() > 0);
    }

    #[test]
    fn test_record_submission() {
        let metrics = Metrics::new().unwrap();
        metrics.record_submission(OrderStatus::Accepted);
        metrics.record_submission(OrderStatus::Rejected);
        metrics.record_submission(OrderStatus::Rejected);

        let gathered = metrics.registry.gather();
        let submitted = gathered
            .iter()
            .find(|m| m.name() == "orders_submitted_total")
            .unwrap();
        assert_eq!(submitted.metric.len(), 2); // Two status labels
    }

    #[test]
    fn test_record_lookup_outcomes() {
        let metrics = Metrics::new().unwrap();
        metrics.record_lookup(true, 0.05);
        metrics.record_lookup(false, 1.2);
        metrics.record_lookup(false, 0.9);

        let gathered = metrics.registry.gather();
        let outcomes = gathered
            .iter()
            .find(|m| m.name() == "catalog_lookup_outcomes_total")
            .unwrap();
        assert_eq!(outcomes.metric.len(), 2); // resolved + empty
    }
}
