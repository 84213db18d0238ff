use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::catalog::CatalogClient;
use crate::models::Book;

// ============================================================================
// Retry/Timeout Policy for Catalog Resolution
// ============================================================================
//
// Wraps a single catalog lookup in a per-attempt timeout and a bounded
// exponential-backoff retry schedule. Every failure mode of an attempt
// (timeout, transport error, explicit not-found) counts as a failed attempt;
// exhausting the schedule collapses into the same absent signal, so callers
// cannot distinguish "not found" from "unreachable". That collapse is the
// contract, inherited from the upstream service this replaces.
//
// ============================================================================

#[derive(Clone, Debug)]
pub struct LookupRetryConfig {
    /// Total attempts, including the initial one.
    pub max_attempts: u32,
    /// Upper bound on a single attempt.
    pub attempt_timeout: Duration,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap on the backoff delay.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub multiplier: f64,
}

impl Default for LookupRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            attempt_timeout: Duration::from_secs(2),
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

pub struct RetryTimeoutPolicy {
    catalog: Arc<dyn CatalogClient>,
    config: LookupRetryConfig,
}

impl RetryTimeoutPolicy {
    pub fn new(catalog: Arc<dyn CatalogClient>, config: LookupRetryConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolve an isbn against the catalog.
    ///
    /// Never returns an error: all failure and timeout conditions collapse
    /// into `None`. Retries are sequential; a retry is only issued after the
    /// prior attempt has fully resolved or timed out.
    pub async fn resolve(&self, isbn: &str) -> Option<Book> {
        let mut delay = self.config.initial_delay;

        for attempt in 1..=self.config.max_attempts {
            tracing::debug!(
                isbn = %isbn,
                attempt = attempt,
                max_attempts = self.config.max_attempts,
                "Attempting catalog lookup"
            );

            match timeout(self.config.attempt_timeout, self.catalog.fetch_book(isbn)).await {
                Ok(Ok(Some(book))) => {
                    if attempt > 1 {
                        tracing::info!(
                            isbn = %isbn,
                            attempt = attempt,
                            "Catalog lookup succeeded after retry"
                        );
                    }
                    return Some(book);
                }
                Ok(Ok(None)) => {
                    tracing::debug!(
                        isbn = %isbn,
                        attempt = attempt,
                        "Catalog reported no such entry"
                    );
                }
                Ok(Err(error)) => {
                    tracing::warn!(
                        isbn = %isbn,
                        attempt = attempt,
                        error = %error,
                        "Catalog lookup failed"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        isbn = %isbn,
                        attempt = attempt,
                        timeout_ms = self.config.attempt_timeout.as_millis() as u64,
                        "Catalog lookup timed out"
                    );
                }
            }

            if attempt < self.config.max_attempts {
                sleep(delay).await;
                delay = self.next_delay(delay);
            }
        }

        tracing::warn!(
            isbn = %isbn,
            attempts = self.config.max_attempts,
            "Catalog lookup exhausted all attempts"
        );
        None
    }

    /// Next backoff delay: multiplied, capped at max_delay. Monotone
    /// non-decreasing for multiplier >= 1.
    fn next_delay(&self, delay: Duration) -> Duration {
        let next = Duration::from_millis(((delay.as_millis() as f64) * self.config.multiplier) as u64);
        next.min(self.config.max_delay)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
