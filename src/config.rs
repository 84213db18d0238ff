use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::pipeline::LookupRetryConfig;

// ============================================================================
// Service Configuration
// ============================================================================
//
// Environment-driven with hard defaults; an unparseable override is logged
// and ignored rather than failing startup.
//
// ============================================================================

#[derive(Clone, Debug)]
pub struct Config {
    /// Port the HTTP surface binds to.
    pub http_port: u16,
    /// Base URL of the book catalog service.
    pub catalog_base_url: String,
    /// Retry/timeout schedule for catalog resolution.
    pub lookup: LookupRetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            catalog_base_url: "http://127.0.0.1:9001".to_string(),
            lookup: LookupRetryConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let lookup_defaults = defaults.lookup.clone();

        Self {
            http_port: env_or("ORDER_SERVICE_PORT", defaults.http_port),
            catalog_base_url: env::var("CATALOG_BASE_URL")
                .unwrap_or(defaults.catalog_base_url),
            lookup: LookupRetryConfig {
                max_attempts: env_or(
                    "CATALOG_LOOKUP_MAX_ATTEMPTS",
                    lookup_defaults.max_attempts,
                ),
                attempt_timeout: Duration::from_millis(env_or(
                    "CATALOG_LOOKUP_TIMEOUT_MS",
                    lookup_defaults.attempt_timeout.as_millis() as u64,
                )),
                initial_delay: Duration::from_millis(env_or(
                    "CATALOG_LOOKUP_BACKOFF_MS",
                    lookup_defaults.initial_delay.as_millis() as u64,
                )),
                ..lookup_defaults
            },
        }
    }
}

/// Parse an environment override, falling back to the default on absence or
/// a malformed value.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key = key, value = %raw, "Ignoring unparseable env override");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.lookup.max_attempts, 4);
        assert_eq!(config.lookup.attempt_timeout, Duration::from_secs(2));
        assert_eq!(config.lookup.initial_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_env_override_applies() {
        env::set_var("CATALOG_LOOKUP_MAX_ATTEMPTS", "7");
        let config = Config::from_env();
        env::remove_var("CATALOG_LOOKUP_MAX_ATTEMPTS");

        assert_eq!(config.lookup.max_attempts, 7);
    }

    #[test]
    fn test_malformed_env_override_falls_back_to_default() {
        env::set_var("ORDER_SERVICE_PORT", "not-a-port");
        let config = Config::from_env();
        env::remove_var("ORDER_SERVICE_PORT");

        assert_eq!(config.http_port, 8080);
    }
}
