use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod catalog;
mod config;
mod metrics;
mod models;
mod pipeline;
mod store;
mod web;

use catalog::HttpCatalogClient;
use config::Config;
use metrics::Metrics;
use pipeline::OrderPipeline;
use store::InMemoryOrderStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_service=debug")),
        )
        .init();

    tracing::info!("🚀 Starting order submission service");

    let config = Config::from_env();
    tracing::info!(
        catalog_base_url = %config.catalog_base_url,
        http_port = config.http_port,
        lookup_attempts = config.lookup.max_attempts,
        "Configuration loaded"
    );

    let metrics = Arc::new(Metrics::new()?);

    let catalog = Arc::new(HttpCatalogClient::new(&config.catalog_base_url));
    let store = Arc::new(InMemoryOrderStore::new());

    let pipeline = Arc::new(OrderPipeline::new(
        catalog,
        store,
        config.lookup.clone(),
        metrics.clone(),
    ));

    web::start_http_server(pipeline, metrics, config.http_port).await?;

    Ok(())
}
