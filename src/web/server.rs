use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;

use crate::metrics::Metrics;
use crate::models::OrderRequest;
use crate::pipeline::OrderPipeline;
use crate::store::StoreError;

// ============================================================================
// HTTP Surface
// ============================================================================
//
// POST /orders   submit an order
// GET  /orders   list all orders
// GET  /health   liveness
// GET  /metrics  Prometheus exposition
//
// Callers only ever see a persisted order or a store-unavailable failure;
// catalog transport and timeout errors never leak into a response.
//
// ============================================================================

/// Start the order service HTTP server
pub async fn start_http_server(
    pipeline: Arc<OrderPipeline>,
    metrics: Arc<Metrics>,
    port: u16,
) -> std::io::Result<()> {
    tracing::info!("🌐 Starting order service on http://0.0.0.0:{}/orders", port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pipeline.clone()))
            .app_data(web::Data::new(metrics.clone()))
            .route("/orders", web::post().to(submit_order))
            .route("/orders", web::get().to(list_orders))
            .route("/metrics", web::get().to(metrics_handler))
            .route("/health", web::get().to(health_handler))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

async fn submit_order(
    pipeline: web::Data<Arc<OrderPipeline>>,
    request: web::Json<OrderRequest>,
) -> impl Responder {
    let request = request.into_inner();

    // Field presence is owned by the Json extractor; a present-but-blank
    // reference is rejected here, before any catalog lookup.
    if request.isbn.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "isbn must not be blank"
        }));
    }

    match pipeline.submit(request).await {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(StoreError::Unavailable(reason)) => {
            tracing::error!(error = %reason, "Order store unavailable");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "order store unavailable"
            }))
        }
    }
}

async fn list_orders(pipeline: web::Data<Arc<OrderPipeline>>) -> impl Responder {
    match pipeline.list_all().await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(StoreError::Unavailable(reason)) => {
            tracing::error!(error = %reason, "Order store unavailable");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "order store unavailable"
            }))
        }
    }
}

async fn metrics_handler(metrics: web::Data<Arc<Metrics>>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry().gather();

    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "order-service"
    }))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogClient, CatalogError};
    use crate::models::{Book, Order, OrderStatus};
    use crate::pipeline::LookupRetryConfig;
    use crate::store::InMemoryOrderStore;
    use actix_web::test;
    use async_trait::async_trait;
    use std::time::Duration;

    struct AlwaysFound;

    #[async_trait]
    impl CatalogClient for AlwaysFound {
        async fn fetch_book(&self, isbn: &str) -> Result<Option<Book>, CatalogError> {
            Ok(Some(Book {
                id: Some(1),
                isbn: isbn.to_string(),
                title: "Cloud Native Spring in Action".to_string(),
            }))
        }
    }

    fn test_pipeline() -> Arc<OrderPipeline> {
        Arc::new(OrderPipeline::new(
            Arc::new(AlwaysFound),
            Arc::new(InMemoryOrderStore::new()),
            LookupRetryConfig {
                attempt_timeout: Duration::from_millis(20),
                initial_delay: Duration::from_millis(5),
                ..LookupRetryConfig::default()
            },
            Arc::new(Metrics::new().unwrap()),
        ))
    }

    #[actix_web::test]
    async fn test_submit_order_returns_persisted_order() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_pipeline()))
                .route("/orders", web::post().to(submit_order)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(serde_json::json!({"isbn": "978-0-13-468599-1"}))
            .to_request();
        let order: Order = test::call_and_read_body_json(&app, req).await;

        assert_eq!(order.status, OrderStatus::Accepted);
        assert_eq!(order.isbn, "978-0-13-468599-1");
        assert!(order.id.is_some());
    }

    #[actix_web::test]
    async fn test_blank_isbn_is_rejected_before_lookup() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_pipeline()))
                .route("/orders", web::post().to(submit_order)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(serde_json::json!({"isbn": "  "}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_list_orders_returns_submitted_orders() {
        let pipeline = test_pipeline();
        pipeline
            .submit(OrderRequest {
                isbn: "978-0-13-468599-1".to_string(),
            })
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pipeline))
                .route("/orders", web::get().to(list_orders)),
        )
        .await;

        let req = test::TestRequest::get().uri("/orders").to_request();
        let orders: Vec<Order> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].isbn, "978-0-13-468599-1");
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(
            App::new().route("/health", web::get().to(health_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_metrics_endpoint_exposes_registry() {
        let metrics = Arc::new(Metrics::new().unwrap());
        metrics.record_submission(OrderStatus::Accepted);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics))
                .route("/metrics", web::get().to(metrics_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, req).await;

        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("orders_submitted_total"));
    }
}
