use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::Book;

// ============================================================================
// Catalog Client
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Transport-level failure (connect, read, or body decode).
    #[error("catalog transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog returned unexpected status: {0}")]
    UnexpectedStatus(StatusCode),
}

/// One catalog lookup attempt.
///
/// `Ok(None)` is the catalog explicitly reporting "no such entry";
/// `Err(CatalogError)` is a transport failure. The retry policy collapses
/// both into the same absent signal.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_book(&self, isbn: &str) -> Result<Option<Book>, CatalogError>;
}

/// HTTP client for the book catalog service.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_book(&self, isbn: &str) -> Result<Option<Book>, CatalogError> {
        let url = format!("{}/books/{}", self.base_url, isbn);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(isbn = %isbn, "Catalog has no entry for isbn");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus(status));
        }

        let book = response.json::<Book>().await?;
        tracing::debug!(isbn = %book.isbn, "Catalog entry resolved");
        Ok(Some(book))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
