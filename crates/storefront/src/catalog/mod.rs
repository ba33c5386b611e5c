//! Product catalog and stock API.
//!
//! # Architecture
//!
//! - The cart store talks to the catalog through the [`Catalog`] trait
//! - [`HttpCatalog`] is the REST implementation (`reqwest`)
//! - Product records are cached in memory via `moka` (5 minute TTL)
//! - Stock records are never cached; every stock check hits the API
//!
//! # Endpoints
//!
//! - `GET {base}/products/{id}` - product attributes
//! - `GET {base}/stock/{id}` - `{ "id": 1, "amount": 3 }`
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_storefront::catalog::{Catalog, HttpCatalog};
//!
//! let catalog = HttpCatalog::new(&config.catalog);
//! let stock = catalog.stock(ProductId::new(1)).await?;
//! ```

mod http;

pub use http::HttpCatalog;

use async_trait::async_trait;
use rocketshoes_core::{Product, ProductId, StockRecord};
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Could not build the request URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Read access to product data and stock levels.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the product record for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the request fails.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current stock level for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the request fails.
    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError>;
}
