//! Remote catalog and stock sources.
//!
//! # Architecture
//!
//! - [`Catalog`] is the seam the cart store depends on, so tests can swap in
//!   an in-process catalog without a network
//! - [`HttpCatalog`] talks to the REST API (`GET /products/{id}`,
//!   `GET /stock/{id}`) with `reqwest`
//! - Product data is cached via `moka`; stock is always fetched fresh
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::catalog::{Catalog, HttpCatalog};
//!
//! let catalog = HttpCatalog::new(&config.api)?;
//! let stock = catalog.stock(ProductId::new(1)).await?;
//! ```

mod http;

use std::sync::Arc;

use async_trait::async_trait;
use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

pub use http::HttpCatalog;

/// Errors that can occur when talking to the catalog/stock API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned a non-success status.
    #[error("API error: {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot carry resource paths.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The configured token is not a valid header value.
    #[error("Invalid API token: {0}")]
    InvalidToken(String),
}

/// Source of catalog data and live stock levels.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch a product's catalog attributes.
    async fn product(&self, id: ProductId) -> Result<Product, ApiError>;

    /// Fetch the units currently available for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError>;
}

#[async_trait]
impl<T: Catalog + ?Sized> Catalog for Arc<T> {
    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        (**self).product(id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        (**self).stock(id).await
    }
}
