//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Product listing
//! GET  /products/{id}          - Product detail
//!
//! # Stock
//! GET  /stock                  - All stock records
//! GET  /stock/{id}             - Units available for one product
//! ```
//!
//! A non-integer `{id}` is rejected by the path extractor with 400.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use rocketshoes_core::{Product, ProductId, Stock};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/products/{id}", get(show_product))
        .route("/stock", get(list_stock))
        .route("/stock/{id}", get(show_stock))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every product.
async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.db().products().to_vec())
}

/// Show one product.
#[instrument(skip(state))]
async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .db()
        .product(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// List every stock record.
async fn list_stock(State(state): State<AppState>) -> Json<Vec<Stock>> {
    Json(state.db().stock().to_vec())
}

/// Show the stock for one product.
#[instrument(skip(state))]
async fn show_stock(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Stock>> {
    state
        .db()
        .stock_for(id)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("stock {id}")))
}
