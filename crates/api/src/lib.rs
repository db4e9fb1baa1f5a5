//! Rocket Shoes development API library.
//!
//! Serves the catalog (`/products`) and stock (`/stock`) endpoints the cart
//! checks against, from a JSON database file. The binary wraps [`app`]; the
//! integration tests mount it on an ephemeral port.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::state::AppState;

/// Build the full application router over `db`.
pub fn app(db: Database) -> Router {
    routes::routes()
        .with_state(AppState::new(db))
        .layer(TraceLayer::new_for_http())
}
