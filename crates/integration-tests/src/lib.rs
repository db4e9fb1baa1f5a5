//! Integration tests for Rocket Shoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! Each test gets its own API server on an ephemeral port and its own
//! storage file, so tests run in parallel without sharing state.
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart operations against the real HTTP API
//! - `persistence` - Storage file contents and reopening the store

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;

use rocketshoes_api::db::Database;
use rocketshoes_cart::{ApiConfig, CartStore, FileStore, HttpCatalog};
use tempfile::TempDir;
use url::Url;

/// Catalog served to every test: product 3 has two units, product 4 one.
pub const TEST_DB: &str = r#"{
    "products": [
        { "id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "tenis1.jpg" },
        { "id": 2, "title": "Tênis VR Caminhada Confortável", "price": 139.9, "image": "tenis2.jpg" },
        { "id": 3, "title": "Tênis Adidas Duramo Lite 2.0", "price": 219.9, "image": "tenis3.jpg" },
        { "id": 4, "title": "Tênis de Corrida", "price": 99.9, "image": "tenis4.jpg" }
    ],
    "stock": [
        { "id": 1, "amount": 3 },
        { "id": 2, "amount": 5 },
        { "id": 3, "amount": 2 },
        { "id": 4, "amount": 1 }
    ]
}"#;

/// The store as wired against the test server.
pub type TestStore = CartStore<HttpCatalog, FileStore>;

/// A running API server plus a private storage directory.
pub struct TestContext {
    pub api_url: Url,
    pub storage_path: PathBuf,
    _dir: TempDir,
}

impl TestContext {
    /// Start an API server over [`TEST_DB`] on an ephemeral port.
    pub async fn new() -> Self {
        let db = Database::from_json(TEST_DB).unwrap();
        let addr = spawn_api(db).await;
        let dir = tempfile::tempdir().unwrap();

        Self {
            api_url: Url::parse(&format!("http://{addr}")).unwrap(),
            storage_path: dir.path().join("storage.json"),
            _dir: dir,
        }
    }

    /// API configuration pointing at this context's server.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone())
    }

    /// Open a store over this context's server and storage file.
    #[must_use]
    pub fn open_store(&self) -> TestStore {
        let catalog = HttpCatalog::new(&self.api_config()).unwrap();
        CartStore::open(catalog, FileStore::new(&self.storage_path)).unwrap()
    }
}

/// Serve the API over `db` in the background; returns the bound address.
pub async fn spawn_api(db: Database) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, rocketshoes_api::app(db)).await.unwrap();
    });

    addr
}
