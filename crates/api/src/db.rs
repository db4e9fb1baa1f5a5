//! JSON file database for the development API.
//!
//! # Format
//!
//! ```json
//! {
//!   "products": [{ "id": 1, "title": "...", "price": 179.9, "image": "..." }],
//!   "stock":    [{ "id": 1, "amount": 3 }]
//! }
//! ```
//!
//! The file is read once at startup and served read-only.

use std::path::{Path, PathBuf};

use rocketshoes_core::{Product, ProductId, Stock};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur loading the database file.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a valid database.
    #[error("Invalid database file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share an ID.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: ProductId },
}

/// In-memory catalog and stock records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<Stock>,
}

impl Database {
    /// Build a database from records.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateId` if a product or stock ID repeats.
    pub fn new(products: Vec<Product>, stock: Vec<Stock>) -> Result<Self, DatabaseError> {
        check_unique("product", products.iter().map(|p| p.id))?;
        check_unique("stock", stock.iter().map(|s| s.id))?;
        Ok(Self { products, stock })
    }

    /// Load a database from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, DatabaseError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DatabaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a database from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the text is not a valid database.
    pub fn from_json(raw: &str) -> Result<Self, DatabaseError> {
        let parsed: Self = serde_json::from_str(raw)?;
        Self::new(parsed.products, parsed.stock)
    }

    /// All products, in file order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All stock records, in file order.
    #[must_use]
    pub fn stock(&self) -> &[Stock] {
        &self.stock
    }

    /// Look up a product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a stock record.
    #[must_use]
    pub fn stock_for(&self, id: ProductId) -> Option<&Stock> {
        self.stock.iter().find(|s| s.id == id)
    }
}

fn check_unique(
    kind: &'static str,
    ids: impl Iterator<Item = ProductId>,
) -> Result<(), DatabaseError> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatabaseError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_server_json_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("server.json");
        let db = Database::load(&path).unwrap();

        assert_eq!(db.products().len(), 6);
        assert_eq!(db.stock_for(ProductId::new(1)).unwrap().amount, 3);
        assert!(db.product(ProductId::new(6)).is_some());
        assert!(db.product(ProductId::new(7)).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let raw = r#"{"products": [], "stock": [{"id": 1, "amount": 1}, {"id": 1, "amount": 2}]}"#;
        assert!(matches!(
            Database::from_json(raw),
            Err(DatabaseError::DuplicateId { kind: "stock", .. })
        ));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let db = Database::from_json("{}").unwrap();
        assert!(db.products().is_empty());
        assert!(db.stock().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Database::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(DatabaseError::Io { .. })));
    }
}
