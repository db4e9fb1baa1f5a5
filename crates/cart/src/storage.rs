//! Local key-value storage for the persisted cart.
//!
//! Mirrors browser local storage: string keys mapped to string values, read
//! and written synchronously. The cart lives under a single key
//! ([`CART_STORAGE_KEY`]) as a JSON array and is overwritten wholesale on
//! every successful mutation.
//!
//! # Backends
//!
//! - [`FileStore`] - all keys in one JSON object file, replaced atomically
//!   (write to a sibling temp file, then rename)
//! - [`MemoryStore`] - process-local map, for tests and ephemeral sessions

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use rocketshoes_core::CartState;
use thiserror::Error;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("Storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Stored content could not be decoded or a value could not be encoded.
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Another thread panicked while holding the storage lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// Read the persisted cart, or an empty cart if none was stored.
///
/// # Errors
///
/// Returns `StorageError::Json` if the stored value is not a valid cart
/// (malformed JSON, duplicate products, zero amounts).
pub fn load_cart<S: KeyValueStore + ?Sized>(storage: &S) -> Result<CartState, StorageError> {
    match storage.get_item(CART_STORAGE_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(CartState::new()),
    }
}

/// Overwrite the persisted cart.
///
/// # Errors
///
/// Returns `StorageError` if the cart cannot be serialized or written.
pub fn save_cart<S: KeyValueStore + ?Sized>(
    storage: &S,
    cart: &CartState,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(cart)?;
    storage.set_item(CART_STORAGE_KEY, &raw)
}

// =============================================================================
// FileStore
// =============================================================================

/// Key-value storage backed by a single JSON object file.
///
/// The file is re-read on every access so several processes can share it;
/// the lock only serializes access within this process.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    /// Open storage at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let raw = serde_json::to_string_pretty(map)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, raw).map_err(|source| self.io_error(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.read()?;
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.write()?;
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Process-local key-value storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::{CartItem, Price, ProductId};

    use super::*;

    fn cart() -> CartState {
        CartState::from_items(vec![CartItem {
            id: ProductId::new(1),
            title: "Tênis de Caminhada Leve Confortável".to_string(),
            price: Price::from_cents(17990),
            image: "tenis1.jpg".to_string(),
            extra: serde_json::Map::new(),
            amount: 2,
        }])
        .unwrap()
    }

    #[test]
    fn test_load_cart_defaults_to_empty() {
        let storage = MemoryStore::new();
        assert!(load_cart(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let storage = MemoryStore::new();
        save_cart(&storage, &cart()).unwrap();

        let raw = storage.get_item(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"amount\":2"));
        assert_eq!(load_cart(&storage).unwrap(), cart());
    }

    #[test]
    fn test_load_cart_rejects_corrupt_value() {
        let storage = MemoryStore::new();
        storage.set_item(CART_STORAGE_KEY, "{not json").unwrap();
        assert!(matches!(load_cart(&storage), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStore::new(&path);
        assert!(storage.get_item(CART_STORAGE_KEY).unwrap().is_none());
        storage.set_item("@RocketShoes:theme", "dark").unwrap();
        save_cart(&storage, &cart()).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(load_cart(&reopened).unwrap(), cart());
        assert_eq!(
            reopened.get_item("@RocketShoes:theme").unwrap().as_deref(),
            Some("dark")
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        let storage = FileStore::new(&path);
        assert!(matches!(
            storage.get_item(CART_STORAGE_KEY),
            Err(StorageError::Json(_))
        ));
    }
}
