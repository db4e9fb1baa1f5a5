//! Rocket Shoes Cart - the shopper's cart as an explicit state container.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the cart and runs the three mutations
//!   (add, remove, update amount), each checked against live stock
//! - [`transition`] holds the pure state changes, testable without a network
//! - [`catalog`] fetches products and stock over HTTP
//! - [`storage`] persists the cart under `@RocketShoes:cart` after every
//!   successful change
//! - [`notice`] maps failures to the fixed set of shopper-facing messages
//!
//! Operations return `Result`; nothing is shown from inside the store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notice;
pub mod storage;
pub mod store;
pub mod transition;

pub use catalog::{ApiError, Catalog, HttpCatalog};
pub use config::{ApiConfig, CartConfig, ConfigError};
pub use error::{CartError, Operation};
pub use notice::{Notice, NoticeKind};
pub use storage::{CART_STORAGE_KEY, FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, UpdateProductAmount};
pub use transition::Rejection;
