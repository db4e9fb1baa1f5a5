//! Rocket Shoes Core - Shared types library.
//!
//! This crate provides the domain types used across all Rocket Shoes components:
//! - `cart` - Cart store, catalog client and local storage
//! - `api` - Development catalog/stock backend
//! - `cli` - Command-line cart front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, stock and the cart state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
