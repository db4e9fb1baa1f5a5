//! Core types for Rocket Shoes.
//!
//! This module provides type-safe wrappers for the catalog and cart concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CartState, CartStateError};
pub use id::*;
pub use price::Price;
pub use product::{CartItem, Product, Stock};
