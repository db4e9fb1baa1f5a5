//! Catalog products, cart line items and stock records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{Price, ProductId};

/// A product as served by the remote catalog (`GET /products/{id}`).
///
/// Display attributes are opaque to the cart logic. Attributes beyond the
/// ones named here are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A product in the cart, paired with the quantity held.
///
/// Serializes flat (`{ id, title, price, image, ..extra, amount }`), which is
/// the shape of each element in the persisted cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    /// Units in the cart, always at least 1.
    pub amount: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartItem {
    /// Build a line item from catalog data.
    #[must_use]
    pub fn from_product(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
            extra: product.extra,
        }
    }

    /// Line total: unit price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.amount)
    }
}

/// Units available for a product (`GET /stock/{id}`).
///
/// Fetched on demand before every quantity change and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}
