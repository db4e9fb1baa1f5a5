//! The cart state: an ordered list of line items, unique by product.
//!
//! `CartState` is an immutable value. Every change produces a new state, so a
//! snapshot handed to a reader never changes underneath it. Construction and
//! deserialization both enforce the two cart invariants:
//!
//! - no two items share a product ID
//! - every item holds at least one unit

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CartItem, Price, ProductId};

/// A cart state that would break an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartStateError {
    /// Two items with the same product ID.
    #[error("Duplicate product in cart: {0}")]
    DuplicateProduct(ProductId),

    /// An item with zero units.
    #[error("Product {0} has a zero amount")]
    ZeroAmount(ProductId),

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),
}

/// Ordered sequence of cart items; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from items, validating the invariants.
    ///
    /// # Errors
    ///
    /// Returns `CartStateError` if an ID repeats or an amount is zero.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartStateError> {
        for (index, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(CartStateError::ZeroAmount(item.id));
            }
            if items.iter().skip(index + 1).any(|other| other.id == item.id) {
                return Err(CartStateError::DuplicateProduct(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Find the item for a product.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether the product is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Number of distinct products (the cart badge count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all items.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// A new state with `item` appended at the end.
    ///
    /// # Errors
    ///
    /// Returns `CartStateError` if the product is already in the cart or the
    /// item has a zero amount.
    pub fn with_item(&self, item: CartItem) -> Result<Self, CartStateError> {
        if item.amount == 0 {
            return Err(CartStateError::ZeroAmount(item.id));
        }
        if self.contains(item.id) {
            return Err(CartStateError::DuplicateProduct(item.id));
        }

        let mut items = self.items.clone();
        items.push(item);
        Ok(Self { items })
    }

    /// A new state with the product's amount replaced, position unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CartStateError` if the product is not in the cart or `amount`
    /// is zero.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Result<Self, CartStateError> {
        if amount == 0 {
            return Err(CartStateError::ZeroAmount(id));
        }
        if !self.contains(id) {
            return Err(CartStateError::NotInCart(id));
        }

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    CartItem {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Ok(Self { items })
    }

    /// A new state with the product excluded; other items keep their order.
    ///
    /// # Errors
    ///
    /// Returns `CartStateError::NotInCart` if the product is not in the cart.
    pub fn without(&self, id: ProductId) -> Result<Self, CartStateError> {
        if !self.contains(id) {
            return Err(CartStateError::NotInCart(id));
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Ok(Self { items })
    }
}

impl TryFrom<Vec<CartItem>> for CartState {
    type Error = CartStateError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<CartState> for Vec<CartItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Price::from_cents(10000),
            image: format!("tenis{id}.jpg"),
            extra: serde_json::Map::new(),
            amount,
        }
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        let result = CartState::from_items(vec![item(1, 1), item(2, 1), item(1, 3)]);
        assert_eq!(
            result.unwrap_err(),
            CartStateError::DuplicateProduct(ProductId::new(1))
        );
    }

    #[test]
    fn test_from_items_rejects_zero_amount() {
        let result = CartState::from_items(vec![item(1, 0)]);
        assert_eq!(
            result.unwrap_err(),
            CartStateError::ZeroAmount(ProductId::new(1))
        );
    }

    #[test]
    fn test_with_item_appends_in_order() {
        let cart = CartState::new().with_item(item(2, 1)).unwrap();
        let cart = cart.with_item(item(1, 1)).unwrap();

        let ids: Vec<i32> = cart.iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(cart.with_item(item(1, 1)).is_err());
    }

    #[test]
    fn test_with_amount_leaves_original_untouched() {
        let cart = CartState::from_items(vec![item(1, 1), item(2, 2)]).unwrap();
        let updated = cart.with_amount(ProductId::new(2), 5).unwrap();

        assert_eq!(cart.find(ProductId::new(2)).unwrap().amount, 2);
        assert_eq!(updated.find(ProductId::new(2)).unwrap().amount, 5);
        assert_eq!(updated.find(ProductId::new(1)), cart.find(ProductId::new(1)));
    }

    #[test]
    fn test_without_keeps_relative_order() {
        let cart = CartState::from_items(vec![item(1, 1), item(2, 1), item(3, 1)]).unwrap();
        let removed = cart.without(ProductId::new(2)).unwrap();

        let ids: Vec<i32> = removed.iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(
            removed.without(ProductId::new(2)).unwrap_err(),
            CartStateError::NotInCart(ProductId::new(2))
        );
    }

    #[test]
    fn test_totals() {
        let cart = CartState::from_items(vec![item(1, 2), item(2, 3)]).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_units(), 5);
        assert_eq!(cart.total(), Price::from_cents(50000));
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let cart = CartState::from_items(vec![item(1, 2), item(3, 1)]).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let restored: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);

        let duplicated = r#"[
            {"id":1,"title":"a","price":1.0,"image":"a","amount":1},
            {"id":1,"title":"a","price":1.0,"image":"a","amount":2}
        ]"#;
        assert!(serde_json::from_str::<CartState>(duplicated).is_err());
    }
}
