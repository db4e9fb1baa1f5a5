//! Pure cart transitions.
//!
//! Each function takes the current state plus already-fetched remote data and
//! returns the next state or the reason the change is refused. Nothing here
//! performs I/O; [`crate::store::CartStore`] fetches, calls these, and
//! commits.

use rocketshoes_core::{CartItem, CartState, CartStateError, Product, ProductId, Stock};
use thiserror::Error;

/// Why a requested change was refused. The cart is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Not enough units available.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// Requested amount is zero or negative.
    #[error("Invalid amount: {0}")]
    NonPositiveAmount(i64),

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// A new product was added without its catalog data.
    #[error("Missing catalog data for product {0}")]
    MissingProduct(ProductId),

    /// The resulting state would break a cart invariant.
    #[error(transparent)]
    Invalid(CartStateError),
}

impl From<CartStateError> for Rejection {
    fn from(err: CartStateError) -> Self {
        match err {
            CartStateError::NotInCart(id) => Self::NotInCart(id),
            other => Self::Invalid(other),
        }
    }
}

/// Add one unit of a product.
///
/// `fetched` is the catalog data for a product not yet in the cart; it is
/// ignored when the product is already present. Stock must exceed the amount
/// currently held for an existing item, and must exceed 1 for a new one.
///
/// # Errors
///
/// Returns `Rejection::OutOfStock` when stock is too low, or
/// `Rejection::MissingProduct` when a new product comes without catalog data.
pub fn add(
    cart: &CartState,
    id: ProductId,
    stock: &Stock,
    fetched: Option<Product>,
) -> Result<CartState, Rejection> {
    match cart.find(id) {
        Some(existing) => {
            if stock.amount <= existing.amount {
                return Err(Rejection::OutOfStock {
                    product_id: id,
                    requested: i64::from(existing.amount) + 1,
                    available: stock.amount,
                });
            }
            let amount = existing
                .amount
                .checked_add(1)
                .ok_or(Rejection::OutOfStock {
                    product_id: id,
                    requested: i64::from(existing.amount) + 1,
                    available: stock.amount,
                })?;
            Ok(cart.with_amount(id, amount)?)
        }
        None => {
            let product = fetched.ok_or(Rejection::MissingProduct(id))?;
            let item = CartItem::from_product(product, 1);
            if stock.amount <= item.amount {
                return Err(Rejection::OutOfStock {
                    product_id: id,
                    requested: 1,
                    available: stock.amount,
                });
            }
            Ok(cart.with_item(item)?)
        }
    }
}

/// Remove a product entirely.
///
/// # Errors
///
/// Returns `Rejection::NotInCart` if the product is absent.
pub fn remove(cart: &CartState, id: ProductId) -> Result<CartState, Rejection> {
    Ok(cart.without(id)?)
}

/// Checks that run before the stock fetch of an amount update.
///
/// # Errors
///
/// Returns `Rejection::NonPositiveAmount` for `amount <= 0`, then
/// `Rejection::NotInCart` if the product is absent.
pub fn check_update(cart: &CartState, id: ProductId, amount: i64) -> Result<(), Rejection> {
    if amount <= 0 {
        return Err(Rejection::NonPositiveAmount(amount));
    }
    if !cart.contains(id) {
        return Err(Rejection::NotInCart(id));
    }
    Ok(())
}

/// Set a product's amount to exactly `amount`.
///
/// # Errors
///
/// Returns the [`check_update`] rejections, or `Rejection::OutOfStock` when
/// fewer than `amount` units are available.
pub fn update_amount(
    cart: &CartState,
    id: ProductId,
    amount: i64,
    stock: &Stock,
) -> Result<CartState, Rejection> {
    check_update(cart, id, amount)?;

    let out_of_stock = Rejection::OutOfStock {
        product_id: id,
        requested: amount,
        available: stock.amount,
    };
    if i64::from(stock.amount) < amount {
        return Err(out_of_stock);
    }
    // stock.amount is a u32 and amount <= stock.amount, so this cannot fail
    let amount = u32::try_from(amount).map_err(|_| out_of_stock)?;

    Ok(cart.with_amount(id, amount)?)
}
