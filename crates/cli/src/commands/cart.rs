//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! rs-cart show
//!
//! # Add one unit of product 1
//! rs-cart add 1
//!
//! # Set product 1 to 3 units
//! rs-cart update 1 3
//!
//! # Remove product 1
//! rs-cart remove 1
//! ```
//!
//! # Environment Variables
//!
//! - `ROCKETSHOES_API_URL` - Catalog/stock API base URL
//! - `ROCKETSHOES_STORAGE_PATH` - Local storage file holding the cart

use std::fmt::Write as _;

use rocketshoes_cart::{
    ApiError, CartConfig, CartError, CartStore, ConfigError, FileStore, HttpCatalog,
    StorageError, UpdateProductAmount,
};
use rocketshoes_core::{CartState, ProductId};
use thiserror::Error;

/// The store as wired for the command line.
pub type Store = CartStore<HttpCatalog, FileStore>;

/// Errors that can occur running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The API client could not be built or a listing failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The persisted cart could not be read.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Output could not be encoded.
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the cart store from environment configuration.
///
/// # Errors
///
/// Returns `CommandError` if configuration is invalid, the API client
/// cannot be built, or the persisted cart is malformed.
pub fn open_store() -> Result<Store, CommandError> {
    let config = CartConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let catalog = HttpCatalog::new(&config.api)?;
    let storage = FileStore::new(&config.storage_path);
    Ok(CartStore::open(catalog, storage)?)
}

/// Print the current cart.
pub fn show(store: &Store, json: bool) -> Result<(), CommandError> {
    print_cart(&store.cart(), json)
}

/// Add one unit of a product.
pub async fn add(store: &Store, id: ProductId, json: bool) -> Result<(), CommandError> {
    let cart = store.add_product(id).await?;
    print_cart(&cart, json)
}

/// Remove a product.
pub async fn remove(store: &Store, id: ProductId, json: bool) -> Result<(), CommandError> {
    let cart = store.remove_product(id).await?;
    print_cart(&cart, json)
}

/// Set a product's amount.
pub async fn update(
    store: &Store,
    id: ProductId,
    amount: i64,
    json: bool,
) -> Result<(), CommandError> {
    let cart = store
        .update_product_amount(UpdateProductAmount {
            product_id: id,
            amount,
        })
        .await?;
    print_cart(&cart, json)
}

/// List the catalog.
pub async fn products(store: &Store, json: bool) -> Result<(), CommandError> {
    let products = store.catalog().list_products().await?;

    let output = if json {
        serde_json::to_string_pretty(&products)?
    } else {
        let mut out = String::new();
        for product in &products {
            let _ = writeln!(
                out,
                "{:>4}  {:<60} {:>12}",
                product.id,
                product.title,
                product.price.display()
            );
        }
        out
    };

    emit(&output);
    Ok(())
}

fn print_cart(cart: &CartState, json: bool) -> Result<(), CommandError> {
    let output = if json {
        serde_json::to_string_pretty(cart)?
    } else {
        render(cart)
    };
    emit(&output);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    println!("{}", output.trim_end());
}

/// Render the cart as a text table with subtotals and total.
#[must_use]
pub fn render(cart: &CartState) -> String {
    if cart.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<48} {:>12} {:>6} {:>12}",
        "ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"
    );
    for item in cart {
        let _ = writeln!(
            out,
            "{:>4}  {:<48} {:>12} {:>6} {:>12}",
            item.id,
            item.title,
            item.price.display(),
            item.amount,
            item.subtotal().display()
        );
    }
    let _ = writeln!(
        out,
        "{} item(s), total {}",
        cart.len(),
        cart.total().display()
    );
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::{CartItem, Price};

    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&CartState::new()), "Cart is empty");
    }

    #[test]
    fn test_render_lists_items_and_total() {
        let cart = CartState::from_items(vec![
            CartItem {
                id: ProductId::new(1),
                title: "Tênis de Caminhada Leve Confortável".to_string(),
                price: Price::from_cents(17990),
                image: "tenis1.jpg".to_string(),
                extra: serde_json::Map::new(),
                amount: 2,
            },
            CartItem {
                id: ProductId::new(2),
                title: "Tênis VR Caminhada".to_string(),
                price: Price::from_cents(13990),
                image: "tenis2.jpg".to_string(),
                extra: serde_json::Map::new(),
                amount: 1,
            },
        ])
        .unwrap();

        let output = render(&cart);

        assert!(output.contains("Tênis de Caminhada Leve Confortável"));
        assert!(output.contains("R$ 359.80"));
        assert!(output.ends_with("2 item(s), total R$ 499.70\n"));
    }
}
