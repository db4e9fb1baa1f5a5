//! The cart store: the single owner of the shopper's cart.
//!
//! # Architecture
//!
//! - Holds the one authoritative [`CartState`] behind an async mutex
//! - Every mutation keeps the lock across its whole fetch-validate-commit
//!   sequence, so concurrent operations run one after another and none of
//!   them works from a stale snapshot
//! - Commits are write-through: the new state is persisted first and only
//!   then becomes current, so memory always matches storage
//! - Committed states are published on a `watch` channel for front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::{CartStore, FileStore, HttpCatalog, UpdateProductAmount};
//!
//! let store = CartStore::open(HttpCatalog::new(&config.api)?, FileStore::new(&config.storage_path))?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! store.update_product_amount(UpdateProductAmount {
//!     product_id: ProductId::new(1),
//!     amount: 3,
//! }).await?;
//! ```

use rocketshoes_core::{CartState, ProductId};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};
use tracing::instrument;

use crate::catalog::Catalog;
use crate::error::{CartError, Operation, Result};
use crate::storage::{self, KeyValueStore, StorageError};
use crate::transition::{self, Rejection};

/// Input for [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Cart state container with stock-checked, write-through mutations.
pub struct CartStore<C, S> {
    catalog: C,
    storage: S,
    state: Mutex<CartState>,
    published: watch::Sender<CartState>,
}

impl<C: Catalog, S: KeyValueStore> CartStore<C, S> {
    /// Open the store, loading the persisted cart (empty if none).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage cannot be read or holds a malformed
    /// cart.
    pub fn open(catalog: C, storage: S) -> std::result::Result<Self, StorageError> {
        let cart = storage::load_cart(&storage)?;
        tracing::debug!(items = cart.len(), "Loaded cart from storage");

        let (published, _) = watch::channel(cart.clone());
        Ok(Self {
            catalog,
            storage,
            state: Mutex::new(cart),
            published,
        })
    }

    /// Snapshot of the last committed cart.
    #[must_use]
    pub fn cart(&self) -> CartState {
        self.published.borrow().clone()
    }

    /// Receiver that observes every committed cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.published.subscribe()
    }

    /// The catalog this store checks against.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Add one unit of a product, fetching it from the catalog if new.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Rejected` when stock is insufficient,
    /// `CartError::Api` when the stock or catalog fetch fails, and
    /// `CartError::Storage` when the new cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_product(&self, id: ProductId) -> Result<CartState> {
        const OP: Operation = Operation::Add;
        let mut current = self.state.lock().await;

        let stock = self.catalog.stock(id).await.map_err(|e| api_error(OP, e))?;
        let fetched = if current.contains(id) {
            None
        } else {
            Some(self.catalog.product(id).await.map_err(|e| api_error(OP, e))?)
        };

        let next = transition::add(&current, id, &stock, fetched).map_err(|r| rejected(OP, r))?;
        self.commit(OP, &mut current, next)
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Rejected` if the product is not in the cart and
    /// `CartError::Storage` when the new cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_product(&self, id: ProductId) -> Result<CartState> {
        const OP: Operation = Operation::Remove;
        let mut current = self.state.lock().await;

        let next = transition::remove(&current, id).map_err(|r| rejected(OP, r))?;
        self.commit(OP, &mut current, next)
    }

    /// Set a product's amount after checking stock.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Rejected` for a non-positive amount, a product not
    /// in the cart, or insufficient stock; `CartError::Api` when the stock
    /// fetch fails; `CartError::Storage` when the new cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %request.product_id, amount = request.amount))]
    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> Result<CartState> {
        const OP: Operation = Operation::UpdateAmount;
        let UpdateProductAmount { product_id, amount } = request;
        let mut current = self.state.lock().await;

        transition::check_update(&current, product_id, amount).map_err(|r| rejected(OP, r))?;

        let stock = self
            .catalog
            .stock(product_id)
            .await
            .map_err(|e| api_error(OP, e))?;

        let next = transition::update_amount(&current, product_id, amount, &stock)
            .map_err(|r| rejected(OP, r))?;
        self.commit(OP, &mut current, next)
    }

    /// Persist `next`, then make it current and publish it.
    fn commit(
        &self,
        operation: Operation,
        current: &mut CartState,
        next: CartState,
    ) -> Result<CartState> {
        storage::save_cart(&self.storage, &next).map_err(|source| {
            tracing::error!(error = %source, %operation, "Failed to persist cart");
            CartError::Storage { operation, source }
        })?;

        current.clone_from(&next);
        self.published.send_replace(next.clone());
        tracing::info!(%operation, items = next.len(), units = next.total_units(), "Cart updated");
        Ok(next)
    }
}

fn rejected(operation: Operation, reason: Rejection) -> CartError {
    tracing::warn!(%operation, %reason, "Cart change rejected");
    CartError::Rejected { operation, reason }
}

fn api_error(operation: Operation, source: crate::catalog::ApiError) -> CartError {
    tracing::error!(error = %source, %operation, "Catalog request failed");
    CartError::Api { operation, source }
}
