//! Cart store.
//!
//! [`CartStore`] owns the in-memory cart and mirrors it to a [`Storage`]
//! backend under a single key. Every mutation is a read-modify-write step:
//! the next cart is built from the current one, persisted, and only then
//! committed in memory. A failed step leaves both copies untouched.
//!
//! Operations never return errors. They report an [`Outcome`] and push a
//! [`Notice`] to the [`Notifier`] when something went wrong.

mod view;

pub use view::{CartItemView, CartView};

use rocketshoes_core::{Cart, LineItem, ProductId};
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{CartError, Result};
use crate::notify::{Notice, Notifier};
use crate::storage::{CART_KEY, Storage};

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The cart changed and was persisted.
    Updated,
    /// The request was ignored (e.g. a quantity below one).
    Unchanged,
    /// Stock could not cover the request. A notice was emitted.
    OutOfStock,
    /// The operation failed. A notice was emitted.
    Failed,
}

impl Outcome {
    /// `true` for `Updated` and `Unchanged`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Updated | Self::Unchanged)
    }
}

/// Result of an internal step that did not fail.
enum Step {
    Applied,
    OutOfStock,
}

impl Step {
    const fn outcome(self) -> Outcome {
        match self {
            Self::Applied => Outcome::Updated,
            Self::OutOfStock => Outcome::OutOfStock,
        }
    }
}

/// Stock-checked cart mirrored to persistent storage.
///
/// Construct one per cart at start-up and hand it to consumers by reference.
/// Mutations take `&mut self`, so operations on one store never interleave.
pub struct CartStore<C, S, N> {
    catalog: C,
    storage: S,
    notifier: N,
    key: String,
    cart: Cart,
}

impl<C, S, N> std::fmt::Debug for CartStore<C, S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl<C: Catalog, S: Storage, N: Notifier> CartStore<C, S, N> {
    /// Load the cart stored under the default key.
    pub fn load(catalog: C, storage: S, notifier: N) -> Self {
        Self::load_with_key(catalog, storage, notifier, CART_KEY)
    }

    /// Load the cart stored under `key`.
    ///
    /// A missing, unreadable or malformed value yields an empty cart; the
    /// stored value is replaced on the next successful mutation.
    pub fn load_with_key(catalog: C, storage: S, notifier: N, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match read_cart(&storage, &key) {
            Ok(Some(cart)) => {
                debug!(key = %key, lines = cart.len(), "Loaded stored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to load stored cart, starting empty");
                Cart::new()
            }
        };

        Self {
            catalog,
            storage,
            notifier,
            key,
            cart,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Display projection of the current cart.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from(&self.cart)
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Storage key the cart is mirrored under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// An existing line goes through the same path as
    /// [`update_product_amount`](Self::update_product_amount), so stock is
    /// checked against the new total. A new line is stock-checked for one
    /// unit, then filled from the catalog.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Outcome {
        match self.try_add(product_id).await {
            Ok(step) => step.outcome(),
            Err(e) => self.fail(product_id, &e, Notice::AddFailed),
        }
    }

    /// Remove a product's line.
    ///
    /// Removing a product that is not in the cart is a failure: the cart is
    /// left as is and [`Notice::RemoveFailed`] is emitted.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Outcome {
        match self.try_remove(product_id) {
            Ok(()) => Outcome::Updated,
            Err(e) => self.fail(product_id, &e, Notice::RemoveFailed),
        }
    }

    /// Set a product's quantity.
    ///
    /// Amounts below one are ignored without a notice or a catalog call.
    #[instrument(skip_all, fields(product_id = %product_id, amount = amount))]
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: i32) -> Outcome {
        let amount = match u32::try_from(amount) {
            Ok(amount) if amount >= 1 => amount,
            _ => {
                debug!(amount, "Ignoring non-positive amount");
                return Outcome::Unchanged;
            }
        };

        match self.try_update(product_id, amount).await {
            Ok(step) => step.outcome(),
            Err(e) => self.fail(product_id, &e, Notice::UpdateFailed),
        }
    }

    /// Delete the persisted cart and empty the in-memory one.
    #[instrument(skip_all, fields(key = %self.key))]
    pub fn clear(&mut self) -> Outcome {
        match self.storage.remove(&self.key) {
            Ok(()) => {
                self.cart = Cart::new();
                info!(key = %self.key, "Cart cleared");
                Outcome::Updated
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to clear cart");
                self.notifier.notify(Notice::ClearFailed);
                Outcome::Failed
            }
        }
    }

    /// Check whether stock covers `requested` units of a product.
    ///
    /// Emits [`Notice::InsufficientStock`] when it does not.
    ///
    /// # Errors
    ///
    /// Returns an error if the stock record cannot be fetched.
    pub async fn has_stock(&self, product_id: ProductId, requested: u32) -> Result<bool> {
        let stock = self.catalog.stock(product_id).await?;
        if stock.covers(requested) {
            return Ok(true);
        }

        warn!(
            product_id = %product_id,
            requested,
            available = stock.amount,
            "Insufficient stock"
        );
        self.notifier.notify(Notice::InsufficientStock);
        Ok(false)
    }

    // =========================================================================
    // Steps
    // =========================================================================

    async fn try_add(&mut self, product_id: ProductId) -> Result<Step> {
        if let Some(item) = self.cart.find(product_id) {
            let amount = item.amount.saturating_add(1);
            return self.try_update(product_id, amount).await;
        }

        if !self.has_stock(product_id, 1).await? {
            return Ok(Step::OutOfStock);
        }

        let product = self.catalog.product(product_id).await?;
        if product.id != product_id {
            return Err(CartError::ProductMismatch {
                requested: product_id,
                returned: product.id,
            });
        }

        let mut next = self.cart.clone();
        next.append(LineItem::single(product));
        self.commit(next)?;

        info!(product_id = %product_id, "Added product to cart");
        Ok(Step::Applied)
    }

    async fn try_update(&mut self, product_id: ProductId, amount: u32) -> Result<Step> {
        if !self.cart.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        if !self.has_stock(product_id, amount).await? {
            return Ok(Step::OutOfStock);
        }

        let mut next = self.cart.clone();
        next.set_amount(product_id, amount);
        self.commit(next)?;

        info!(product_id = %product_id, amount, "Updated product amount");
        Ok(Step::Applied)
    }

    fn try_remove(&mut self, product_id: ProductId) -> Result<()> {
        let mut next = self.cart.clone();
        if next.remove(product_id).is_none() {
            return Err(CartError::NotInCart(product_id));
        }
        self.commit(next)?;

        info!(product_id = %product_id, "Removed product from cart");
        Ok(())
    }

    /// Persist `next`, then make it the current cart.
    fn commit(&mut self, next: Cart) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.storage.set(&self.key, &json)?;
        self.cart = next;
        Ok(())
    }

    fn fail(&self, product_id: ProductId, err: &CartError, notice: Notice) -> Outcome {
        error!(product_id = %product_id, error = %err, "Cart operation failed");
        self.notifier.notify(notice);
        Outcome::Failed
    }
}

fn read_cart<S: Storage>(storage: &S, key: &str) -> Result<Option<Cart>> {
    match storage.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
