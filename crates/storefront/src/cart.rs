//! Cart store persisted to session storage.
//!
//! [`CartStore`] wraps the pure [`Cart`] and writes both session keys after
//! every mutation. Storage failures never fail a cart operation: they are
//! logged and the in-memory cart stays authoritative.

use std::num::NonZeroU32;

use tracing::{debug, warn};

use lapsus_core::{Cart, CartLine, CartSnapshot, Price, Product, ProductId};

use crate::models::session_keys;
use crate::storage::SessionStorage;

/// A cart bound to a storage backend.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
}

impl<S: SessionStorage> CartStore<S> {
    /// Restore the cart from `storage`.
    ///
    /// Missing or unreadable data yields an empty cart. The stored item count
    /// is ignored; it is always re-derived from the lines.
    pub fn load(storage: S) -> Self {
        let cart = match storage.get(session_keys::CART_ITEMS) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => Cart::from_lines(lines),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable persisted cart");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart");
                Cart::new()
            }
        };

        debug!(
            lines = cart.lines().len(),
            item_count = cart.item_count(),
            "Cart loaded"
        );
        Self { cart, storage }
    }

    /// Add `quantity` of `product`, merging into an existing line.
    pub fn add_item(&mut self, product: &Product, quantity: NonZeroU32) {
        self.cart.add_item(product, quantity);
        self.persist();
    }

    /// Set a line's quantity; zero removes it. Returns `false` if there was no
    /// such line.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        let changed = self.cart.update_quantity(product_id, quantity);
        self.persist();
        changed
    }

    /// Remove a line. Returns `false` if there was no such line.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let changed = self.cart.remove_item(product_id);
        self.persist();
        changed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub const fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        let lines = match serde_json::to_string(self.cart.lines()) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(session_keys::CART_ITEMS, &lines) {
            warn!(error = %e, "Failed to persist cart items");
            return;
        }
        if let Err(e) = self
            .storage
            .set(session_keys::CART_ITEM_COUNT, &self.cart.item_count().to_string())
        {
            warn!(error = %e, "Failed to persist cart item count");
        }
    }
}
