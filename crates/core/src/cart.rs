//! Shopping cart state with eagerly derived totals.
//!
//! [`Cart`] is the single source of truth for cart lines. Every mutation
//! recomputes `total` and `item_count` before returning, so reads never see
//! derived fields that disagree with the lines.
//!
//! Quantities passed to [`Cart::add_item`] are `NonZeroU32`: a non-positive
//! quantity is rejected at the boundary that parses user input and can never
//! reach the cart.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// One cart line. There is at most one line per product ID.
///
/// The line carries the product it was added with, so the price used for
/// derivation survives a reload without a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// ID of the product on this line.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Read-only view of the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub item_count: u64,
}

/// The cart state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    total: Price,
    item_count: u64,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously persisted lines.
    ///
    /// Lines with quantity zero are dropped and duplicate product IDs are
    /// merged, so the one-line-per-product invariant holds even for
    /// hand-edited input.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if let Some(quantity) = NonZeroU32::new(line.quantity) {
                cart.merge_line(line.product, quantity);
            }
        }
        cart.recompute();
        cart
    }

    /// Add `quantity` of `product`, merging into an existing line if present.
    pub fn add_item(&mut self, product: &Product, quantity: NonZeroU32) {
        self.merge_line(product.clone(), quantity);
        self.recompute();
    }

    /// Set the quantity of a line. A quantity of zero removes the line.
    ///
    /// Returns `false` if no line exists for `product_id`.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return self.remove_item(product_id);
        };

        let Some(line) = self.line_mut(product_id) else {
            return false;
        };
        line.quantity = quantity.get();
        self.recompute();
        true
    }

    /// Remove the line for `product_id`.
    ///
    /// Returns `false` (and changes nothing) if there is no such line.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|line| line.product_id() != product_id);
        let removed = self.lines.len() < len_before;
        if removed {
            self.recompute();
        }
        removed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    /// Copy of the current lines and derived fields.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.total,
            item_count: self.item_count,
        }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of line totals.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Sum of line quantities.
    #[must_use]
    pub const fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    fn merge_line(&mut self, product: Product, quantity: NonZeroU32) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity.get());
        } else {
            self.lines.push(CartLine {
                product,
                quantity: quantity.get(),
            });
        }
    }

    fn recompute(&mut self) {
        self.total = self.lines.iter().map(CartLine::line_total).sum();
        self.item_count = self
            .lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum();
    }
}

impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        Self::from_lines(snapshot.lines)
    }
}
