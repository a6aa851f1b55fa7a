//! Session storage keys.

/// Keys under which the storefront persists session state.
pub mod keys {
    /// JSON array of cart lines.
    pub const CART_ITEMS: &str = "cart_items";

    /// Total item count as a decimal string. Informational only: on load the
    /// count is derived from the lines.
    pub const CART_ITEM_COUNT: &str = "cart_item_count";
}
