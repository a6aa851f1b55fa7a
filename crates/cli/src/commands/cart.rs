//! Local cart commands.
//!
//! The cart is the same file-backed store the storefront server uses, so
//! changes persist across invocations.

use std::num::NonZeroU32;

use tracing::info;

use lapsus_core::{CartSnapshot, ProductId};
use lapsus_storefront::cart::CartStore;
use lapsus_storefront::catalog::Catalog;
use lapsus_storefront::storage::SessionStorage;

use super::CommandError;

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns an error if `quantity` is below 1, the product is not in the
/// catalog, or the catalog cannot be fetched.
pub async fn add<S: SessionStorage>(
    store: &mut CartStore<S>,
    catalog: &Catalog,
    product_id: &str,
    quantity: i64,
) -> Result<CartSnapshot, CommandError> {
    let quantity = u32::try_from(quantity)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| {
            CommandError::Invalid(format!("quantity must be at least 1, got {quantity}"))
        })?;

    let id = ProductId::new(product_id);
    let product = catalog
        .product(&id)
        .await?
        .ok_or_else(|| CommandError::NotFound(format!("product {id}")))?;

    store.add_item(&product, quantity);
    info!(product_id = %id, quantity = quantity.get(), "Added to cart");
    Ok(store.snapshot())
}

/// Set a line's quantity; below 1 removes the line.
pub fn set<S: SessionStorage>(
    store: &mut CartStore<S>,
    product_id: &str,
    quantity: i64,
) -> CartSnapshot {
    let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
    if !store.update_quantity(&ProductId::new(product_id), quantity) {
        info!(product_id, "Product not in cart");
    }
    store.snapshot()
}

/// Remove a line.
pub fn remove<S: SessionStorage>(store: &mut CartStore<S>, product_id: &str) -> CartSnapshot {
    if !store.remove_item(&ProductId::new(product_id)) {
        info!(product_id, "Product not in cart");
    }
    store.snapshot()
}

/// Empty the cart.
pub fn clear<S: SessionStorage>(store: &mut CartStore<S>) -> CartSnapshot {
    store.clear();
    store.snapshot()
}

/// Human-readable cart summary.
#[must_use]
pub fn render(snapshot: &CartSnapshot) -> String {
    if snapshot.lines.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out = String::new();
    for line in &snapshot.lines {
        out.push_str(&format!(
            "{:<28} x{:<4} {}\n",
            line.product.name,
            line.quantity,
            line.line_total().display()
        ));
    }
    out.push_str(&format!(
        "{} items, total {}",
        snapshot.item_count,
        snapshot.total.display()
    ));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lapsus_core::Price;
    use lapsus_storefront::storage::FileStorage;

    use super::*;

    #[tokio::test]
    async fn test_cart_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        let catalog = Catalog::seeded();

        {
            let mut store = CartStore::load(FileStorage::new(&path));
            add(&mut store, &catalog, "warzone-unlockall", 1).await.unwrap();
            add(&mut store, &catalog, "rainbow-six-unlockall", 2)
                .await
                .unwrap();
        }

        let mut store = CartStore::load(FileStorage::new(&path));
        assert_eq!(store.total(), Price::new(465_000));
        assert_eq!(store.item_count(), 3);

        let snapshot = set(&mut store, "rainbow-six-unlockall", 0);
        assert_eq!(snapshot.item_count, 1);

        let snapshot = clear(&mut CartStore::load(FileStorage::new(&path)));
        assert_eq!(snapshot, CartSnapshot::default());
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CartStore::load(FileStorage::new(dir.path().join("cart.json")));
        let catalog = Catalog::seeded();

        assert!(matches!(
            add(&mut store, &catalog, "warzone-unlockall", 0).await,
            Err(CommandError::Invalid(_))
        ));
        assert!(matches!(
            add(&mut store, &catalog, "unknown", 1).await,
            Err(CommandError::NotFound(_))
        ));
        assert!(store.snapshot().lines.is_empty());
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&CartSnapshot::default()), "Cart is empty");
    }
}
