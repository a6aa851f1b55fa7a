//! Cart route handlers.
//!
//! Products are looked up in the catalog before the cart lock is taken, so the
//! cart mutex is never held across a licenses API call.

use std::num::NonZeroU32;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use lapsus_core::{CartSnapshot, ProductId};

use super::products::find_product;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    #[serde(flatten)]
    pub snapshot: CartSnapshot,
    /// Total formatted for display.
    pub total_display: String,
}

impl From<CartSnapshot> for CartView {
    fn from(snapshot: CartSnapshot) -> Self {
        Self {
            total_display: snapshot.total.display(),
            snapshot,
        }
    }
}

/// Item count badge.
#[derive(Debug, Clone, Serialize)]
pub struct CartCount {
    pub item_count: u64,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove item form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

pub(crate) const fn default_quantity() -> i64 {
    1
}

/// Parse a quantity for adding. Anything below 1 is rejected.
pub(crate) fn positive_quantity(quantity: i64) -> Result<NonZeroU32> {
    u32::try_from(quantity)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| AppError::BadRequest(format!("quantity must be at least 1, got {quantity}")))
}

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(state.cart().lock().await.snapshot().into())
}

/// Add a catalog product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let quantity = positive_quantity(form.quantity)?;
    let product = find_product(&state, &ProductId::new(form.product_id)).await?;

    let mut cart = state.cart().lock().await;
    cart.add_item(&product, quantity);
    info!(product_id = %product.id, quantity = quantity.get(), "Added to cart");
    add_breadcrumb("cart", "Added to cart", &[("product_id", product.id.as_str())]);

    Ok(Json(cart.snapshot().into()))
}

/// Set a line's quantity. Quantities below 1 remove the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(form): Json<UpdateCartForm>,
) -> Json<CartView> {
    let quantity = u32::try_from(form.quantity.max(0)).unwrap_or(u32::MAX);
    let mut cart = state.cart().lock().await;
    cart.update_quantity(&ProductId::new(form.product_id), quantity);
    Json(cart.snapshot().into())
}

/// Remove a line. Missing lines are ignored.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<RemoveFromCartForm>,
) -> Json<CartView> {
    let mut cart = state.cart().lock().await;
    cart.remove_item(&ProductId::new(form.product_id));
    Json(cart.snapshot().into())
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut cart = state.cart().lock().await;
    cart.clear();
    Json(cart.snapshot().into())
}

/// Item count for the cart badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        item_count: state.cart().lock().await.item_count(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_quantity() {
        assert_eq!(positive_quantity(3).unwrap().get(), 3);
        assert!(matches!(positive_quantity(0), Err(AppError::BadRequest(_))));
        assert!(matches!(positive_quantity(-2), Err(AppError::BadRequest(_))));
        assert!(matches!(
            positive_quantity(i64::from(u32::MAX) + 1),
            Err(AppError::BadRequest(_))
        ));
    }
}
