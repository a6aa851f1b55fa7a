//! Product and cart overlay handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use lapsus_core::{ModalAction, ModalState, ProductId};

use super::cart::{CartView, default_quantity, positive_quantity};
use super::products::find_product;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Quantity chosen in the product modal.
#[derive(Debug, Deserialize)]
pub struct ModalAddForm {
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Result of adding from the product modal.
#[derive(Debug, Serialize)]
pub struct ModalAddResponse {
    pub cart: CartView,
    pub modal: ModalState,
}

/// Current overlay state.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<ModalState> {
    Json(state.modal().lock().await.clone())
}

/// Open the product modal for a catalog product.
#[instrument(skip(state))]
pub async fn open_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ModalState>> {
    let product = find_product(&state, &ProductId::new(id)).await?;
    Ok(Json(dispatch(&state, ModalAction::OpenProduct(product)).await))
}

/// Close the product modal.
#[instrument(skip(state))]
pub async fn close_product(State(state): State<AppState>) -> Json<ModalState> {
    Json(dispatch(&state, ModalAction::CloseProduct).await)
}

/// Open the cart modal.
#[instrument(skip(state))]
pub async fn open_cart(State(state): State<AppState>) -> Json<ModalState> {
    Json(dispatch(&state, ModalAction::OpenCart).await)
}

/// Close the cart modal.
#[instrument(skip(state))]
pub async fn close_cart(State(state): State<AppState>) -> Json<ModalState> {
    Json(dispatch(&state, ModalAction::CloseCart).await)
}

/// Add the selected product to the cart, then close the product modal.
///
/// The body is optional; an empty body adds one unit.
#[instrument(skip(state, body))]
pub async fn add_selected(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ModalAddResponse>> {
    let quantity = if body.is_empty() {
        default_quantity()
    } else {
        serde_json::from_slice::<ModalAddForm>(&body)
            .map_err(|e| AppError::BadRequest(e.to_string()))?
            .quantity
    };
    let quantity = positive_quantity(quantity)?;

    let mut modal = state.modal().lock().await;
    let product = modal
        .selected_product()
        .cloned()
        .ok_or_else(|| AppError::Conflict("No product selected".to_string()))?;

    let cart = {
        let mut cart = state.cart().lock().await;
        cart.add_item(&product, quantity);
        cart.snapshot()
    };
    modal.dispatch(ModalAction::CloseProduct);
    info!(product_id = %product.id, quantity = quantity.get(), "Added from product modal");

    Ok(Json(ModalAddResponse {
        cart: cart.into(),
        modal: modal.clone(),
    }))
}

async fn dispatch(state: &AppState, action: ModalAction) -> ModalState {
    let mut modal = state.modal().lock().await;
    modal.dispatch(action);
    modal.clone()
}
