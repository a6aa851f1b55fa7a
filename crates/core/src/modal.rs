//! Product and cart overlay state.
//!
//! The product modal and the cart modal are independent. The product modal is
//! open exactly when a product is selected, so "open without a selection"
//! cannot be represented.

use serde::Serialize;

use crate::types::Product;

/// Transitions for [`ModalState::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    OpenProduct(Product),
    CloseProduct,
    OpenCart,
    CloseCart,
}

/// Overlay state for one storefront session. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "ModalView")]
pub struct ModalState {
    selected_product: Option<Product>,
    cart_open: bool,
}

impl ModalState {
    /// Both modals closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a transition. Every action is legal from every state.
    #[must_use]
    pub fn reduce(self, action: ModalAction) -> Self {
        match action {
            ModalAction::OpenProduct(product) => Self {
                selected_product: Some(product),
                ..self
            },
            ModalAction::CloseProduct => Self {
                selected_product: None,
                ..self
            },
            ModalAction::OpenCart => Self {
                cart_open: true,
                ..self
            },
            ModalAction::CloseCart => Self {
                cart_open: false,
                ..self
            },
        }
    }

    /// Apply a transition in place.
    pub fn dispatch(&mut self, action: ModalAction) {
        *self = std::mem::take(self).reduce(action);
    }

    #[must_use]
    pub const fn product_modal_open(&self) -> bool {
        self.selected_product.is_some()
    }

    #[must_use]
    pub const fn cart_modal_open(&self) -> bool {
        self.cart_open
    }

    #[must_use]
    pub const fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }
}

/// Wire shape of [`ModalState`].
#[derive(Debug, Clone, Serialize)]
pub struct ModalView {
    pub product_modal_open: bool,
    pub cart_modal_open: bool,
    pub selected_product: Option<Product>,
}

impl From<ModalState> for ModalView {
    fn from(state: ModalState) -> Self {
        Self {
            product_modal_open: state.product_modal_open(),
            cart_modal_open: state.cart_open,
            selected_product: state.selected_product,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn product() -> Product {
        Product {
            id: ProductId::new("warzone-unlockall"),
            name: "WARZONE UNLOCKALL".to_string(),
            price: Price::new(165_000),
            image: "/warzone.png".to_string(),
            description: String::new(),
            features: Vec::new(),
        }
    }

    #[test]
    fn test_initial_state_is_closed() {
        let state = ModalState::new();
        assert!(!state.product_modal_open());
        assert!(!state.cart_modal_open());
        assert!(state.selected_product().is_none());
    }

    #[test]
    fn test_open_product_selects_it() {
        let state = ModalState::new().reduce(ModalAction::OpenProduct(product()));
        assert!(state.product_modal_open());
        assert_eq!(state.selected_product(), Some(&product()));
    }

    #[test]
    fn test_close_product_clears_selection() {
        let state = ModalState::new()
            .reduce(ModalAction::OpenProduct(product()))
            .reduce(ModalAction::CloseProduct);
        assert!(!state.product_modal_open());
        assert!(state.selected_product().is_none());
    }

    #[test]
    fn test_cart_modal_is_independent_of_product_modal() {
        let mut state = ModalState::new();
        state.dispatch(ModalAction::OpenProduct(product()));
        state.dispatch(ModalAction::OpenCart);
        assert!(state.product_modal_open());
        assert!(state.cart_modal_open());

        state.dispatch(ModalAction::CloseProduct);
        assert!(state.cart_modal_open());

        state.dispatch(ModalAction::CloseCart);
        assert_eq!(state, ModalState::new());
    }

    #[test]
    fn test_transitions_are_idempotent() {
        let once = ModalState::new().reduce(ModalAction::OpenCart);
        let twice = once.clone().reduce(ModalAction::OpenCart);
        assert_eq!(once, twice);

        let closed = ModalState::new().reduce(ModalAction::CloseProduct);
        assert_eq!(closed, ModalState::new());
    }

    #[test]
    fn test_serializes_flags() {
        let state = ModalState::new().reduce(ModalAction::OpenCart);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "product_modal_open": false,
                "cart_modal_open": true,
                "selected_product": null,
            })
        );
    }
}
