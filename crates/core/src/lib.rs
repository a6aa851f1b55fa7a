//! Lapsus Core - Shared types and storefront logic.
//!
//! This crate provides the types and pure logic used by every Lapsus component:
//! - `storefront` - JSON storefront server and licenses API client
//! - `cli` - Command-line tools for license management and the local cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure state machines - no I/O, no
//! HTTP clients, no persistence. Persistence of the cart lives in the
//! storefront crate, which wraps [`cart::Cart`] with a storage backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, licenses and validation
//! - [`cart`] - Cart lines with eagerly derived total and item count
//! - [`modal`] - Product/cart overlay state and its reducer
//! - [`adapter`] - License to product mapping and its lossy inverse

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod adapter;
pub mod cart;
pub mod modal;
pub mod types;

pub use adapter::{license_to_product, product_to_license};
pub use cart::{Cart, CartLine, CartSnapshot};
pub use modal::{ModalAction, ModalState};
pub use types::*;
