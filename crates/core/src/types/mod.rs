//! Core types for the Lapsus storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod license;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use license::{CreateLicenseRequest, License, UpdateLicenseRequest, ValidationError};
pub use price::Price;
pub use product::Product;
pub use status::*;
