//! Display-side product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as shown in the storefront catalog.
///
/// Immutable once loaded from the seed catalog or adapted from a license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URI.
    pub image: String,
    /// Long-form description.
    pub description: String,
    /// Feature bullet points, in display order.
    pub features: Vec<String>,
}
