//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use lapsus_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    /// Price formatted for display, e.g. `$165.000`.
    pub price_display: String,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            price_display: product.price.display(),
            product,
        }
    }
}

/// Catalog filter.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

/// List catalog products, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let products = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => state.catalog().products_in_category(category).await?,
        None => state.catalog().products().await?,
    };
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let product = find_product(&state, &ProductId::new(id)).await?;
    Ok(Json(product.into()))
}

/// Look up a catalog product or fail with 404.
pub(crate) async fn find_product(state: &AppState, id: &ProductId) -> Result<Product> {
    state
        .catalog()
        .product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {id}")))
}
