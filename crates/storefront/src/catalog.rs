//! Product catalog.
//!
//! Serves either the built-in seed products or active licenses from the
//! licenses API. Remote results are cached using `moka`.

use std::sync::Arc;

use moka::future::Cache;
use tracing::{debug, instrument};

use lapsus_core::adapter::DEFAULT_CATEGORY;
use lapsus_core::{Price, Product, ProductId, license_to_product};

use crate::config::{CatalogConfig, CatalogSource};
use crate::licenses::{ApiError, LicensesClient};

const SEED_FEATURES: [&str; 4] = [
    "🔑 Windows 10 & 11 (All Version) Supported",
    "🔗 Built-In Spoofer",
    "💾 Steam, Battle.Net Supported",
    "🏆 Alternate Accounts Preffered",
];

/// Cache key for remote catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CatalogKey {
    Active,
    Category(String),
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CatalogValue {
    Products(Arc<Vec<Product>>),
    Product(Option<Box<Product>>),
}

/// Product catalog shared across handlers.
///
/// Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

enum CatalogInner {
    Static(Vec<Product>),
    Remote {
        client: LicensesClient,
        cache: Cache<CatalogKey, CatalogValue>,
    },
}

impl Catalog {
    /// Build the catalog selected by `config`.
    #[must_use]
    pub fn new(config: &CatalogConfig, client: LicensesClient) -> Self {
        match config.source {
            CatalogSource::Static => Self::seeded(),
            CatalogSource::Remote => {
                let cache = Cache::builder()
                    .max_capacity(1000)
                    .time_to_live(config.cache_ttl)
                    .build();
                Self {
                    inner: Arc::new(CatalogInner::Remote { client, cache }),
                }
            }
        }
    }

    /// Catalog of the built-in seed products.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_products(seed_products())
    }

    /// Static catalog over the given products.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(CatalogInner::Static(products)),
        }
    }

    #[must_use]
    pub fn source(&self) -> CatalogSource {
        match *self.inner {
            CatalogInner::Static(_) => CatalogSource::Static,
            CatalogInner::Remote { .. } => CatalogSource::Remote,
        }
    }

    /// All products on sale.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the remote catalog cannot be fetched.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        match &*self.inner {
            CatalogInner::Static(products) => Ok(products.clone()),
            CatalogInner::Remote { client, cache } => {
                if let Some(CatalogValue::Products(products)) = cache.get(&CatalogKey::Active).await
                {
                    debug!("Cache hit for active products");
                    return Ok(products.as_ref().clone());
                }

                let licenses = client.list_active_licenses().await?;
                let products: Vec<Product> = licenses.iter().map(license_to_product).collect();

                cache
                    .insert(
                        CatalogKey::Active,
                        CatalogValue::Products(Arc::new(products.clone())),
                    )
                    .await;
                Ok(products)
            }
        }
    }

    /// Products in a category.
    ///
    /// Seed products all belong to the default category. Remote results only
    /// include active licenses.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the remote catalog cannot be fetched.
    #[instrument(skip(self))]
    pub async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        match &*self.inner {
            CatalogInner::Static(products) => {
                if category.eq_ignore_ascii_case(DEFAULT_CATEGORY) {
                    Ok(products.clone())
                } else {
                    Ok(Vec::new())
                }
            }
            CatalogInner::Remote { client, cache } => {
                let key = CatalogKey::Category(category.to_string());
                if let Some(CatalogValue::Products(products)) = cache.get(&key).await {
                    debug!("Cache hit for category");
                    return Ok(products.as_ref().clone());
                }

                let licenses = client.list_licenses_by_category(category).await?;
                let products: Vec<Product> = licenses
                    .iter()
                    .filter(|license| license.is_active)
                    .map(license_to_product)
                    .collect();

                cache
                    .insert(key, CatalogValue::Products(Arc::new(products.clone())))
                    .await;
                Ok(products)
            }
        }
    }

    /// One product by ID. A license the API reports as missing is `None`.
    ///
    /// Remote lookups resolve against the listings first, so products whose
    /// license has no ID (and got a generated one) stay reachable while
    /// their listing is cached.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for any remote failure other than 404.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Option<Product>, ApiError> {
        match &*self.inner {
            CatalogInner::Static(products) => {
                Ok(products.iter().find(|product| &product.id == id).cloned())
            }
            CatalogInner::Remote { client, cache } => {
                let key = CatalogKey::Product(id.clone());
                if let Some(CatalogValue::Product(product)) = cache.get(&key).await {
                    debug!("Cache hit for product");
                    return Ok(product.map(|product| *product));
                }

                if let Some(product) = listed_product(cache, id) {
                    debug!("Product found in cached listing");
                    return Ok(Some(product));
                }
                if let Some(product) = self
                    .products()
                    .await?
                    .into_iter()
                    .find(|product| &product.id == id)
                {
                    return Ok(Some(product));
                }

                let product = match client.get_license(&id.into()).await {
                    Ok(license) => Some(license_to_product(&license)),
                    Err(e) if e.is_not_found() => None,
                    Err(e) => return Err(e),
                };

                cache
                    .insert(key, CatalogValue::Product(product.clone().map(Box::new)))
                    .await;
                Ok(product)
            }
        }
    }

    /// Drop every cached lookup. No-op for the static catalog.
    pub async fn invalidate(&self) {
        if let CatalogInner::Remote { cache, .. } = &*self.inner {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
            debug!("Catalog cache invalidated");
        }
    }
}

/// Find `id` in any cached product listing.
fn listed_product(cache: &Cache<CatalogKey, CatalogValue>, id: &ProductId) -> Option<Product> {
    cache.iter().find_map(|(_, value)| match value {
        CatalogValue::Products(products) => {
            products.iter().find(|product| &product.id == id).cloned()
        }
        CatalogValue::Product(_) => None,
    })
}

/// The built-in products, one entry per ID.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    vec![
        seed_product(
            "warzone-unlockall",
            "WARZONE UNLOCKALL",
            165_000,
            "/assets/warzone.png",
            "Unlock all content for Call of Duty: Warzone",
        ),
        seed_product(
            "rainbow-six-unlockall",
            "RAINBOW SIX UNLOCKALL",
            150_000,
            "/assets/rainbowsix.png",
            "Unlock all content for Rainbow Six Siege",
        ),
    ]
}

fn seed_product(id: &str, name: &str, price: u64, image: &str, description: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::new(price),
        image: image.to_string(),
        description: description.to_string(),
        features: SEED_FEATURES.iter().map(ToString::to_string).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_catalog() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.source(), CatalogSource::Static);

        let products = catalog.products().await.unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["warzone-unlockall", "rainbow-six-unlockall"]);
        assert_eq!(products[0].price, Price::new(165_000));
        assert_eq!(products[1].price, Price::new(150_000));
    }

    #[tokio::test]
    async fn test_seed_lookup() {
        let catalog = Catalog::seeded();
        let product = catalog
            .product(&ProductId::new("rainbow-six-unlockall"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.name, "RAINBOW SIX UNLOCKALL");

        assert!(
            catalog
                .product(&ProductId::new("nope"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_seed_category() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.products_in_category("gaming").await.unwrap().len(), 2);
        assert!(catalog.products_in_category("Office").await.unwrap().is_empty());
    }
}
