//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use lapsus_core::ModalState;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::licenses::{ApiError, LicensesClient};
use crate::storage::{FileStorage, SessionStorage};

/// Storage backend behind the shared cart.
pub type DynStorage = Box<dyn SessionStorage + Send>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The server holds a single
/// storefront session, so cart and modal state live here behind async mutexes.
/// Guards must never be held across a licenses API call.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    licenses: LicensesClient,
    catalog: Catalog,
    cart: Mutex<CartStore<DynStorage>>,
    modal: Mutex<ModalState>,
}

impl AppState {
    /// Create application state with a file-backed cart at
    /// `config.cart_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let licenses = LicensesClient::new(&config.api)?;
        let catalog = Catalog::new(&config.catalog, licenses.clone());
        let storage = FileStorage::new(&config.cart_path);
        Ok(Self::from_parts(config, licenses, catalog, Box::new(storage)))
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        licenses: LicensesClient,
        catalog: Catalog,
        storage: DynStorage,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                licenses,
                catalog,
                cart: Mutex::new(CartStore::load(storage)),
                modal: Mutex::new(ModalState::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the licenses API client.
    #[must_use]
    pub fn licenses(&self) -> &LicensesClient {
        &self.inner.licenses
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The session cart.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore<DynStorage>> {
        &self.inner.cart
    }

    /// The session modal state.
    #[must_use]
    pub fn modal(&self) -> &Mutex<ModalState> {
        &self.inner.modal
    }
}
