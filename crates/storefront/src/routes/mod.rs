//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                         - Health check
//!
//! # Products
//! GET    /products[?category=c]          - Catalog listing
//! GET    /products/{id}                  - Product detail
//!
//! # Cart (JSON bodies)
//! GET    /cart                           - Cart snapshot
//! POST   /cart/add                       - {product_id, quantity?=1}
//! POST   /cart/update                    - {product_id, quantity}; < 1 removes
//! POST   /cart/remove                    - {product_id}
//! POST   /cart/clear                     - Empty the cart
//! GET    /cart/count                     - Cart count badge
//!
//! # Modals
//! GET    /modal                          - Overlay state
//! POST   /modal/product/{id}             - Open product modal
//! DELETE /modal/product                  - Close product modal
//! POST   /modal/product/add              - Add selected product, close modal
//! POST   /modal/cart                     - Open cart modal
//! DELETE /modal/cart                     - Close cart modal
//!
//! # Auth
//! GET    /login                          - Not implemented (501)
//! POST   /login                          - Not implemented (501)
//!
//! # Admin
//! GET    /admin/licenses[?active=true]   - License listing
//! POST   /admin/licenses                 - Create license
//! GET    /admin/licenses/{id}            - License detail
//! PUT    /admin/licenses/{id}            - Partial update
//! DELETE /admin/licenses/{id}            - Delete license
//! GET    /admin/products/{id}/license-draft - Edit-form seed for a product
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod modal;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the modal routes router.
pub fn modal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(modal::show))
        .route("/product", axum::routing::delete(modal::close_product))
        .route("/product/add", post(modal::add_selected))
        .route("/product/{id}", post(modal::open_product))
        .route("/cart", post(modal::open_cart).delete(modal::close_cart))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/licenses", get(admin::index).post(admin::create))
        .route(
            "/licenses/{id}",
            get(admin::show).put(admin::update).delete(admin::destroy),
        )
        .route("/products/{id}/license-draft", get(admin::license_draft))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Modal routes
        .nest("/modal", modal_routes())
        // Login stub
        .route("/login", get(auth::login_page).post(auth::login))
        // Admin routes
        .nest("/admin", admin_routes())
}
