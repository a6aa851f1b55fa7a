//! Lapsus Storefront library.
//!
//! This crate provides the storefront functionality as a library, allowing it
//! to be tested and reused by the CLI.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`licenses`] - Licenses REST API client
//! - [`catalog`] - Product catalog (seed or remote, cached)
//! - [`storage`] - Session key-value storage backends
//! - [`cart`] - Cart store persisted to session storage
//! - [`routes`] - JSON HTTP handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod licenses;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the storefront router with all middleware applied.
pub fn app(state: AppState) -> Router {
    let cors = if state.config().environment.is_development() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the licenses API.
async fn health() -> &'static str {
    "ok"
}
