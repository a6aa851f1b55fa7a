//! Integration test helpers for Lapsus.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lapsus-integration-tests
//! ```
//!
//! Nothing external is required: [`FakeLicensesApi`] serves an in-memory
//! licenses resource on an ephemeral local port, and storefront routers are
//! driven in-process with `tower::ServiceExt::oneshot`.
//!
//! # Test Categories
//!
//! - `licenses_client` - `LicensesClient` against the fake API
//! - `storefront_routes` - Catalog, cart, modal and login routes
//! - `admin_routes` - License administration through the storefront
//! - `cart_persistence` - Cart survival across process restarts

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Query, State},
    http::{HeaderMap, Method, Request, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tower::ServiceExt;

use lapsus_core::{CreateLicenseRequest, License, LicenseId, UpdateLicenseRequest};
use lapsus_storefront::catalog::Catalog;
use lapsus_storefront::config::{ApiConfig, CatalogSource, StorefrontConfig};
use lapsus_storefront::licenses::LicensesClient;
use lapsus_storefront::state::{AppState, DynStorage};
use lapsus_storefront::storage::MemoryStorage;

/// One request as seen by the fake API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct FakeStore {
    licenses: Vec<License>,
    next_id: u64,
    requests: Vec<RecordedRequest>,
    fail_with: Option<StatusCode>,
}

/// In-memory licenses API served over real HTTP.
pub struct FakeLicensesApi {
    addr: SocketAddr,
    store: Arc<Mutex<FakeStore>>,
    server: tokio::task::JoinHandle<()>,
}

impl FakeLicensesApi {
    /// Start a server on `127.0.0.1:0` holding `licenses`.
    pub async fn start(licenses: Vec<License>) -> Self {
        let store = Arc::new(Mutex::new(FakeStore {
            next_id: u64::try_from(licenses.len()).expect("license count fits u64") + 1,
            licenses,
            ..FakeStore::default()
        }));

        let router = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&store));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake API");
        let addr = listener.local_addr().expect("Failed to read fake API address");
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Fake API server error");
        });

        Self {
            addr,
            store,
            server,
        }
    }

    /// Base URL, without the resource path.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.base_url(), "/licenses").expect("valid fake API URL")
    }

    /// A client for this server that ignores proxy environment variables.
    #[must_use]
    pub fn client(&self) -> LicensesClient {
        let http = LicensesClient::http_builder()
            .no_proxy()
            .build()
            .expect("Failed to build HTTP client");
        LicensesClient::with_client(http, &self.api_config())
    }

    /// Make every subsequent request fail with `status`.
    pub fn fail_with(&self, status: StatusCode) {
        self.lock().fail_with = Some(status);
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Licenses currently stored.
    #[must_use]
    pub fn licenses(&self) -> Vec<License> {
        self.lock().licenses.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeStore> {
        self.store.lock().expect("fake store poisoned")
    }
}

impl Drop for FakeLicensesApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(store): State<Arc<Mutex<FakeStore>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let body_json: Option<Value> = serde_json::from_slice(&body).ok();
    let mut store = store.lock().expect("fake store poisoned");
    store.requests.push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body_json.clone(),
    });

    if let Some(status) = store.fail_with {
        return (status, "simulated failure").into_response();
    }

    let segments: Vec<&str> = uri.path().trim_matches('/').split('/').collect();
    match (method, segments.as_slice()) {
        (Method::GET, ["licenses"]) => {
            let licenses: Vec<License> = store
                .licenses
                .iter()
                .filter(|l| {
                    params
                        .get("is_active")
                        .is_none_or(|v| l.is_active == (v == "true"))
                })
                .filter(|l| {
                    params
                        .get("category")
                        .is_none_or(|c| l.category.as_deref() == Some(c.as_str()))
                })
                .cloned()
                .collect();
            Json(licenses).into_response()
        }
        (Method::POST, ["licenses"]) => {
            let Some(request) = body_json.and_then(|v| {
                serde_json::from_value::<CreateLicenseRequest>(v).ok()
            }) else {
                return StatusCode::UNPROCESSABLE_ENTITY.into_response();
            };
            let id = format!("lic-{}", store.next_id);
            store.next_id += 1;
            let license = License {
                license_id: Some(LicenseId::new(id)),
                product_name: request.product_name,
                description: request.description,
                price: request.price,
                supported_platforms: request.supported_platforms,
                supported_launchers: request.supported_launchers,
                recommendations: request.recommendations,
                product_version: request.product_version,
                has_spoofer: request.has_spoofer,
                language: request.language,
                create_at: Some("2024-01-01T00:00:00".to_string()),
                update_at: None,
                stock_quantity: request.stock_quantity,
                is_active: request.is_active,
                image_url: request.image_url,
                category: request.category,
            };
            store.licenses.push(license.clone());
            (StatusCode::CREATED, Json(license)).into_response()
        }
        (method, ["licenses", id]) => {
            let matches = |l: &License| l.license_id.as_ref().is_some_and(|lid| lid.as_str() == *id);
            match method {
                Method::GET => store.licenses.iter().find(|l| matches(l)).map_or_else(
                    || (StatusCode::NOT_FOUND, "License not found").into_response(),
                    |license| Json(license.clone()).into_response(),
                ),
                Method::PUT => {
                    let Some(patch) = body_json
                        .and_then(|v| serde_json::from_value::<UpdateLicenseRequest>(v).ok())
                    else {
                        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
                    };
                    let Some(license) = store.licenses.iter_mut().find(|l| matches(l)) else {
                        return (StatusCode::NOT_FOUND, "License not found").into_response();
                    };
                    apply_patch(license, patch);
                    Json(license.clone()).into_response()
                }
                Method::DELETE => {
                    let before = store.licenses.len();
                    store.licenses.retain(|l| !matches(l));
                    if store.licenses.len() == before {
                        return (StatusCode::NOT_FOUND, "License not found").into_response();
                    }
                    StatusCode::NO_CONTENT.into_response()
                }
                _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn apply_patch(license: &mut License, patch: UpdateLicenseRequest) {
    if let Some(v) = patch.product_name {
        license.product_name = v;
    }
    if let Some(v) = patch.description {
        license.description = Some(v);
    }
    if let Some(v) = patch.price {
        license.price = v;
    }
    if let Some(v) = patch.supported_platforms {
        license.supported_platforms = Some(v);
    }
    if let Some(v) = patch.supported_launchers {
        license.supported_launchers = Some(v);
    }
    if let Some(v) = patch.recommendations {
        license.recommendations = Some(v);
    }
    if let Some(v) = patch.product_version {
        license.product_version = Some(v);
    }
    if let Some(v) = patch.has_spoofer {
        license.has_spoofer = v;
    }
    if let Some(v) = patch.language {
        license.language = Some(v);
    }
    if let Some(v) = patch.stock_quantity {
        license.stock_quantity = v;
    }
    if let Some(v) = patch.is_active {
        license.is_active = v;
    }
    if let Some(v) = patch.image_url {
        license.image_url = Some(v);
    }
    if let Some(v) = patch.category {
        license.category = Some(v);
    }
    license.update_at = Some("2024-01-02T00:00:00".to_string());
}

/// A license with only the required fields set.
#[must_use]
pub fn license(id: &str, name: &str, price: f64) -> License {
    License {
        license_id: Some(LicenseId::new(id)),
        product_name: name.to_string(),
        description: None,
        price,
        supported_platforms: None,
        supported_launchers: None,
        recommendations: None,
        product_version: None,
        has_spoofer: false,
        language: None,
        create_at: None,
        update_at: None,
        stock_quantity: 0,
        is_active: true,
        image_url: None,
        category: None,
    }
}

/// Default configuration, independent of the process environment.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig::from_vars(|_| None).expect("defaults are valid")
}

/// Storefront state over the seed catalog and in-memory cart storage.
#[must_use]
pub fn seeded_state() -> AppState {
    let config = test_config();
    let client = LicensesClient::new(&config.api).expect("Failed to build HTTP client");
    AppState::from_parts(config, client, Catalog::seeded(), Box::new(MemoryStorage::new()))
}

/// Storefront state whose catalog and admin routes use `api`.
#[must_use]
pub fn remote_state(api: &FakeLicensesApi, storage: DynStorage) -> AppState {
    let mut config = test_config();
    config.api = api.api_config();
    config.catalog.source = CatalogSource::Remote;
    let client = api.client();
    let catalog = Catalog::new(&config.catalog, client.clone());
    AppState::from_parts(config, client, catalog, storage)
}

/// Send one request through a router and return the status and raw body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Bytes) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, bytes)
}

/// Like [`send`], decoding the body as JSON.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };
    (status, json)
}
