//! License administration and the remote catalog through the storefront.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;

use lapsus_core::License;
use lapsus_integration_tests::{FakeLicensesApi, license, remote_state, send, send_json};
use lapsus_storefront::storage::MemoryStorage;

fn listed(id: &str, name: &str, price: f64, active: bool) -> License {
    License {
        is_active: active,
        category: Some("Gaming".to_string()),
        ..license(id, name, price)
    }
}

async fn setup() -> (FakeLicensesApi, axum::Router) {
    let api = FakeLicensesApi::start(vec![
        listed("lic-1", "WARZONE UNLOCKALL", 165_000.0, true),
        listed("lic-2", "OLD LICENSE", 10_000.0, false),
    ])
    .await;
    let app = lapsus_storefront::app(remote_state(&api, Box::new(MemoryStorage::new())));
    (api, app)
}

#[tokio::test]
async fn test_admin_list() {
    let (_api, app) = setup().await;

    let (status, all) = send_json(&app, Method::GET, "/admin/licenses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, active) = send_json(&app, Method::GET, "/admin/licenses?active=true", None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["license_id"], "lic-1");
}

#[tokio::test]
async fn test_admin_get() {
    let (_api, app) = setup().await;

    let (status, found) = send_json(&app, Method::GET, "/admin/licenses/lic-2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["product_name"], "OLD LICENSE");

    let (status, _) = send_json(&app, Method::GET, "/admin/licenses/none", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_create_validates_before_sending() {
    let (api, app) = setup().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/admin/licenses",
        Some(json!({ "product_name": "   ", "price": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("product_name"));

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/admin/licenses",
        Some(json!({ "product_name": "X", "price": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/admin/licenses",
        Some(json!({ "product_name": "X", "price": 1, "stock_quantity": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn test_admin_mutations_refresh_catalog() {
    let (api, app) = setup().await;

    let (_, products) = send_json(&app, Method::GET, "/products", None).await;
    assert_eq!(products.as_array().unwrap().len(), 1);

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/admin/licenses",
        Some(json!({
            "product_name": "APEX UNLOCKALL",
            "price": 120000,
            "supported_platforms": "Windows 11",
            "has_spoofer": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let new_id = created["license_id"].as_str().unwrap().to_string();

    let (_, products) = send_json(&app, Method::GET, "/products", None).await;
    assert_eq!(products.as_array().unwrap().len(), 2);
    assert_eq!(products[1]["id"], new_id);
    assert_eq!(
        products[1]["features"],
        json!(["🔑 Windows 11", "🔗 Built-In Spoofer"])
    );

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        &format!("/admin/licenses/{new_id}"),
        Some(json!({ "price": 130000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["product_name"], "APEX UNLOCKALL");

    let (_, product) = send_json(&app, Method::GET, &format!("/products/{new_id}"), None).await;
    assert_eq!(product["price"], 130_000);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/admin/licenses/{new_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&app, Method::GET, &format!("/products/{new_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(api.licenses().len(), 2);
}

#[tokio::test]
async fn test_admin_update_rejects_empty_patch() {
    let (api, app) = setup().await;

    let (status, _) = send_json(&app, Method::PUT, "/admin/licenses/lic-1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/admin/licenses/missing",
        Some(json!({ "price": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(api.requests().len(), 1);
}

#[tokio::test]
async fn test_license_draft() {
    let (_api, app) = setup().await;

    let (status, draft) = send_json(
        &app,
        Method::GET,
        "/admin/products/lic-1/license-draft",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["product_name"], "WARZONE UNLOCKALL");
    assert_eq!(draft["description"], "License for WARZONE UNLOCKALL");
    assert_eq!(draft["stock_quantity"], 10);
    assert_eq!(draft["category"], "Gaming");
    assert_eq!(draft["has_spoofer"], true);
}

#[tokio::test]
async fn test_api_failure_is_bad_gateway() {
    let (api, app) = setup().await;
    api.fail_with(StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send_json(&app, Method::GET, "/admin/licenses", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "External service error" }));

    let (status, _) = send_json(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_license_without_id_is_purchasable() {
    let api = FakeLicensesApi::start(vec![License {
        license_id: None,
        ..listed("ignored", "VALORANT UNLOCKALL", 90_000.0, true)
    }])
    .await;
    let app = lapsus_storefront::app(remote_state(&api, Box::new(MemoryStorage::new())));

    let (_, products) = send_json(&app, Method::GET, "/products", None).await;
    let id = products[0]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("license-"));

    let (_, again) = send_json(&app, Method::GET, "/products", None).await;
    assert_eq!(again[0]["id"], id);

    let (status, product) = send_json(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["name"], "VALORANT UNLOCKALL");

    let (status, modal) =
        send_json(&app, Method::POST, &format!("/modal/product/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(modal["selected_product"]["id"], id);

    let (status, cart) = send_json(
        &app,
        Method::POST,
        "/cart/add",
        Some(json!({ "product_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["total"], 90_000);
    assert!(
        api.requests()
            .iter()
            .all(|request| !request.path.contains("license-"))
    );
}
