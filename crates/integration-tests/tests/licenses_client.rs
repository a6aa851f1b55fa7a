//! `LicensesClient` against an in-process fake of the licenses API.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;

use lapsus_core::{CreateLicenseRequest, LicenseId, UpdateLicenseRequest};
use lapsus_integration_tests::{FakeLicensesApi, license};
use lapsus_storefront::licenses::ApiError;

fn categorized(id: &str, category: &str, active: bool) -> lapsus_core::License {
    lapsus_core::License {
        category: Some(category.to_string()),
        is_active: active,
        ..license(id, &id.to_uppercase(), 100_000.0)
    }
}

#[tokio::test]
async fn test_list_licenses() {
    let api = FakeLicensesApi::start(vec![
        license("lic-1", "WARZONE UNLOCKALL", 165_000.0),
        license("lic-2", "RAINBOW SIX UNLOCKALL", 150_000.0),
    ])
    .await;

    let licenses = api.client().list_licenses().await.unwrap();
    assert_eq!(licenses.len(), 2);
    assert_eq!(licenses[0].product_name, "WARZONE UNLOCKALL");

    let requests = api.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/licenses");
    assert_eq!(requests[0].query, None);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_list_active_licenses_sends_filter() {
    let api = FakeLicensesApi::start(vec![
        categorized("a", "Gaming", true),
        categorized("b", "Gaming", false),
    ])
    .await;

    let licenses = api.client().list_active_licenses().await.unwrap();
    assert_eq!(licenses.len(), 1);
    assert_eq!(licenses[0].license_id, Some(LicenseId::new("a")));
    assert_eq!(api.requests()[0].query.as_deref(), Some("is_active=true"));
}

#[tokio::test]
async fn test_list_by_category_encodes_value() {
    let api = FakeLicensesApi::start(vec![
        categorized("a", "Battle Royale", true),
        categorized("b", "Gaming", true),
    ])
    .await;

    let licenses = api
        .client()
        .list_licenses_by_category("Battle Royale")
        .await
        .unwrap();
    assert_eq!(licenses.len(), 1);
    assert_eq!(licenses[0].license_id, Some(LicenseId::new("a")));

    let query = api.requests()[0].query.clone().unwrap();
    assert!(
        query == "category=Battle+Royale" || query == "category=Battle%20Royale",
        "unexpected query {query}"
    );
}

#[tokio::test]
async fn test_get_license() {
    let api = FakeLicensesApi::start(vec![license("lic-7", "VALORANT", 90_000.0)]).await;

    let found = api.client().get_license(&LicenseId::new("lic-7")).await.unwrap();
    assert_eq!(found.product_name, "VALORANT");
    assert_eq!(api.requests()[0].path, "/licenses/lic-7");

    let err = api
        .client()
        .get_license(&LicenseId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Request { status: 404 }));
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn test_create_license() {
    let api = FakeLicensesApi::start(Vec::new()).await;
    let request: CreateLicenseRequest = serde_json::from_value(json!({
        "product_name": "APEX UNLOCKALL",
        "price": 120000,
        "has_spoofer": true,
        "stock_quantity": 5,
        "category": "Gaming"
    }))
    .unwrap();

    let created = api.client().create_license(&request).await.unwrap();
    assert_eq!(created.license_id, Some(LicenseId::new("lic-1")));
    assert!(created.is_active);
    assert_eq!(api.licenses().len(), 1);

    let recorded = &api.requests()[0];
    assert_eq!(recorded.method, Method::POST);
    assert_eq!(recorded.path, "/licenses");
    let body = recorded.body.clone().unwrap();
    assert_eq!(body["product_name"], "APEX UNLOCKALL");
    assert!(body.get("description").is_none());
}

#[tokio::test]
async fn test_update_license_omits_absent_fields() {
    let api = FakeLicensesApi::start(vec![license("lic-1", "OLD NAME", 1.0)]).await;
    let patch = UpdateLicenseRequest {
        price: Some(2.0),
        ..UpdateLicenseRequest::default()
    };

    let updated = api
        .client()
        .update_license(&LicenseId::new("lic-1"), &patch)
        .await
        .unwrap();
    assert!((updated.price - 2.0).abs() < f64::EPSILON);
    assert_eq!(updated.product_name, "OLD NAME");

    let recorded = &api.requests()[0];
    assert_eq!(recorded.method, Method::PUT);
    assert_eq!(recorded.path, "/licenses/lic-1");
    assert_eq!(recorded.body, Some(json!({ "price": 2.0 })));
}

#[tokio::test]
async fn test_delete_license_ignores_body() {
    let api = FakeLicensesApi::start(vec![license("lic-1", "GONE", 1.0)]).await;

    api.client()
        .delete_license(&LicenseId::new("lic-1"))
        .await
        .unwrap();
    assert!(api.licenses().is_empty());
    assert_eq!(api.requests()[0].method, Method::DELETE);
}

#[tokio::test]
async fn test_non_2xx_maps_to_request_error() {
    let api = FakeLicensesApi::start(vec![license("lic-1", "ANY", 1.0)]).await;
    api.fail_with(StatusCode::SERVICE_UNAVAILABLE);

    let err = api.client().list_licenses().await.unwrap_err();
    assert!(matches!(err, ApiError::Request { status: 503 }));
    assert_eq!(err.status(), Some(503));

    let err = api
        .client()
        .delete_license(&LicenseId::new("lic-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Request { status: 503 }));
}
