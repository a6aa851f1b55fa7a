//! License administration handlers.
//!
//! Thin JSON proxy over the licenses API. Create and update bodies are
//! validated before any request is sent, and the catalog cache is dropped
//! after every successful mutation.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{info, instrument};

use lapsus_core::{
    CreateLicenseRequest, License, LicenseId, ProductId, UpdateLicenseRequest, product_to_license,
};

use super::products::find_product;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// License listing filter.
#[derive(Debug, Deserialize)]
pub struct LicensesQuery {
    #[serde(default)]
    pub active: bool,
}

/// List licenses; `?active=true` lists active ones only.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<LicensesQuery>,
) -> Result<Json<Vec<License>>> {
    let licenses = if query.active {
        state.licenses().list_active_licenses().await?
    } else {
        state.licenses().list_licenses().await?
    };
    Ok(Json(licenses))
}

/// Get one license.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<License>> {
    let id = LicenseId::new(id);
    match state.licenses().get_license(&id).await {
        Ok(license) => Ok(Json(license)),
        Err(e) if e.is_not_found() => Err(AppError::NotFound(format!("License not found: {id}"))),
        Err(e) => Err(e.into()),
    }
}

/// Create a license.
#[instrument(skip(state, request), fields(product_name = %request.product_name))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateLicenseRequest>,
) -> Result<(StatusCode, Json<License>)> {
    request.validate()?;

    let license = state.licenses().create_license(&request).await?;
    state.catalog().invalidate().await;

    info!(license_id = ?license.license_id, "License created");
    add_breadcrumb("admin", "License created", &[("product_name", request.product_name.as_str())]);
    Ok((StatusCode::CREATED, Json(license)))
}

/// Partially update a license.
#[instrument(skip(state, request))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateLicenseRequest>,
) -> Result<Json<License>> {
    if request.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    request.validate()?;

    let id = LicenseId::new(id);
    let license = match state.licenses().update_license(&id, &request).await {
        Ok(license) => license,
        Err(e) if e.is_not_found() => {
            return Err(AppError::NotFound(format!("License not found: {id}")));
        }
        Err(e) => return Err(e.into()),
    };
    state.catalog().invalidate().await;

    info!(license_id = %id, "License updated");
    add_breadcrumb("admin", "License updated", &[("license_id", id.as_str())]);
    Ok(Json(license))
}

/// Delete a license.
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = LicenseId::new(id);
    match state.licenses().delete_license(&id).await {
        Ok(()) => {}
        Err(e) if e.is_not_found() => {
            return Err(AppError::NotFound(format!("License not found: {id}")));
        }
        Err(e) => return Err(e.into()),
    }
    state.catalog().invalidate().await;

    info!(license_id = %id, "License deleted");
    add_breadcrumb("admin", "License deleted", &[("license_id", id.as_str())]);
    Ok(StatusCode::NO_CONTENT)
}

/// Edit-form seed for a catalog product.
#[instrument(skip(state))]
pub async fn license_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateLicenseRequest>> {
    let product = find_product(&state, &ProductId::new(id)).await?;
    Ok(Json(product_to_license(&product)))
}
