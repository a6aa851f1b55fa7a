//! License management against the remote licenses API.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use lapsus_core::{CreateLicenseRequest, License, LicenseId, UpdateLicenseRequest};
use lapsus_storefront::licenses::LicensesClient;

use super::CommandError;

/// List licenses, optionally restricted to active ones and/or a category.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn list(
    client: &LicensesClient,
    active: bool,
    category: Option<&str>,
) -> Result<Vec<License>, CommandError> {
    let licenses = match (category, active) {
        (Some(category), _) => {
            let mut licenses = client.list_licenses_by_category(category).await?;
            if active {
                licenses.retain(|license| license.is_active);
            }
            licenses
        }
        (None, true) => client.list_active_licenses().await?,
        (None, false) => client.list_licenses().await?,
    };
    info!(count = licenses.len(), "Listed licenses");
    Ok(licenses)
}

/// Fetch one license.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn get(client: &LicensesClient, id: &str) -> Result<License, CommandError> {
    Ok(client.get_license(&LicenseId::new(id)).await?)
}

/// Create a license from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, fails validation,
/// or the API request fails.
pub async fn create(client: &LicensesClient, file: &Path) -> Result<License, CommandError> {
    let request: CreateLicenseRequest = read_json(file).await?;
    request.validate()?;

    let license = client.create_license(&request).await?;
    info!(license_id = ?license.license_id, "License created");
    Ok(license)
}

/// Apply a partial update from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, is empty or fails
/// validation, or the API request fails.
pub async fn update(
    client: &LicensesClient,
    id: &str,
    file: &Path,
) -> Result<License, CommandError> {
    let request: UpdateLicenseRequest = read_json(file).await?;
    if request.is_empty() {
        return Err(CommandError::Invalid("no fields to update".to_string()));
    }
    request.validate()?;

    let license = client.update_license(&LicenseId::new(id), &request).await?;
    info!(license_id = %id, "License updated");
    Ok(license)
}

/// Delete a license.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn delete(client: &LicensesClient, id: &str) -> Result<(), CommandError> {
    client.delete_license(&LicenseId::new(id)).await?;
    info!(license_id = %id, "License deleted");
    Ok(())
}

async fn read_json<T: DeserializeOwned>(file: &Path) -> Result<T, CommandError> {
    let content = tokio::fs::read_to_string(file).await?;
    Ok(serde_json::from_str(&content)?)
}
