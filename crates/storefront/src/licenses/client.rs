//! HTTP client for the `licenses` resource.

use reqwest::RequestBuilder;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::instrument;

use lapsus_core::{CreateLicenseRequest, License, LicenseId, UpdateLicenseRequest};

use super::ApiError;
use crate::config::ApiConfig;

/// Client for the remote licenses API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LicensesClient {
    client: reqwest::Client,
    collection_url: String,
}

impl LicensesClient {
    /// Create a new licenses API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::with_client(Self::http_builder().build()?, config))
    }

    /// `reqwest` builder preconfigured with the headers the API expects.
    #[must_use]
    pub fn http_builder() -> reqwest::ClientBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        reqwest::Client::builder().default_headers(headers)
    }

    /// Wrap an already-configured `reqwest` client, usually one from
    /// [`Self::http_builder`].
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            collection_url: config.licenses_url(),
        }
    }

    /// URL of the licenses collection.
    #[must_use]
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn license_url(&self, license_id: &LicenseId) -> String {
        format!("{}/{}", self.collection_url, license_id)
    }

    /// Get all licenses.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or bad JSON.
    #[instrument(skip(self))]
    pub async fn list_licenses(&self) -> Result<Vec<License>, ApiError> {
        Self::fetch(self.client.get(&self.collection_url)).await
    }

    /// Get active licenses only (`?is_active=true`).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or bad JSON.
    #[instrument(skip(self))]
    pub async fn list_active_licenses(&self) -> Result<Vec<License>, ApiError> {
        Self::fetch(
            self.client
                .get(&self.collection_url)
                .query(&[("is_active", "true")]),
        )
        .await
    }

    /// Get licenses in a category (`?category=<encoded>`).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or bad JSON.
    #[instrument(skip(self))]
    pub async fn list_licenses_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<License>, ApiError> {
        Self::fetch(
            self.client
                .get(&self.collection_url)
                .query(&[("category", category)]),
        )
        .await
    }

    /// Get a license by ID.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or bad JSON.
    #[instrument(skip(self, license_id), fields(license_id = %license_id))]
    pub async fn get_license(&self, license_id: &LicenseId) -> Result<License, ApiError> {
        Self::fetch(self.client.get(self.license_url(license_id))).await
    }

    /// Create a new license.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or bad JSON.
    #[instrument(skip(self, request), fields(product_name = %request.product_name))]
    pub async fn create_license(
        &self,
        request: &CreateLicenseRequest,
    ) -> Result<License, ApiError> {
        Self::fetch(self.client.post(&self.collection_url).json(request)).await
    }

    /// Partially update a license. Absent fields are not sent.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or bad JSON.
    #[instrument(skip(self, license_id, request), fields(license_id = %license_id))]
    pub async fn update_license(
        &self,
        license_id: &LicenseId,
        request: &UpdateLicenseRequest,
    ) -> Result<License, ApiError> {
        Self::fetch(self.client.put(self.license_url(license_id)).json(request)).await
    }

    /// Delete a license. Any 2xx counts as success; the body is ignored.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    #[instrument(skip(self, license_id), fields(license_id = %license_id))]
    pub async fn delete_license(&self, license_id: &LicenseId) -> Result<(), ApiError> {
        Self::execute(self.client.delete(self.license_url(license_id)))
            .await
            .map(drop)
    }

    /// Send a request and decode a JSON body.
    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::execute(request).await?;
        let body = response.bytes().await.map_err(|e| {
            tracing::error!("API request failed: {e}");
            ApiError::Http(e)
        })?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("API request failed: {e}");
            ApiError::Decode(e)
        })
    }

    /// Send a request and reject non-2xx statuses.
    async fn execute(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("API request failed: {e}");
            ApiError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = ApiError::Request {
                status: status.as_u16(),
            };
            tracing::error!(url = %response.url(), "API request failed: {err}");
            return Err(err);
        }

        Ok(response)
    }
}
