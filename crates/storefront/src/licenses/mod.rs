//! Licenses REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over `reqwest`; the remote API is the source of truth for
//!   licenses and the storefront keeps no local copy beyond the catalog cache
//! - Any non-2xx response is an [`ApiError::Request`] carrying the status;
//!   there is no retry and no timeout
//!
//! # Example
//!
//! ```rust,ignore
//! use lapsus_storefront::licenses::LicensesClient;
//!
//! let client = LicensesClient::new(&config.api)?;
//! let active = client.list_active_licenses().await?;
//! ```

mod client;

pub use client::LicensesClient;

use thiserror::Error;

/// Errors that can occur when calling the licenses API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, DNS, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Request { status: u16 },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    /// Whether the API reported that the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_carries_status() {
        let err = ApiError::Request { status: 503 };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert!(!err.is_not_found());
        assert!(ApiError::Request { status: 404 }.is_not_found());
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let Err(json_err) = serde_json::from_str::<serde_json::Value>("{") else {
            panic!("expected a parse error");
        };
        assert_eq!(ApiError::from(json_err).status(), None);
    }
}
