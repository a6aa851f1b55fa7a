//! Login handlers.
//!
//! Login exists as a route only; there are no accounts yet.

use tracing::instrument;

use crate::error::{AppError, Result};

/// Login page.
#[instrument]
pub async fn login_page() -> Result<()> {
    Err(AppError::NotImplemented("login".to_string()))
}

/// Login action. Any submitted form is ignored.
#[instrument]
pub async fn login() -> Result<()> {
    Err(AppError::NotImplemented("login".to_string()))
}
