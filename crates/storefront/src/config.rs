//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to local-development defaults.
//!
//! - `LICENSES_API_BASE_URL` - Licenses API base URL (default: `http://localhost:8000`)
//! - `LICENSES_API_ENDPOINT` - Licenses resource path (default: `/licenses`)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CART_PATH` - File backing the persisted cart (default: `.lapsus/cart.json`)
//! - `CATALOG_SOURCE` - `static` or `remote` (default: `static`)
//! - `CATALOG_CACHE_TTL_SECS` - Remote catalog cache TTL (default: 300)
//! - `APP_ENV` - `development` or `production` (default: `development`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_LICENSES_ENDPOINT: &str = "/licenses";
const DEFAULT_CART_PATH: &str = ".lapsus/cart.json";
const DEFAULT_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Licenses API location
    pub api: ApiConfig,
    /// File backing the persisted cart
    pub cart_path: PathBuf,
    /// Where the catalog comes from
    pub catalog: CatalogConfig,
    /// Deployment environment
    pub environment: Environment,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Licenses API configuration.
///
/// Loaded separately so the CLI can talk to the API without server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Resource path, always starting with `/`
    pub licenses_endpoint: String,
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub source: CatalogSource,
    pub cache_ttl: Duration,
}

/// Where catalog products are loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// Built-in seed products.
    #[default]
    Static,
    /// Active licenses from the remote API.
    Remote,
}

impl FromStr for CatalogSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "remote" => Ok(Self::Remote),
            other => Err(format!("expected 'static' or 'remote', got '{other}'")),
        }
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_var(&vars, "STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_var(&vars, "STOREFRONT_PORT", "3000")?;
        let api = ApiConfig::from_vars(&vars)?;
        let cart_path = PathBuf::from(get_or_default(&vars, "STOREFRONT_CART_PATH", DEFAULT_CART_PATH));
        let source = parse_var(&vars, "CATALOG_SOURCE", "static")?;
        let ttl_secs: u64 = parse_var(&vars, "CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        let environment = parse_var(&vars, "APP_ENV", "development")?;
        let sentry_dsn = vars("SENTRY_DSN").filter(|dsn| !dsn.is_empty());

        Ok(Self {
            host,
            port,
            api,
            cart_path,
            catalog: CatalogConfig {
                source,
                cache_ttl: Duration::from_secs(ttl_secs),
            },
            environment,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ApiConfig {
    /// Load the API settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the base URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build API settings from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the base URL does not parse.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = get_or_default(&vars, "LICENSES_API_BASE_URL", DEFAULT_API_BASE_URL);
        Self::new(
            &base_url,
            &get_or_default(&vars, "LICENSES_API_ENDPOINT", DEFAULT_LICENSES_ENDPOINT),
        )
        .map_err(|e| ConfigError::InvalidEnvVar("LICENSES_API_BASE_URL".to_string(), e))
    }

    /// Validate and normalize a base URL and endpoint path.
    ///
    /// # Errors
    ///
    /// Returns a message if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str, endpoint: &str) -> Result<Self, String> {
        let parsed = Url::parse(base_url).map_err(|e| e.to_string())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!("unsupported scheme '{}'", parsed.scheme()));
        }

        let endpoint = endpoint.trim();
        let licenses_endpoint = if endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{endpoint}")
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            licenses_endpoint,
        })
    }

    /// Full URL of the licenses collection.
    #[must_use]
    pub fn licenses_url(&self) -> String {
        format!("{}{}", self.base_url, self.licenses_endpoint)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            licenses_endpoint: DEFAULT_LICENSES_ENDPOINT.to_string(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(vars: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    vars(key).unwrap_or_else(|| default.to_string())
}

/// Get a variable (or its default) and parse it.
fn parse_var<T>(
    vars: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_or_default(vars, key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
