//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `MAKTABA_API_URL` - Catalog REST API root (default: <http://127.0.0.1:5000/api>)
//! - `MAKTABA_API_TIMEOUT_SECS` - Per-request timeout; unset means none
//! - `STOREFRONT_PAGE_IDLE_SECS` - Idle seconds before a page's cart is dropped (default: 1800)
//! - `STOREFRONT_MAX_PAGES` - Open pages kept in memory (default: 10000)
//! - `STORE_CURRENCY` - Display currency, `YER`, `SAR` or `USD` (default: YER)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use maktaba_core::CurrencyCode;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

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
    /// Root of the catalog REST API
    pub api_url: String,
    pub api_timeout: Option<Duration>,
    /// How long an untouched page stays addressable
    pub page_idle: Duration,
    pub max_pages: u64,
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: parse_env("STOREFRONT_HOST", "127.0.0.1")?,
            port: parse_env("STOREFRONT_PORT", "3000")?,
            api_url: get_env_or_default("MAKTABA_API_URL", DEFAULT_API_URL),
            api_timeout: get_optional_env("MAKTABA_API_TIMEOUT_SECS")
                .map(|v| parse_value::<u64>("MAKTABA_API_TIMEOUT_SECS", &v))
                .transpose()?
                .map(Duration::from_secs),
            page_idle: Duration::from_secs(parse_env("STOREFRONT_PAGE_IDLE_SECS", "1800")?),
            max_pages: parse_env("STOREFRONT_MAX_PAGES", "10000")?,
            currency: parse_env("STORE_CURRENCY", "YER")?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: None,
            page_idle: Duration::from_secs(1800),
            max_pages: 10_000,
            currency: CurrencyCode::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable; empty counts as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            port: 3100,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3100);
    }

    #[test]
    fn test_parse_value_reports_variable() {
        let err = parse_value::<u16>("STOREFRONT_PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_PORT"));
    }

    #[test]
    fn test_parse_value_currency() {
        let currency: CurrencyCode = parse_value("STORE_CURRENCY", " usd ").unwrap();
        assert_eq!(currency, CurrencyCode::USD);
    }
}
