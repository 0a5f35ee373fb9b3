//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL for the panel; `https://` turns on `Secure`
//!   cookies (default: <http://localhost:3001>)
//! - `MAKTABA_API_URL` - Catalog REST API root (default: <http://127.0.0.1:5000/api>)
//! - `MAKTABA_API_TIMEOUT_SECS` - Per-request timeout; unset means none
//! - `ADMIN_REMEMBER_ME_DAYS` - Inactivity lifetime of a remembered login (default: 30)
//! - `STORE_CURRENCY` - Display currency, `YER`, `SAR` or `USD` (default: YER)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use maktaba_core::CurrencyCode;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public URL for the admin panel
    pub base_url: String,
    /// Root of the catalog REST API
    pub api_url: String,
    pub api_timeout: Option<Duration>,
    /// Days a "remember me" login survives without activity
    pub remember_me_days: i64,
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl AdminConfig {
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

        let remember_me_days: i64 = parse_env("ADMIN_REMEMBER_ME_DAYS", "30")?;
        if remember_me_days < 1 {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_REMEMBER_ME_DAYS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            host: parse_env("ADMIN_HOST", "127.0.0.1")?,
            port: parse_env("ADMIN_PORT", "3001")?,
            base_url: get_env_or_default("ADMIN_BASE_URL", DEFAULT_BASE_URL),
            api_url: get_env_or_default("MAKTABA_API_URL", DEFAULT_API_URL),
            api_timeout: get_optional_env("MAKTABA_API_TIMEOUT_SECS")
                .map(|v| parse_value::<u64>("MAKTABA_API_TIMEOUT_SECS", &v))
                .transpose()?
                .map(Duration::from_secs),
            remember_me_days,
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

    /// Whether cookies must carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: None,
            remember_me_days: 30,
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
