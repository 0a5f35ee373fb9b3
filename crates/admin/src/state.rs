//! Application state shared across handlers.

use std::sync::Arc;

use maktaba_client::{ApiError, RestClient};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The admin keeps no catalog
/// data of its own: every screen is rendered from a fresh API read.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: RestClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured API URL is unusable.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let api = RestClient::new(&config.api_url, config.api_timeout)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, api }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn api(&self) -> &RestClient {
        &self.inner.api
    }
}
