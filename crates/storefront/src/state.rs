//! Application state shared across handlers.

use std::sync::Arc;

use maktaba_client::{ApiError, RestClient};

use crate::config::StorefrontConfig;
use crate::pages::PageRegistry;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog API client and the open pages.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: RestClient,
    pages: PageRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured API URL is unusable.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let api = RestClient::new(&config.api_url, config.api_timeout)?;
        let pages = PageRegistry::new(config.max_pages, config.page_idle, config.currency);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, api, pages }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn api(&self) -> &RestClient {
        &self.inner.api
    }

    #[must_use]
    pub fn pages(&self) -> &PageRegistry {
        &self.inner.pages
    }
}
