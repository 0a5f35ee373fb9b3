//! Registry of open storefront pages.
//!
//! Every full load of `/` mints a [`PageId`] and a fresh [`StorefrontPage`].
//! HTMX requests from that browser tab carry the id in their path. Pages are
//! dropped after sitting idle, and a reload always starts a new one, so the
//! cart never outlives the tab that built it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use maktaba_core::CurrencyCode;

use crate::page::StorefrontPage;

/// Identifies one loaded storefront page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(Uuid);

impl PageId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A page shared between concurrent requests from the same tab.
///
/// Lock it only for synchronous work; never hold the guard across an API
/// call.
pub type SharedPage = Arc<Mutex<StorefrontPage>>;

/// Bounded, idle-expiring map of open pages.
#[derive(Clone)]
pub struct PageRegistry {
    pages: Cache<PageId, SharedPage>,
    currency: CurrencyCode,
}

impl PageRegistry {
    #[must_use]
    pub fn new(max_pages: u64, idle: Duration, currency: CurrencyCode) -> Self {
        Self {
            pages: Cache::builder()
                .max_capacity(max_pages)
                .time_to_idle(idle)
                .build(),
            currency,
        }
    }

    /// Open a new page with an empty cart.
    pub async fn open(&self) -> (PageId, SharedPage) {
        let id = PageId::new();
        let page = Arc::new(Mutex::new(StorefrontPage::new(self.currency)));
        self.pages.insert(id, Arc::clone(&page)).await;
        tracing::debug!(page_id = %id, "Opened storefront page");
        (id, page)
    }

    /// Look up an open page. `None` once it has expired.
    pub async fn get(&self, id: PageId) -> Option<SharedPage> {
        self.pages.get(&id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_then_get_returns_same_page() {
        let registry = PageRegistry::new(10, Duration::from_secs(60), CurrencyCode::YER);

        let (id, page) = registry.open().await;
        let found = registry.get(id).await.unwrap();

        assert!(Arc::ptr_eq(&page, &found));
    }

    #[tokio::test]
    async fn test_each_open_gets_its_own_cart() {
        let registry = PageRegistry::new(10, Duration::from_secs(60), CurrencyCode::YER);

        let (first, _) = registry.open().await;
        let (second, _) = registry.open().await;

        assert_ne!(first, second);
        assert!(registry.get(PageId::new()).await.is_none());
    }
}
