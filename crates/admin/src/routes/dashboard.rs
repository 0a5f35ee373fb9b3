//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use maktaba_core::Notice;

use crate::console;
use crate::middleware::RequireAdminFlag;
use crate::state::AppState;

/// One counter tile.
#[derive(Debug, Clone)]
pub struct Counter {
    pub label: &'static str,
    /// `—` when the list could not be fetched.
    pub value: String,
    pub href: &'static str,
}

impl Counter {
    fn new(label: &'static str, value: Option<usize>, href: &'static str) -> Self {
        Self {
            label,
            value: value.map_or_else(|| "—".to_string(), |n| n.to_string()),
            href,
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub current_path: String,
    pub counters: Vec<Counter>,
    pub per_category: Vec<(String, usize)>,
    pub notices: Vec<Notice>,
}

/// Dashboard handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAdminFlag(flag): RequireAdminFlag,
    State(state): State<AppState>,
) -> DashboardTemplate {
    let dashboard = console::dashboard(state.api()).await;

    DashboardTemplate {
        username: flag.username,
        current_path: "/admin".to_string(),
        counters: vec![
            Counter::new("Products", dashboard.products, "/admin/products"),
            Counter::new("Categories", dashboard.categories, "/admin/categories"),
            Counter::new("Ads", dashboard.ads, "/admin/ads"),
            Counter::new("Offers", dashboard.offers, "/admin/offers"),
        ],
        per_category: dashboard.per_category,
        notices: dashboard.notices,
    }
}
