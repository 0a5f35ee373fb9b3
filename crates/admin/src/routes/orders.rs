//! Orders route handler. Read-only.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use maktaba_core::{CurrencyCode, Notice, Order, Price};

use crate::console;
use crate::middleware::RequireAdminFlag;
use crate::state::AppState;

/// Order view for templates.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: i32,
    pub total: String,
    pub items: u32,
    pub placed_at: String,
}

impl OrderRow {
    fn new(order: &Order, currency: CurrencyCode) -> Self {
        Self {
            id: order.id.as_i32(),
            total: Price::new(order.total_amount, currency).display(),
            items: order.items_count,
            placed_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub username: String,
    pub current_path: String,
    /// `None` when the list could not be fetched.
    pub orders: Option<Vec<OrderRow>>,
    pub notices: Vec<Notice>,
}

/// Orders list handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAdminFlag(flag): RequireAdminFlag,
    State(state): State<AppState>,
) -> OrdersTemplate {
    let mut notices = Vec::new();
    let currency = state.config().currency;
    let orders = console::orders(state.api(), &mut notices)
        .await
        .map(|orders| orders.iter().map(|o| OrderRow::new(o, currency)).collect());

    OrdersTemplate {
        username: flag.username,
        current_path: "/admin/orders".to_string(),
        orders,
        notices,
    }
}
