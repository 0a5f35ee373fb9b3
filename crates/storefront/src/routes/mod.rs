//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Storefront page (opens a new page id)
//! GET  /health                     - Health check
//!
//! # Page fragments (HTMX), addressed by page id
//! GET  /p/{page}/products          - Product grid, optional ?category=NAME
//! POST /p/{page}/cart/add          - Add one unit (form: product_id)
//! POST /p/{page}/cart/update       - Set quantity (form: product_id, quantity)
//! POST /p/{page}/cart/remove       - Remove a line (form: product_id)
//! POST /p/{page}/checkout          - Close out the cart
//! ```
//!
//! An unknown or expired page id answers `410 Gone` with `HX-Refresh`.

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::{AppError, Result};
use crate::pages::{PageId, SharedPage};
use crate::state::AppState;

/// Create the per-page fragment routes.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .nest("/p/{page}", page_routes())
}

/// Resolve an open page or tell the browser to reload.
async fn open_page(state: &AppState, page_id: PageId) -> Result<SharedPage> {
    state.pages().get(page_id).await.ok_or_else(|| {
        tracing::debug!(page_id = %page_id, "Unknown or expired page");
        AppError::PageExpired
    })
}
