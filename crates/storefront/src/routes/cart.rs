//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each response re-renders the cart panel and updates the badge and toasts
//! out of band. The cart itself lives in the page, never in a session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use maktaba_core::{Notice, ProductId};

use super::open_page;
use crate::error::Result;
use crate::page::StorefrontPage;
use crate::pages::PageId;
use crate::state::AppState;
use crate::views::{self, CartView};

/// Form naming one cart line.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "fragments/cart.html")]
pub struct CartFragment {
    pub page_id: String,
    pub cart: CartView,
    pub notices: Vec<Notice>,
    /// Formatted total of a checkout that just completed.
    pub receipt: Option<String>,
    pub oob: bool,
}

impl CartFragment {
    fn render(page_id: PageId, page: &mut StorefrontPage, receipt: Option<String>) -> Self {
        Self {
            page_id: page_id.to_string(),
            cart: views::cart_view(page),
            notices: page.take_notices(),
            receipt,
            oob: true,
        }
    }
}

/// Add item to cart (HTMX).
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
    Form(form): Form<ProductForm>,
) -> Result<CartFragment> {
    let page = open_page(&state, page_id).await?;
    let mut page = page.lock().await;
    page.add_to_cart(form.product_id);
    Ok(CartFragment::render(page_id, &mut page, None))
}

/// Update cart item quantity (HTMX). Zero or less removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
    Form(form): Form<UpdateCartForm>,
) -> Result<CartFragment> {
    let page = open_page(&state, page_id).await?;
    let mut page = page.lock().await;
    page.update_quantity(form.product_id, form.quantity);
    Ok(CartFragment::render(page_id, &mut page, None))
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
    Form(form): Form<ProductForm>,
) -> Result<CartFragment> {
    let page = open_page(&state, page_id).await?;
    let mut page = page.lock().await;
    page.remove_from_cart(form.product_id);
    Ok(CartFragment::render(page_id, &mut page, None))
}

/// Close out the cart (HTMX).
///
/// Nothing is sent to the backend: the total is shown and the cart cleared.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
) -> Result<CartFragment> {
    let page = open_page(&state, page_id).await?;
    let mut page = page.lock().await;
    let receipt = page
        .checkout()
        .ok()
        .map(|receipt| page.price(receipt.total));
    Ok(CartFragment::render(page_id, &mut page, receipt))
}
