//! Storefront page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use maktaba_core::Notice;

use crate::catalog;
use crate::state::AppState;
use crate::views::{Banner, CartView, CategoryChip, PageView, ProductsView};

/// Full storefront page.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page_id: String,
    pub products: ProductsView,
    pub categories: Option<Vec<CategoryChip>>,
    pub ads: Option<Vec<Banner>>,
    pub offers: Option<Vec<Banner>>,
    pub cart: CartView,
    pub notices: Vec<Notice>,
    pub oob: bool,
}

impl From<PageView> for IndexTemplate {
    fn from(view: PageView) -> Self {
        Self {
            page_id: view.page_id,
            products: view.products,
            categories: view.categories,
            ads: view.ads,
            offers: view.offers,
            cart: view.cart,
            notices: view.notices,
            oob: false,
        }
    }
}

/// Open a new page with an empty cart and render it.
///
/// Every load starts over, so reloading the browser tab empties the cart.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> IndexTemplate {
    let (page_id, page) = state.pages().open().await;
    catalog::load_page(state.api(), &page).await;

    let mut page = page.lock().await;
    PageView::build(page_id, &mut page).into()
}
