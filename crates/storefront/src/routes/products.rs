//! Product grid fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use maktaba_core::{CategoryFilter, Notice};

use super::open_page;
use crate::catalog;
use crate::error::Result;
use crate::page::ProductsOutcome;
use crate::pages::PageId;
use crate::state::AppState;
use crate::views::{self, CategoryChip, ProductsView};

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

/// Product grid with the category bar and toasts out of band.
#[derive(Template, WebTemplate)]
#[template(path = "fragments/products.html")]
pub struct ProductsFragment {
    pub page_id: String,
    pub products: ProductsView,
    pub categories: Option<Vec<CategoryChip>>,
    pub notices: Vec<Notice>,
    pub oob: bool,
}

/// Switch category and return the refreshed grid.
///
/// A response for a selection that has since been superseded is `204`, so
/// HTMX leaves the newer grid in place.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
    Query(query): Query<ProductsQuery>,
) -> Result<Response> {
    let page = open_page(&state, page_id).await?;
    let filter = CategoryFilter::from_param(query.category.as_deref());

    let outcome = catalog::select_category(state.api(), &page, filter).await;
    if outcome == ProductsOutcome::Stale {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let mut page = page.lock().await;
    Ok(ProductsFragment {
        page_id: page_id.to_string(),
        products: views::products_view(&page),
        categories: views::categories_view(&page),
        notices: page.take_notices(),
        oob: true,
    }
    .into_response())
}
