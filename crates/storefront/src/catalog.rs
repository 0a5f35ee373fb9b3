//! Fetch-then-apply flows between the catalog API and a page.
//!
//! The page lock is taken only to read a ticket or to apply a result; API
//! calls always run unlocked.

use maktaba_client::CatalogApi;
use maktaba_core::{Ad, Category, CategoryFilter, Offer};
use tracing::instrument;

use crate::page::ProductsOutcome;
use crate::pages::SharedPage;

/// Load every section of a freshly opened page.
#[instrument(skip_all)]
pub async fn load_page<A: CatalogApi>(api: &A, page: &SharedPage) {
    let ticket = page.lock().await.product_ticket();

    let (products, categories, ads, offers) = tokio::join!(
        api.list_products(ticket.filter.query_param()),
        api.list::<Category>(),
        api.list::<Ad>(),
        api.list::<Offer>(),
    );

    let mut page = page.lock().await;
    page.apply_products(&ticket, products);
    page.apply_categories(categories);
    page.apply_ads(ads);
    page.apply_offers(offers);
}

/// Switch the product grid to `filter`.
#[instrument(skip(api, page))]
pub async fn select_category<A: CatalogApi>(
    api: &A,
    page: &SharedPage,
    filter: CategoryFilter,
) -> ProductsOutcome {
    let ticket = page.lock().await.select_category(filter);
    let result = api.list_products(ticket.filter.query_param()).await;
    page.lock().await.apply_products(&ticket, result)
}
