//! Catalog management flows.
//!
//! Every successful mutation is followed by a re-fetch of the affected
//! collection; nothing is updated locally. Each re-fetch stands alone: a
//! listing that comes back is rendered, one that fails leaves the table the
//! browser already shows and adds an error notice.

use maktaba_client::{ApiError, CatalogApi, ResourceKind};
use maktaba_core::{Ad, Category, Notice, Offer, Order, Product};
use tracing::{info, instrument, warn};

use crate::forms::FormError;
use crate::resources::{Editable, Listing};

/// What a console action changed.
#[derive(Debug, Default)]
pub struct ConsoleUpdate {
    /// The mutation went through; close the modal.
    pub saved: bool,
    /// Collections that were re-fetched successfully.
    pub listings: Vec<Listing>,
    pub notices: Vec<Notice>,
}

impl ConsoleUpdate {
    /// The listing of `kind`, if it was re-fetched.
    #[must_use]
    pub fn listing(&self, kind: ResourceKind) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.kind() == kind)
    }

    /// A submission rejected before any API call.
    #[must_use]
    pub fn rejected(error: &FormError) -> Self {
        Self {
            notices: vec![Notice::error(error.to_string())],
            ..Self::default()
        }
    }

    fn apply<R: Editable>(&mut self, result: Result<Vec<R>, ApiError>) {
        match result {
            Ok(items) => self.listings.push(R::listing(items)),
            Err(e) => {
                warn!(error = %e, kind = %R::KIND, "Failed to refresh list");
                self.notices
                    .push(Notice::error(e.user_message(&format!("Could not load {}", R::KIND))));
            }
        }
    }

    fn failed<R: Editable>(&mut self, action: &str, error: &ApiError) {
        warn!(error = %error, kind = %R::KIND, action, "Catalog mutation failed");
        self.notices.push(Notice::error(
            error.user_message(&format!("Could not {action} {}", R::KIND.noun())),
        ));
    }
}

/// Fetch one collection for its screen.
#[instrument(skip_all, fields(kind = %R::KIND))]
pub async fn open<A: CatalogApi, R: Editable>(api: &A) -> ConsoleUpdate {
    let mut update = ConsoleUpdate::default();
    update.apply(api.list::<R>().await);
    update
}

#[instrument(skip_all, fields(kind = %R::KIND))]
pub async fn create<A: CatalogApi, R: Editable>(api: &A, fields: &R::Fields) -> ConsoleUpdate {
    let mut update = ConsoleUpdate::default();
    match api.create::<R>(fields).await {
        Ok(record) => {
            info!(id = %record.id(), "Created");
            update.saved = true;
            update.notices.push(Notice::success(format!(
                "{} \"{}\" added",
                capitalize(R::KIND.noun()),
                record.label()
            )));
            update.apply(api.list::<R>().await);
        }
        Err(e) => update.failed::<R>("add", &e),
    }
    update
}

#[instrument(skip_all, fields(kind = %R::KIND, id = %id))]
pub async fn update<A: CatalogApi, R: Editable>(
    api: &A,
    id: R::Id,
    fields: &R::Fields,
) -> ConsoleUpdate {
    let mut update = ConsoleUpdate::default();
    match api.update::<R>(id, fields).await {
        Ok(record) => {
            info!("Updated");
            update.saved = true;
            update.notices.push(Notice::success(format!(
                "{} \"{}\" saved",
                capitalize(R::KIND.noun()),
                record.label()
            )));
            update.apply(api.list::<R>().await);
        }
        Err(e) => update.failed::<R>("save", &e),
    }
    update
}

/// Delete a record. Deleting a category also re-fetches products, which
/// the backend removed with it.
#[instrument(skip_all, fields(kind = %R::KIND, id = %id))]
pub async fn delete<A: CatalogApi, R: Editable>(api: &A, id: R::Id) -> ConsoleUpdate {
    let mut update = ConsoleUpdate::default();
    match api.delete::<R>(id).await {
        Ok(()) => {
            info!("Deleted");
            update.saved = true;
            update.notices.push(Notice::success(format!(
                "{} deleted",
                capitalize(R::KIND.noun())
            )));
            if R::DELETE_CASCADES_TO_PRODUCTS {
                let (own, products) = tokio::join!(api.list::<R>(), api.list::<Product>());
                update.apply(own);
                update.apply(products);
            } else {
                update.apply(api.list::<R>().await);
            }
        }
        Err(e) => update.failed::<R>("delete", &e),
    }
    update
}

/// Locate a record for its edit form. There is no single-record endpoint,
/// so this re-fetches the whole list.
///
/// # Errors
///
/// Returns the API error if the list cannot be fetched.
#[instrument(skip_all, fields(kind = %R::KIND, id = %id))]
pub async fn find<A: CatalogApi, R: Editable>(api: &A, id: R::Id) -> Result<Option<R>, ApiError> {
    Ok(api
        .list::<R>()
        .await?
        .into_iter()
        .find(|record| record.id() == id))
}

/// Categories for a product form's dropdown. A failure yields an empty
/// list and a notice.
pub async fn category_choices<A: CatalogApi>(api: &A, notices: &mut Vec<Notice>) -> Vec<Category> {
    match api.list::<Category>().await {
        Ok(categories) => categories,
        Err(e) => {
            warn!(error = %e, "Failed to load categories for form");
            notices.push(Notice::error(e.user_message("Could not load categories")));
            Vec::new()
        }
    }
}

/// Dashboard counters, each derived from a fresh listing.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub products: Option<usize>,
    pub categories: Option<usize>,
    pub ads: Option<usize>,
    pub offers: Option<usize>,
    /// `(category, product count)` in category order.
    pub per_category: Vec<(String, usize)>,
    pub notices: Vec<Notice>,
}

#[instrument(skip_all)]
pub async fn dashboard<A: CatalogApi>(api: &A) -> Dashboard {
    let (products, categories, ads, offers) = tokio::join!(
        api.list::<Product>(),
        api.list::<Category>(),
        api.list::<Ad>(),
        api.list::<Offer>(),
    );

    let mut update = ConsoleUpdate::default();
    update.apply(products);
    update.apply(categories);
    update.apply(ads);
    update.apply(offers);

    let count = |kind| update.listing(kind).map(Listing::len);
    let per_category = match (
        update.listing(ResourceKind::Products),
        update.listing(ResourceKind::Categories),
    ) {
        (Some(Listing::Products(products)), Some(Listing::Categories(categories))) => categories
            .iter()
            .map(|category| {
                let n = products
                    .iter()
                    .filter(|p| p.category_id == Some(category.id))
                    .count();
                (category.name.clone(), n)
            })
            .collect(),
        _ => Vec::new(),
    };

    Dashboard {
        products: count(ResourceKind::Products),
        categories: count(ResourceKind::Categories),
        ads: count(ResourceKind::Ads),
        offers: count(ResourceKind::Offers),
        per_category,
        notices: update.notices,
    }
}

/// Orders, newest first. `None` with a notice when the list is unavailable.
#[instrument(skip_all)]
pub async fn orders<A: CatalogApi>(api: &A, notices: &mut Vec<Notice>) -> Option<Vec<Order>> {
    match api.list_orders().await {
        Ok(orders) => Some(orders),
        Err(e) => {
            warn!(error = %e, "Failed to load orders");
            notices.push(Notice::error(e.user_message("Could not load orders")));
            None
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
