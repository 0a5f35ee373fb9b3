//! The storefront page view-model.
//!
//! One `StorefrontPage` backs one open browser tab. It owns the four catalog
//! sections, the category selection and the cart, and queues toasts for the
//! next response. Every method is synchronous: callers fetch from the API
//! first and then hand the result in.

use maktaba_client::ApiError;
use maktaba_core::{
    Ad, Cart, CartError, Category, CategoryFilter, CategorySelection, CurrencyCode, Notice,
    Offer, Price, Product, ProductId, Receipt, Section, Selection,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// What happened to a product fetch handed to [`StorefrontPage::apply_products`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductsOutcome {
    /// The grid now shows the result.
    Applied,
    /// A newer category selection was made meanwhile; the result was dropped.
    Stale,
    /// The fetch failed; the grid keeps what it had.
    Failed,
}

#[derive(Debug)]
pub struct StorefrontPage {
    currency: CurrencyCode,
    products: Section<Product>,
    categories: Section<Category>,
    ads: Section<Ad>,
    offers: Section<Offer>,
    selection: CategorySelection,
    cart: Cart,
    notices: Vec<Notice>,
}

impl StorefrontPage {
    /// A page with every section loading and an empty cart.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            products: Section::loading(),
            categories: Section::loading(),
            ads: Section::loading(),
            offers: Section::loading(),
            selection: CategorySelection::new(),
            cart: Cart::new(),
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub const fn products(&self) -> &Section<Product> {
        &self.products
    }

    #[must_use]
    pub const fn categories(&self) -> &Section<Category> {
        &self.categories
    }

    #[must_use]
    pub const fn ads(&self) -> &Section<Ad> {
        &self.ads
    }

    #[must_use]
    pub const fn offers(&self) -> &Section<Offer> {
        &self.offers
    }

    #[must_use]
    pub const fn filter(&self) -> &CategoryFilter {
        self.selection.current()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    // -------------------------------------------------------------------------
    // Catalog sections
    // -------------------------------------------------------------------------

    /// Switch category. Fetch products for the returned selection and pass
    /// the result to [`apply_products`](Self::apply_products).
    pub fn select_category(&mut self, filter: CategoryFilter) -> Selection {
        debug!(category = %filter, "Category selected");
        self.selection.select(filter)
    }

    /// Selection for refetching the current category without switching.
    #[must_use]
    pub fn product_ticket(&self) -> Selection {
        self.selection.ticket()
    }

    pub fn apply_products(
        &mut self,
        selection: &Selection,
        result: Result<Vec<Product>, ApiError>,
    ) -> ProductsOutcome {
        if !self.selection.is_current(selection) {
            debug!(
                category = %selection.filter,
                "Dropping products for a superseded category selection"
            );
            return ProductsOutcome::Stale;
        }
        match result {
            Ok(products) => {
                self.products.replace(products);
                ProductsOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, category = %selection.filter, "Failed to load products");
                self.notices.push(Notice::error("Could not load products"));
                ProductsOutcome::Failed
            }
        }
    }

    pub fn apply_categories(&mut self, result: Result<Vec<Category>, ApiError>) -> bool {
        apply(&mut self.categories, &mut self.notices, result, "categories")
    }

    pub fn apply_ads(&mut self, result: Result<Vec<Ad>, ApiError>) -> bool {
        apply(&mut self.ads, &mut self.notices, result, "ads")
    }

    pub fn apply_offers(&mut self, result: Result<Vec<Offer>, ApiError>) -> bool {
        apply(&mut self.offers, &mut self.notices, result, "offers")
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Add one unit of a product from the latest product listing.
    ///
    /// Unknown ids are ignored: the button that sent them belongs to a grid
    /// that is no longer shown.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Option<u32> {
        let snapshot = self.products.items().unwrap_or_default();
        match self.cart.add(snapshot, product_id) {
            Ok(quantity) => {
                let name = self
                    .cart
                    .line(product_id)
                    .map(|line| line.name.clone())
                    .unwrap_or_default();
                debug!(product_id = %product_id, quantity, "Added to cart");
                self.notices
                    .push(Notice::success(format!("{name} added to cart")));
                Some(quantity)
            }
            Err(e) => {
                debug!(error = %e, "Ignoring add to cart");
                None
            }
        }
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        self.cart.update_quantity(product_id, quantity)
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        self.cart.remove(product_id)
    }

    /// Close out the cart. No order is sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] with an error toast queued and the cart
    /// unchanged when there is nothing to check out.
    pub fn checkout(&mut self) -> Result<Receipt, CartError> {
        match self.cart.checkout() {
            Ok(receipt) => {
                let total = self.price(receipt.total);
                tracing::info!(total = %total, items = receipt.item_count, "Checkout completed");
                self.notices.push(Notice::success(format!(
                    "Order confirmed. Total: {total}"
                )));
                Ok(receipt)
            }
            Err(e) => {
                self.notices.push(Notice::error("Your cart is empty"));
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rendering support
    // -------------------------------------------------------------------------

    /// Format an amount in the page currency, rounded to 2 places.
    #[must_use]
    pub fn price(&self, amount: Decimal) -> String {
        Price::new(amount, self.currency).display()
    }

    /// Drain queued toasts for the response being built.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

/// Replace a section on success; on failure keep it and queue a toast.
fn apply<T>(
    section: &mut Section<T>,
    notices: &mut Vec<Notice>,
    result: Result<Vec<T>, ApiError>,
    what: &str,
) -> bool {
    match result {
        Ok(items) => {
            section.replace(items);
            true
        }
        Err(e) => {
            warn!(error = %e, section = what, "Failed to load section");
            notices.push(Notice::error(format!("Could not load {what}")));
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maktaba_core::{CartState, CategoryId, NoticeLevel};

    fn product(id: i32, price: i64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(price, 0),
            category: Some(category.to_string()),
            category_id: Some(CategoryId::new(1)),
            image: None,
            rating: None,
        }
    }

    fn loaded_page() -> StorefrontPage {
        let mut page = StorefrontPage::new(CurrencyCode::YER);
        let ticket = page.product_ticket();
        page.apply_products(
            &ticket,
            Ok(vec![product(1, 10, "Books"), product(2, 5, "Books")]),
        );
        page
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            message: None,
        }
    }

    #[test]
    fn test_new_page_is_loading_with_empty_cart() {
        let page = StorefrontPage::new(CurrencyCode::YER);

        assert!(page.products().is_loading());
        assert_eq!(page.cart().state(), CartState::Empty);
        assert_eq!(page.filter(), &CategoryFilter::All);
    }

    #[test]
    fn test_add_to_cart_uses_listing_and_notifies() {
        let mut page = loaded_page();

        assert_eq!(page.add_to_cart(ProductId::new(1)), Some(1));
        assert_eq!(page.add_to_cart(ProductId::new(1)), Some(2));
        assert_eq!(page.add_to_cart(ProductId::new(2)), Some(1));

        assert_eq!(page.cart().total(), Decimal::new(25, 0));
        assert_eq!(page.cart().item_count(), 3);
        let notices = page.take_notices();
        assert_eq!(notices.len(), 3);
        assert_eq!(notices[0].message, "Product 1 added to cart");
        assert!(page.take_notices().is_empty());
    }

    #[test]
    fn test_add_unknown_product_is_silent() {
        let mut page = loaded_page();

        assert_eq!(page.add_to_cart(ProductId::new(99)), None);

        assert!(page.cart().is_empty());
        assert!(page.take_notices().is_empty());
    }

    #[test]
    fn test_checkout_reports_total_then_refuses_empty_cart() {
        let mut page = loaded_page();
        page.add_to_cart(ProductId::new(1));
        page.add_to_cart(ProductId::new(1));
        page.take_notices();

        let receipt = page.checkout().unwrap();
        assert_eq!(page.price(receipt.total), "20.00 ريال");
        assert!(page.cart().is_empty());
        let notices = page.take_notices();
        assert_eq!(notices[0].message, "Order confirmed. Total: 20.00 ريال");

        assert_eq!(page.checkout(), Err(CartError::Empty));
        let notices = page.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(page.cart().is_empty());
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut page = loaded_page();
        page.add_to_cart(ProductId::new(1));

        assert!(page.update_quantity(ProductId::new(1), 0));

        assert_eq!(page.cart().item_count(), 0);
        assert_eq!(page.cart().state(), CartState::Empty);
    }

    #[test]
    fn test_stale_product_result_is_dropped() {
        let mut page = loaded_page();
        let books = page.select_category(CategoryFilter::Named("Books".into()));
        let pens = page.select_category(CategoryFilter::Named("Pens".into()));

        // Pens answers first, then the slower Books request.
        assert_eq!(
            page.apply_products(&pens, Ok(vec![])),
            ProductsOutcome::Applied
        );
        assert_eq!(
            page.apply_products(&books, Ok(vec![product(1, 10, "Books")])),
            ProductsOutcome::Stale
        );

        assert!(page.products().is_empty());
        assert_eq!(page.filter(), &CategoryFilter::Named("Pens".into()));
    }

    #[test]
    fn test_failed_refresh_keeps_previous_section() {
        let mut page = loaded_page();
        page.apply_categories(Ok(vec![Category {
            id: CategoryId::new(1),
            name: "Books".into(),
            icon: None,
        }]));

        assert!(!page.apply_categories(Err(server_error())));
        let ticket = page.product_ticket();
        assert_eq!(
            page.apply_products(&ticket, Err(server_error())),
            ProductsOutcome::Failed
        );

        assert_eq!(page.categories().items().unwrap().len(), 1);
        assert_eq!(page.products().items().unwrap().len(), 2);
        let notices = page.take_notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(Notice::is_error));
    }

    #[test]
    fn test_cart_lines_survive_category_switch() {
        let mut page = loaded_page();
        page.add_to_cart(ProductId::new(1));

        let ticket = page.select_category(CategoryFilter::Named("Pens".into()));
        page.apply_products(&ticket, Ok(vec![]));

        assert_eq!(page.cart().item_count(), 1);
        // The product is no longer listed, so it cannot be added again.
        assert_eq!(page.add_to_cart(ProductId::new(1)), None);
    }
}
