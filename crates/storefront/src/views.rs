//! Display data for templates, built from a locked page.

use maktaba_core::{
    Ad, Artwork, ArtworkKind, Category, MAX_LINE_QUANTITY, Notice, Offer, Product,
};

use crate::page::StorefrontPage;
use crate::pages::PageId;

/// Product card in the grid.
#[derive(Clone)]
pub struct ProductCard {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub category: String,
    pub artwork: Artwork,
    pub rating: Option<String>,
}

/// Category button in the filter bar. `name` is `None` for "All".
#[derive(Clone)]
pub struct CategoryChip {
    pub name: Option<String>,
    pub label: String,
    pub artwork: Option<Artwork>,
    pub active: bool,
}

/// Ad or offer banner.
#[derive(Clone)]
pub struct Banner {
    pub title: String,
    pub body: String,
    pub artwork: Artwork,
}

#[derive(Clone)]
pub struct CartLineView {
    pub product_id: i32,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    /// Quantity sent by the "+" button.
    pub increment_quantity: u32,
    /// Quantity sent by the "−" button; 0 removes the line.
    pub decrement_quantity: u32,
    pub line_total: String,
    pub artwork: Artwork,
}

#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// The badge is hidden while the cart is empty.
    #[must_use]
    pub const fn show_badge(&self) -> bool {
        self.item_count > 0
    }
}

/// The product grid and its heading.
#[derive(Clone)]
pub struct ProductsView {
    pub title: String,
    /// `None` while the first fetch is outstanding.
    pub cards: Option<Vec<ProductCard>>,
}

impl ProductsView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.as_ref().is_some_and(Vec::is_empty)
    }
}

/// Everything a full page render needs, detached from the page lock.
#[derive(Clone)]
pub struct PageView {
    pub page_id: String,
    pub products: ProductsView,
    pub categories: Option<Vec<CategoryChip>>,
    pub ads: Option<Vec<Banner>>,
    pub offers: Option<Vec<Banner>>,
    pub cart: CartView,
    pub notices: Vec<Notice>,
}

impl PageView {
    /// Snapshot the page and drain its toasts.
    pub fn build(page_id: PageId, page: &mut StorefrontPage) -> Self {
        Self {
            page_id: page_id.to_string(),
            products: products_view(page),
            categories: categories_view(page),
            ads: page
                .ads()
                .items()
                .map(|ads| ads.iter().map(Banner::from).collect()),
            offers: page
                .offers()
                .items()
                .map(|offers| offers.iter().map(Banner::from).collect()),
            cart: cart_view(page),
            notices: page.take_notices(),
        }
    }
}

#[must_use]
pub fn products_view(page: &StorefrontPage) -> ProductsView {
    ProductsView {
        title: page.filter().title(),
        cards: page.products().items().map(|products| {
            products
                .iter()
                .map(|product| ProductCard::new(product, page))
                .collect()
        }),
    }
}

#[must_use]
pub fn categories_view(page: &StorefrontPage) -> Option<Vec<CategoryChip>> {
    let filter = page.filter();
    page.categories().items().map(|categories| {
        std::iter::once(CategoryChip {
            name: None,
            label: "All".to_string(),
            artwork: None,
            active: filter.is_selected(None),
        })
        .chain(categories.iter().map(|category| {
            CategoryChip::new(category, filter.is_selected(Some(&category.name)))
        }))
        .collect()
    })
}

#[must_use]
pub fn cart_view(page: &StorefrontPage) -> CartView {
    let cart = page.cart();
    CartView {
        lines: cart
            .lines()
            .iter()
            .map(|line| CartLineView {
                product_id: line.product_id.as_i32(),
                name: line.name.clone(),
                unit_price: page.price(line.unit_price),
                quantity: line.quantity,
                increment_quantity: line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY),
                decrement_quantity: line.quantity.saturating_sub(1),
                line_total: page.price(line.line_total()),
                artwork: Artwork::classify(line.image.as_deref(), ArtworkKind::Product),
            })
            .collect(),
        total: page.price(cart.total()),
        item_count: cart.item_count(),
    }
}

impl ProductCard {
    fn new(product: &Product, page: &StorefrontPage) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: page.price(product.price),
            category: product.category.clone().unwrap_or_default(),
            artwork: Artwork::classify(product.image.as_deref(), ArtworkKind::Product),
            rating: product
                .rating
                .filter(|r| *r > 0.0)
                .map(|r| format!("{r:.1}")),
        }
    }
}

impl CategoryChip {
    fn new(category: &Category, active: bool) -> Self {
        Self {
            name: Some(category.name.clone()),
            label: category.name.clone(),
            artwork: Some(Artwork::classify(
                category.icon.as_deref(),
                ArtworkKind::Category,
            )),
            active,
        }
    }
}

impl From<&Ad> for Banner {
    fn from(ad: &Ad) -> Self {
        Self {
            title: ad.title.clone(),
            body: ad.description.clone(),
            artwork: Artwork::classify(ad.icon.as_deref(), ArtworkKind::Ad),
        }
    }
}

impl From<&Offer> for Banner {
    fn from(offer: &Offer) -> Self {
        Self {
            title: offer.title.clone(),
            body: offer.discount.clone(),
            artwork: Artwork::classify(offer.icon.as_deref(), ArtworkKind::Offer),
        }
    }
}
