//! Admin behaviour of the four catalog collections.
//!
//! [`Editable`] extends the client's [`Resource`] with what the screens
//! need: table rows, modal fields, and form parsing.

use maktaba_client::{Resource, ResourceKind};
use maktaba_core::{
    Ad, AdFields, Artwork, ArtworkKind, Category, CategoryFields, CurrencyCode, Offer,
    OfferFields, Price, Product, ProductFields,
};

use crate::components::{FormField, Table, TableRow};
use crate::forms::{FormData, FormError};

/// A collection with CRUD screens.
pub trait Editable: Resource<Id: From<i32>> + Clone {
    /// Column headings after the artwork column.
    const COLUMNS: &'static [&'static str];

    /// The form offers a category dropdown.
    const NEEDS_CATEGORIES: bool = false;

    /// The backend also deletes products when a record goes away.
    const DELETE_CASCADES_TO_PRODUCTS: bool = false;

    /// Human name of the record.
    fn label(&self) -> &str;

    fn row(&self, currency: CurrencyCode) -> TableRow;

    /// Modal inputs, prefilled from `record` when editing.
    fn form_fields(record: Option<&Self>, categories: &[Category]) -> Vec<FormField>;

    /// Build the write payload from a submission.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] for missing or malformed input.
    fn parse_form(form: &FormData) -> Result<Self::Fields, FormError>;

    fn listing(items: Vec<Self>) -> Listing;
}

/// A freshly fetched collection.
#[derive(Debug, Clone)]
pub enum Listing {
    Products(Vec<Product>),
    Categories(Vec<Category>),
    Ads(Vec<Ad>),
    Offers(Vec<Offer>),
}

impl Listing {
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Products(_) => ResourceKind::Products,
            Self::Categories(_) => ResourceKind::Categories,
            Self::Ads(_) => ResourceKind::Ads,
            Self::Offers(_) => ResourceKind::Offers,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Products(items) => items.len(),
            Self::Categories(items) => items.len(),
            Self::Ads(items) => items.len(),
            Self::Offers(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn table(&self, currency: CurrencyCode) -> Table {
        match self {
            Self::Products(items) => table_of(items, currency),
            Self::Categories(items) => table_of(items, currency),
            Self::Ads(items) => table_of(items, currency),
            Self::Offers(items) => table_of(items, currency),
        }
    }
}

fn table_of<R: Editable>(items: &[R], currency: CurrencyCode) -> Table {
    Table {
        kind: R::KIND,
        columns: R::COLUMNS,
        rows: items.iter().map(|record| record.row(currency)).collect(),
    }
}

impl Editable for Product {
    const COLUMNS: &'static [&'static str] = &["Name", "Price", "Category", "Rating"];
    const NEEDS_CATEGORIES: bool = true;

    fn label(&self) -> &str {
        &self.name
    }

    fn row(&self, currency: CurrencyCode) -> TableRow {
        TableRow::new(self.id, &self.name)
            .artwork(Artwork::classify(self.image.as_deref(), ArtworkKind::Product))
            .cell(&self.name)
            .cell(Price::new(self.price, currency).display())
            .cell(self.category.as_deref().unwrap_or("—"))
            .cell(format!("{:.1}", self.rating.unwrap_or_default()))
    }

    fn form_fields(record: Option<&Self>, categories: &[Category]) -> Vec<FormField> {
        let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
        let category = record
            .and_then(|p| p.category.clone())
            .or_else(|| names.first().cloned())
            .unwrap_or_default();
        vec![
            FormField::text("name", "Name", record.map_or("", |p| p.name.as_str())),
            FormField::price(
                "price",
                "Price",
                record.map(|p| format!("{:.2}", p.price)).unwrap_or_default(),
            ),
            FormField::select("category", "Category", names, &category),
            FormField::artwork(
                "image",
                "Image",
                record.and_then(|p| p.image.as_deref()).unwrap_or_default(),
            ),
        ]
    }

    fn parse_form(form: &FormData) -> Result<ProductFields, FormError> {
        Ok(ProductFields {
            name: form.required("name", "Name")?,
            price: form.price("price")?,
            category: form.required("category", "Category")?,
            image: form.artwork("image", Some(ArtworkKind::Product))?,
        })
    }

    fn listing(items: Vec<Self>) -> Listing {
        Listing::Products(items)
    }
}

impl Editable for Category {
    const COLUMNS: &'static [&'static str] = &["Name"];
    const DELETE_CASCADES_TO_PRODUCTS: bool = true;

    fn label(&self) -> &str {
        &self.name
    }

    fn row(&self, _currency: CurrencyCode) -> TableRow {
        TableRow::new(self.id, &self.name)
            .artwork(Artwork::classify(self.icon.as_deref(), ArtworkKind::Category))
            .cell(&self.name)
    }

    fn form_fields(record: Option<&Self>, _categories: &[Category]) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", record.map_or("", |c| c.name.as_str())),
            FormField::artwork(
                "icon",
                "Icon",
                record.and_then(|c| c.icon.as_deref()).unwrap_or_default(),
            ),
        ]
    }

    /// An empty icon is sent as-is; the storefront shows the folder glyph.
    fn parse_form(form: &FormData) -> Result<CategoryFields, FormError> {
        Ok(CategoryFields {
            name: form.required("name", "Name")?,
            icon: form.artwork("icon", None)?,
        })
    }

    fn listing(items: Vec<Self>) -> Listing {
        Listing::Categories(items)
    }
}

impl Editable for Ad {
    const COLUMNS: &'static [&'static str] = &["Title", "Description"];

    fn label(&self) -> &str {
        &self.title
    }

    fn row(&self, _currency: CurrencyCode) -> TableRow {
        TableRow::new(self.id, &self.title)
            .artwork(Artwork::classify(self.icon.as_deref(), ArtworkKind::Ad))
            .cell(&self.title)
            .cell(&self.description)
    }

    fn form_fields(record: Option<&Self>, _categories: &[Category]) -> Vec<FormField> {
        vec![
            FormField::text("title", "Title", record.map_or("", |a| a.title.as_str())),
            FormField::textarea(
                "description",
                "Description",
                record.map_or("", |a| a.description.as_str()),
            ),
            FormField::artwork(
                "icon",
                "Icon",
                record.and_then(|a| a.icon.as_deref()).unwrap_or_default(),
            ),
        ]
    }

    fn parse_form(form: &FormData) -> Result<AdFields, FormError> {
        Ok(AdFields {
            title: form.required("title", "Title")?,
            description: form.required("description", "Description")?,
            icon: form.artwork("icon", Some(ArtworkKind::Ad))?,
        })
    }

    fn listing(items: Vec<Self>) -> Listing {
        Listing::Ads(items)
    }
}

impl Editable for Offer {
    const COLUMNS: &'static [&'static str] = &["Title", "Discount"];

    fn label(&self) -> &str {
        &self.title
    }

    fn row(&self, _currency: CurrencyCode) -> TableRow {
        TableRow::new(self.id, &self.title)
            .artwork(Artwork::classify(self.icon.as_deref(), ArtworkKind::Offer))
            .cell(&self.title)
            .cell(&self.discount)
    }

    fn form_fields(record: Option<&Self>, _categories: &[Category]) -> Vec<FormField> {
        vec![
            FormField::text("title", "Title", record.map_or("", |o| o.title.as_str())),
            FormField::text("discount", "Discount", record.map_or("", |o| o.discount.as_str())),
            FormField::artwork(
                "icon",
                "Icon",
                record.and_then(|o| o.icon.as_deref()).unwrap_or_default(),
            ),
        ]
    }

    fn parse_form(form: &FormData) -> Result<OfferFields, FormError> {
        Ok(OfferFields {
            title: form.required("title", "Title")?,
            discount: form.required("discount", "Discount")?,
            icon: form.artwork("icon", Some(ArtworkKind::Offer))?,
        })
    }

    fn listing(items: Vec<Self>) -> Listing {
        Listing::Offers(items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use maktaba_core::{CategoryId, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: CategoryId::new(1),
                name: "Books".into(),
                icon: None,
            },
            Category {
                id: CategoryId::new(2),
                name: "Pens".into(),
                icon: Some("🖊️".into()),
            },
        ]
    }

    fn notebook() -> Product {
        Product {
            id: ProductId::new(3),
            name: "Notebook".into(),
            price: Decimal::new(3, 0),
            category: Some("Pens".into()),
            category_id: Some(CategoryId::new(2)),
            image: None,
            rating: None,
        }
    }

    #[test]
    fn test_product_row_formats_price_and_fallback_artwork() {
        let row = notebook().row(CurrencyCode::YER);

        assert_eq!(row.id, 3);
        assert_eq!(row.cells, vec!["Notebook", "3.00 ريال", "Pens", "0.0"]);
        assert_eq!(row.artwork.unwrap().glyph(), "📚");
    }

    #[test]
    fn test_product_form_lists_categories_and_prefills() {
        let fields = Product::form_fields(Some(&notebook()), &categories());

        let category = fields.iter().find(|f| f.name == "category").unwrap();
        assert_eq!(category.options().unwrap().len(), 2);
        assert_eq!(category.value, "Pens");
        let price = fields.iter().find(|f| f.name == "price").unwrap();
        assert_eq!(price.value, "3.00");
    }

    #[test]
    fn test_new_product_form_defaults_to_first_category() {
        let fields = Product::form_fields(None, &categories());

        let category = fields.iter().find(|f| f.name == "category").unwrap();
        assert_eq!(category.value, "Books");
        assert!(fields.iter().find(|f| f.name == "name").unwrap().value.is_empty());
    }

    #[test]
    fn test_parse_product_form() {
        let form = FormData::default()
            .with_text("name", "Ruler")
            .with_text("price", "1.5")
            .with_text("category", "Pens");

        let fields = Product::parse_form(&form).unwrap();

        assert_eq!(fields.price, Decimal::new(15, 1));
        assert_eq!(fields.image, "📚");
    }

    #[test]
    fn test_parse_product_form_rejects_bad_price() {
        let form = FormData::default()
            .with_text("name", "Ruler")
            .with_text("price", "cheap")
            .with_text("category", "Pens");

        assert_eq!(
            Product::parse_form(&form),
            Err(FormError::InvalidPrice("cheap".into()))
        );
    }

    #[test]
    fn test_parse_ad_and_offer_defaults() {
        let ad = Ad::parse_form(
            &FormData::default()
                .with_text("title", "Eid sale")
                .with_text("description", "All week"),
        )
        .unwrap();
        assert_eq!(ad.icon, "🎉");

        let offer = Offer::parse_form(&FormData::default().with_text("title", "Bundle"));
        assert_eq!(offer, Err(FormError::Missing("Discount")));
    }

    #[test]
    fn test_listing_table_carries_kind() {
        let table = Listing::Categories(categories()).table(CurrencyCode::USD);

        assert_eq!(table.kind, ResourceKind::Categories);
        assert_eq!(table.dom_id(), "table-categories");
        assert_eq!(table.rows[1].artwork.as_ref().unwrap().glyph(), "🖊️");
        assert_eq!(table.rows[0].artwork.as_ref().unwrap().glyph(), "📁");
    }
}
