//! Catalog records exchanged with the REST backend.
//!
//! Read records mirror the JSON the backend returns; the `*Fields` types are
//! the payloads sent on create and update.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{AdId, CategoryId, OfferId, OrderId, ProductId};

/// A product as listed by `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category name; `None` when the product lost its category.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// URL, data URL, or glyph.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A promotional banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub id: AdId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A special offer. `discount` is free text such as "20%" or "buy 2 get 1".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub discount: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A recorded order, newest first from `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub items_count: u32,
    pub created_at: NaiveDateTime,
}

/// Aggregate counters from `GET /stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub categories_count: u64,
    pub products_count: u64,
    pub orders_count: u64,
    pub ads_count: u64,
    pub offers_count: u64,
    /// `(category name, product count)` pairs.
    #[serde(default)]
    pub products_per_category: Vec<(String, u64)>,
}

/// Payload for creating or updating a product.
///
/// The backend resolves `category` by name and rejects unknown names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub image: String,
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    pub name: String,
    pub icon: String,
}

/// Payload for creating or updating an ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdFields {
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// Payload for creating or updating an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferFields {
    pub title: String,
    pub discount: String,
    pub icon: String,
}

impl From<&Product> for ProductFields {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone().unwrap_or_default(),
            image: product.image.clone().unwrap_or_default(),
        }
    }
}

impl From<&Category> for CategoryFields {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            icon: category.icon.clone().unwrap_or_default(),
        }
    }
}

impl From<&Ad> for AdFields {
    fn from(ad: &Ad) -> Self {
        Self {
            title: ad.title.clone(),
            description: ad.description.clone(),
            icon: ad.icon.clone().unwrap_or_default(),
        }
    }
}

impl From<&Offer> for OfferFields {
    fn from(offer: &Offer) -> Self {
        Self {
            title: offer.title.clone(),
            discount: offer.discount.clone(),
            icon: offer.icon.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_backend_json() {
        let json = r#"{
            "id": 4,
            "name": "Blue pen",
            "price": 2.5,
            "category": "Pens",
            "category_id": 1,
            "image": null,
            "rating": 0.0
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.price, Decimal::new(25, 1));
        assert_eq!(product.category.as_deref(), Some("Pens"));
        assert!(product.image.is_none());
    }

    #[test]
    fn test_product_accepts_integer_price_and_missing_optionals() {
        let product: Product =
            serde_json::from_str(r#"{"id": 1, "name": "Ruler", "price": 10}"#).unwrap();
        assert_eq!(product.price, Decimal::new(10, 0));
        assert!(product.category.is_none());
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_product_fields_send_price_as_number() {
        let fields = ProductFields {
            name: "Notebook".to_string(),
            price: Decimal::new(75, 1),
            category: "Notebooks".to_string(),
            image: "📚".to_string(),
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert!(value["price"].is_number());
        assert_eq!(value["category"], "Notebooks");
    }

    #[test]
    fn test_stats_decodes_pairs() {
        let json = r#"{
            "categories_count": 2,
            "products_count": 3,
            "orders_count": 0,
            "ads_count": 1,
            "offers_count": 0,
            "products_per_category": [["Pens", 2], ["Bags", 1]]
        }"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.products_per_category[1], ("Bags".to_string(), 1));
    }

    #[test]
    fn test_order_decodes_naive_timestamp() {
        let json = r#"{
            "id": 9,
            "total_amount": 20.0,
            "items_count": 2,
            "created_at": "2026-03-01T10:15:30.123456"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.items_count, 2);
        assert_eq!(order.total_amount, Decimal::new(20, 0));
    }
}
