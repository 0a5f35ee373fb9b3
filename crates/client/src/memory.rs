//! In-memory [`CatalogApi`] that behaves like the REST backend.
//!
//! Records are kept as JSON objects so one generic implementation serves
//! every [`Resource`]. Backend rules that the front ends depend on are
//! reproduced: products resolve their category by name, category names are
//! unique, deleting a category removes its products, and orders list newest
//! first.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use maktaba_core::{
    Ad, AdId, Category, CategoryId, Offer, OfferId, Order, Product, ProductId, Stats,
};
use rust_decimal::Decimal;

use crate::api::{CatalogApi, LoginResponse};
use crate::error::ApiError;
use crate::resource::{Resource, ResourceKind};

/// Category name the backend treats as "no filter".
const ALL_CATEGORIES: &str = "الكل";

#[derive(Default)]
struct State {
    tables: HashMap<ResourceKind, Vec<Map<String, Value>>>,
    next_id: i64,
    orders: Vec<Order>,
    admins: Vec<(String, String)>,
    failure: Option<(u16, Option<String>)>,
    list_calls: HashMap<ResourceKind, usize>,
    product_queries: Vec<Option<String>>,
}

/// Catalog held in process memory.
#[derive(Default)]
pub struct MemoryCatalog {
    state: Mutex<State>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Two categories, three products, one ad, one offer, and an `admin`
    /// account with password `admin123`.
    #[must_use]
    pub fn sample() -> Self {
        let category = |id, name: &str, icon: &str| Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            icon: Some(icon.to_string()),
        };
        let product = |id, name: &str, price, category_id, category: &str| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            category: Some(category.to_string()),
            category_id: Some(CategoryId::new(category_id)),
            image: Some("📘".to_string()),
            rating: Some(4.5),
        };

        Self::new()
            .with(vec![
                category(1, "Books", "📚"),
                category(2, "Stationery", "✏️"),
            ])
            .with(vec![
                product(1, "Tafsir", Decimal::new(2500, 2), 1, "Books"),
                product(2, "Grammar Primer", Decimal::new(1250, 2), 1, "Books"),
                product(3, "Notebook", Decimal::new(300, 2), 2, "Stationery"),
            ])
            .with(vec![Ad {
                id: AdId::new(1),
                title: "Back to school".to_string(),
                description: "New stationery every week".to_string(),
                icon: None,
            }])
            .with(vec![Offer {
                id: OfferId::new(1),
                title: "Buy 2 get 1".to_string(),
                discount: "33%".to_string(),
                icon: Some("🎁".to_string()),
            }])
            .with_admin("admin", "admin123")
    }

    /// Seed records of one kind.
    #[must_use]
    pub fn with<R: Resource + Serialize>(self, records: Vec<R>) -> Self {
        {
            let mut state = self.lock();
            for record in records {
                if let Ok(Value::Object(object)) = serde_json::to_value(&record) {
                    let id = object.get("id").and_then(Value::as_i64).unwrap_or_default();
                    state.next_id = state.next_id.max(id);
                    state.tables.entry(R::KIND).or_default().push(object);
                }
            }
        }
        self
    }

    #[must_use]
    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.lock().orders.extend(orders);
        self
    }

    #[must_use]
    pub fn with_admin(self, username: &str, password: &str) -> Self {
        self.lock()
            .admins
            .push((username.to_string(), password.to_string()));
        self
    }

    /// Make every following call fail with `status` until
    /// [`recover`](Self::recover) is called.
    pub fn fail_with(&self, status: u16, message: Option<&str>) {
        self.lock().failure = Some((status, message.map(str::to_string)));
    }

    pub fn recover(&self) {
        self.lock().failure = None;
    }

    /// How many list calls hit `kind` so far.
    #[must_use]
    pub fn list_calls(&self, kind: ResourceKind) -> usize {
        self.lock().list_calls.get(&kind).copied().unwrap_or_default()
    }

    /// The `category` parameter of every product listing, in order.
    #[must_use]
    pub fn product_queries(&self) -> Vec<Option<String>> {
        self.lock().product_queries.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn check(&self) -> Result<(), ApiError> {
        match &self.failure {
            Some((status, message)) => Err(ApiError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn table(&mut self, kind: ResourceKind) -> &mut Vec<Map<String, Value>> {
        self.tables.entry(kind).or_default()
    }

    fn rows(&self, kind: ResourceKind) -> &[Map<String, Value>] {
        self.tables.get(&kind).map_or(&[], Vec::as_slice)
    }

    fn category_id(&self, name: &str) -> Option<i64> {
        self.rows(ResourceKind::Categories)
            .iter()
            .find(|c| c.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|c| c.get("id").and_then(Value::as_i64))
    }

    fn position(&mut self, kind: ResourceKind, id: &str) -> Result<usize, ApiError> {
        self.table(kind)
            .iter()
            .position(|record| record.get("id").is_some_and(|v| v.to_string() == id))
            .ok_or(ApiError::Status {
                status: 404,
                message: None,
            })
    }

    /// Point a product at the category named in its payload.
    fn resolve_category(&self, product: &mut Map<String, Value>) -> Result<(), ApiError> {
        let name = product
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let id = self.category_id(name).ok_or_else(|| bad_request("Category not found"))?;
        product.insert("category_id".to_string(), Value::from(id));
        Ok(())
    }
}

fn bad_request(message: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        message: Some(message.to_string()),
    }
}

fn decode<T: DeserializeOwned>(object: &Map<String, Value>) -> Result<T, ApiError> {
    Ok(serde_json::from_value(Value::Object(object.clone()))?)
}

fn fields_object<F: Serialize>(fields: &F) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(fields)? {
        Value::Object(object) => Ok(object),
        _ => Err(bad_request("Expected a JSON object")),
    }
}

impl CatalogApi for MemoryCatalog {
    async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, ApiError> {
        let mut state = self.lock();
        *state.list_calls.entry(ResourceKind::Products).or_default() += 1;
        state.product_queries.push(category.map(str::to_string));
        state.check()?;

        let wanted = match category {
            Some(name) if name != ALL_CATEGORIES => match state.category_id(name) {
                Some(id) => Some(id),
                None => return Ok(Vec::new()),
            },
            _ => None,
        };

        state
            .table(ResourceKind::Products)
            .iter()
            .filter(|p| {
                wanted.is_none_or(|id| p.get("category_id").and_then(Value::as_i64) == Some(id))
            })
            .map(decode)
            .collect()
    }

    async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let mut state = self.lock();
        *state.list_calls.entry(R::KIND).or_default() += 1;
        state.check()?;
        state.table(R::KIND).iter().map(decode).collect()
    }

    async fn create<R: Resource>(&self, fields: &R::Fields) -> Result<R, ApiError> {
        let mut state = self.lock();
        state.check()?;
        let mut record = fields_object(fields)?;

        match R::KIND {
            ResourceKind::Products => {
                state.resolve_category(&mut record)?;
                record.insert("rating".to_string(), Value::from(0.0));
            }
            ResourceKind::Categories => {
                let name = record.get("name").and_then(Value::as_str).unwrap_or_default();
                if state.category_id(name).is_some() {
                    return Err(bad_request("Category already exists"));
                }
            }
            ResourceKind::Ads | ResourceKind::Offers => {}
        }

        state.next_id += 1;
        record.insert("id".to_string(), Value::from(state.next_id));
        let created = decode(&record)?;
        state.table(R::KIND).push(record);
        Ok(created)
    }

    async fn update<R: Resource>(&self, id: R::Id, fields: &R::Fields) -> Result<R, ApiError> {
        let mut state = self.lock();
        state.check()?;
        let index = state.position(R::KIND, &id.to_string())?;
        let mut changes = fields_object(fields)?;

        if R::KIND == ResourceKind::Products {
            // Unknown category names leave the product where it was.
            if state.resolve_category(&mut changes).is_err() {
                changes.remove("category");
            }
        }

        let updated = {
            let table = state.table(R::KIND);
            let record = table.get_mut(index).ok_or(ApiError::Status {
                status: 404,
                message: None,
            })?;
            record.extend(changes);
            record.clone()
        };

        if R::KIND == ResourceKind::Categories {
            let category_id = updated.get("id").and_then(Value::as_i64);
            let name = updated.get("name").cloned().unwrap_or(Value::Null);
            for product in state.table(ResourceKind::Products) {
                if product.get("category_id").and_then(Value::as_i64) == category_id {
                    product.insert("category".to_string(), name.clone());
                }
            }
        }

        decode(&updated)
    }

    async fn delete<R: Resource>(&self, id: R::Id) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.check()?;
        let index = state.position(R::KIND, &id.to_string())?;
        let removed = state.table(R::KIND).remove(index);

        if R::KIND == ResourceKind::Categories {
            let category_id = removed.get("id").and_then(Value::as_i64);
            state
                .table(ResourceKind::Products)
                .retain(|p| p.get("category_id").and_then(Value::as_i64) != category_id);
        }
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let state = self.lock();
        state.check()?;
        let mut orders = state.orders.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn stats(&self) -> Result<Stats, ApiError> {
        let state = self.lock();
        state.check()?;

        let products = state.rows(ResourceKind::Products);
        let products_per_category = state
            .rows(ResourceKind::Categories)
            .iter()
            .map(|c| {
                let id = c.get("id").and_then(Value::as_i64);
                let name = c.get("name").and_then(Value::as_str).unwrap_or_default();
                let n = products
                    .iter()
                    .filter(|p| p.get("category_id").and_then(Value::as_i64) == id)
                    .count();
                (name.to_string(), n as u64)
            })
            .collect();

        Ok(Stats {
            categories_count: state.rows(ResourceKind::Categories).len() as u64,
            products_count: products.len() as u64,
            orders_count: state.orders.len() as u64,
            ads_count: state.rows(ResourceKind::Ads).len() as u64,
            offers_count: state.rows(ResourceKind::Offers).len() as u64,
            products_per_category,
        })
    }

    async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        let state = self.lock();
        state.check()?;
        let known = state
            .admins
            .iter()
            .any(|(u, p)| u == username && p == password.expose_secret());
        if known {
            Ok(LoginResponse {
                is_logged_in: true,
                username: username.to_string(),
            })
        } else {
            Err(ApiError::Status {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            })
        }
    }
}
