//! Shopping cart view-model.
//!
//! The cart lives only in the memory of one storefront page. It is created
//! empty, changed only by [`Cart::add`], [`Cart::update_quantity`] and
//! [`Cart::remove`], and emptied by [`Cart::checkout`]. Nothing here writes
//! to storage.
//!
//! # Invariants
//!
//! - At most one line per product, in first-added order.
//! - Every line has `1 <= quantity <= MAX_LINE_QUANTITY`; lines are removed
//!   rather than kept at 0.
//! - The total is derived from the lines on every call and never cached.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::types::{Product, ProductId};

/// Most units of one product a cart line holds. Larger requests are capped.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Input mistakes the cart refuses without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// Checkout was requested with nothing in the cart.
    #[error("the cart is empty")]
    Empty,
    /// The product is not part of the latest catalog snapshot.
    #[error("product {0} is not in the current catalog")]
    UnknownProduct(ProductId),
}

/// Whether the cart has any lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CartState {
    Empty,
    NonEmpty,
}

/// One product entry in the cart.
///
/// Name, price and image are copied from the catalog when the product is
/// first added, so later catalog edits do not change lines already here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `unit_price x quantity`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// What a successful checkout reports back to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// Unrounded order total.
    pub total: Decimal,
    pub item_count: u32,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    #[must_use]
    pub fn state(&self) -> CartState {
        if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product_id`, looked up in `snapshot`.
    ///
    /// Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] and leaves the cart untouched if
    /// the snapshot has no such product.
    pub fn add(&mut self, snapshot: &[Product], product_id: ProductId) -> Result<u32, CartError> {
        let product = snapshot
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(CartError::UnknownProduct(product_id))?;
        Ok(self.add_product(product))
    }

    /// Add one unit of an already resolved product. Returns the new quantity.
    pub fn add_product(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
            return line.quantity;
        }
        self.lines.push(CartLine::from_product(product));
        1
    }

    /// Set a line's quantity. Zero or less removes the line; more than
    /// [`MAX_LINE_QUANTITY`] is capped.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) -> bool {
        if new_quantity <= 0 {
            return self.remove(product_id);
        }
        let Some(line) = self.line_mut(product_id) else {
            return false;
        };
        line.quantity = u32::try_from(new_quantity)
            .unwrap_or(MAX_LINE_QUANTITY)
            .min(MAX_LINE_QUANTITY);
        true
    }

    /// Delete a line. Returns `false` if the product is not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Sum of every line total, unrounded.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities; drives the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Close out the cart.
    ///
    /// Orders are not submitted anywhere: checkout reports the total and
    /// empties the cart, nothing more.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] without changing anything if the cart has
    /// no lines.
    pub fn checkout(&mut self) -> Result<Receipt, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        let receipt = Receipt {
            total: self.total(),
            item_count: self.item_count(),
        };
        self.lines.clear();
        Ok(receipt)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}
