//! Core types for Maktaba.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod artwork;
pub mod catalog;
pub mod id;
pub mod price;
pub mod session;

pub use artwork::{Artwork, ArtworkKind};
pub use catalog::{
    Ad, AdFields, Category, CategoryFields, Offer, OfferFields, Order, Product, ProductFields,
    Stats,
};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use session::SessionFlag;
