//! Maktaba Core - Shared types library.
//!
//! This crate provides the domain types and view-model state used by all
//! Maktaba components:
//! - `storefront` - Public catalog with the shopping cart
//! - `admin` - Catalog management panel
//! - `cli` - Command-line reader for the catalog API
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! HTTP clients, no rendering. The cart and category filter live here so their
//! state machines can be unit-tested without a browser or a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog records, artwork, session flag
//! - [`cart`] - The shopping cart view-model
//! - [`filter`] - The storefront category filter
//! - [`section`] - A rendered list that survives failed refreshes
//! - [`notice`] - Transient toast notifications

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filter;
pub mod notice;
pub mod section;
pub mod types;

pub use cart::{Cart, CartError, CartLine, CartState, MAX_LINE_QUANTITY, Receipt};
pub use filter::{CategoryFilter, CategorySelection, Selection};
pub use notice::{Notice, NoticeLevel};
pub use section::Section;
pub use types::*;
