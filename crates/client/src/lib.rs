//! Maktaba REST client.
//!
//! Both front ends talk to the catalog backend through [`CatalogApi`]. The
//! production implementation is [`RestClient`], a thin `reqwest` wrapper over
//! the `/api` routes:
//!
//! ```text
//! GET    /products[?category=NAME]   POST /products   PUT/DELETE /products/{id}
//! GET    /categories                 POST /categories PUT/DELETE /categories/{id}
//! GET    /ads                        POST /ads        PUT/DELETE /ads/{id}
//! GET    /offers                     POST /offers     PUT/DELETE /offers/{id}
//! GET    /orders
//! GET    /stats
//! POST   /login
//! ```
//!
//! Every non-2xx response is an [`ApiError`]; a JSON `error` field in the
//! body is kept so callers can show it verbatim. Nothing is retried.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod api;
mod error;
#[cfg(feature = "memory")]
pub mod memory;
mod resource;
mod rest;

pub use api::{CatalogApi, LoginResponse};
pub use error::ApiError;
pub use resource::{Resource, ResourceKind};
pub use rest::RestClient;
