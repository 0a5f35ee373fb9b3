//! The catalog API seam.

use std::future::Future;

use secrecy::SecretString;
use serde::Deserialize;

use maktaba_core::{Order, Product, Stats};

use crate::error::ApiError;
use crate::resource::Resource;

/// Successful `POST /login` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub is_logged_in: bool,
    pub username: String,
}

/// Operations the front ends need from the catalog backend.
///
/// Every call is a single request; none is retried or cached.
pub trait CatalogApi: Send + Sync + 'static {
    /// List products, optionally scoped to a category name.
    fn list_products(
        &self,
        category: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// List every record of `R`.
    fn list<R: Resource>(&self) -> impl Future<Output = Result<Vec<R>, ApiError>> + Send;

    fn create<R: Resource>(
        &self,
        fields: &R::Fields,
    ) -> impl Future<Output = Result<R, ApiError>> + Send;

    fn update<R: Resource>(
        &self,
        id: R::Id,
        fields: &R::Fields,
    ) -> impl Future<Output = Result<R, ApiError>> + Send;

    fn delete<R: Resource>(&self, id: R::Id) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Orders, newest first.
    fn list_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    fn stats(&self) -> impl Future<Output = Result<Stats, ApiError>> + Send;

    /// Check admin credentials. A rejected login is an [`ApiError::Status`]
    /// carrying the backend's message.
    fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;
}
