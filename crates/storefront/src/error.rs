//! Unified error handling.
//!
//! Catalog API failures during ordinary browsing are turned into toasts by
//! the page view-model and never reach this type. `AppError` covers what is
//! left: requests that cannot be served at all.

use axum::{
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The page id is unknown or its cart expired.
    #[error("Page expired")]
    PageExpired,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Request rejected");

        match self {
            // HTMX reloads the whole page, which mints a fresh one.
            Self::PageExpired => (
                StatusCode::GONE,
                AppendHeaders([("HX-Refresh", "true")]),
                "Page expired, reloading",
            )
                .into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
