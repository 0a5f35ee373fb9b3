//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//! GET  /                            - Redirect to the dashboard
//!
//! # Login flag
//! GET  /admin-login                 - Login page (redirects to /admin when flagged)
//! POST /admin-login                 - Check credentials with the API, set the flag
//! POST /admin/logout                - Clear the flag
//!
//! # Console (flag required)
//! GET  /admin                       - Dashboard counters
//! GET  /admin/orders                - Orders, newest first
//! GET  /admin/{kind}                - List screen (products, categories, ads, offers)
//! GET  /admin/{kind}/new            - Create modal (HTMX)
//! POST /admin/{kind}                - Create (multipart), then re-fetch
//! GET  /admin/{kind}/{id}/edit      - Edit modal (HTMX)
//! POST /admin/{kind}/{id}           - Update (multipart), then re-fetch
//! DELETE /admin/{kind}/{id}         - Delete, then re-fetch
//! ```

pub mod auth;
pub mod crud;
pub mod dashboard;
pub mod orders;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use maktaba_core::{Ad, Category, Offer, Product};

use crate::resources::Editable;
use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/admin") }))
        .route("/admin-login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin", get(dashboard::index))
        .route("/admin/orders", get(orders::index))
        .merge(resource_routes::<Product>())
        .merge(resource_routes::<Category>())
        .merge(resource_routes::<Ad>())
        .merge(resource_routes::<Offer>())
}

/// CRUD routes for one collection under `/admin/{kind}`.
fn resource_routes<R: Editable>() -> Router<AppState> {
    let base = format!("/admin/{}", R::KIND);
    Router::new()
        .route(&base, get(crud::index::<R>).post(crud::create::<R>))
        .route(&format!("{base}/new"), get(crud::new_form::<R>))
        .route(
            &format!("{base}/{{id}}"),
            post(crud::update::<R>).delete(crud::delete::<R>),
        )
        .route(&format!("{base}/{{id}}/edit"), get(crud::edit_form::<R>))
}
