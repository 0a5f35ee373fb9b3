//! Integration tests for Maktaba.
//!
//! Each test starts the real storefront or admin router on an ephemeral port
//! and points it at a `mockito` server standing in for the catalog API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p maktaba-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `storefront_cart` - Page load, category filter, cart and checkout
//! - `admin_crud` - Login gate, dashboard, create/update/delete with re-fetch

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use axum::Router;
use mockito::{Matcher, Mock, ServerGuard};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use maktaba_admin::config::AdminConfig;
use maktaba_storefront::config::StorefrontConfig;

/// Serve `router` on `127.0.0.1:0` and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });
    format!("http://{addr}")
}

/// `/api` root of the mock backend.
pub fn api_url(backend: &ServerGuard) -> String {
    format!("{}/api", backend.url())
}

/// Start the storefront against `backend`.
pub async fn start_storefront(backend: &ServerGuard) -> String {
    let config = StorefrontConfig {
        api_url: api_url(backend),
        ..StorefrontConfig::default()
    };
    let state = maktaba_storefront::state::AppState::new(config)
        .expect("Failed to build storefront state");
    spawn(maktaba_storefront::app(state)).await
}

/// Start the admin panel against `backend`.
pub async fn start_admin(backend: &ServerGuard) -> String {
    let config = AdminConfig {
        api_url: api_url(backend),
        ..AdminConfig::default()
    };
    let state =
        maktaba_admin::state::AppState::new(config).expect("Failed to build admin state");
    spawn(maktaba_admin::app(state)).await
}

/// A browser-like client: keeps cookies and follows redirects.
pub fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// URL-encode form fields.
pub fn form(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

/// The content type for [`form`] bodies.
pub const FORM: &str = "application/x-www-form-urlencoded";

pub fn categories_json() -> Value {
    json!([
        {"id": 1, "name": "Books", "icon": "📚"},
        {"id": 2, "name": "Stationery", "icon": null},
    ])
}

pub fn products_json() -> Value {
    json!([
        {"id": 1, "name": "Tafsir", "price": 25.0, "category": "Books", "category_id": 1, "image": "📘", "rating": 4.5},
        {"id": 2, "name": "Grammar Primer", "price": 12.5, "category": "Books", "category_id": 1, "image": null, "rating": 4.0},
        {"id": 3, "name": "Notebook", "price": 3.0, "category": "Stationery", "category_id": 2, "image": null, "rating": 0},
    ])
}

pub fn ads_json() -> Value {
    json!([{"id": 1, "title": "Back to school", "description": "New stationery every week", "icon": null}])
}

pub fn offers_json() -> Value {
    json!([{"id": 1, "title": "Buy 2 get 1", "discount": "33%", "icon": "🎁"}])
}

/// `GET /api/{path}` with no query string, not yet registered.
pub fn list_mock(backend: &mut ServerGuard, path: &str, body: &Value) -> Mock {
    backend
        .mock("GET", format!("/api/{path}").as_str())
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
}

/// Register [`list_mock`].
pub async fn mock_list(backend: &mut ServerGuard, path: &str, body: &Value) -> Mock {
    list_mock(backend, path, body).create_async().await
}

/// Mock the four catalog lists with the sample records.
pub async fn mock_catalog(backend: &mut ServerGuard) -> Vec<Mock> {
    vec![
        mock_list(backend, "products", &products_json()).await,
        mock_list(backend, "categories", &categories_json()).await,
        mock_list(backend, "ads", &ads_json()).await,
        mock_list(backend, "offers", &offers_json()).await,
    ]
}

/// The page id a storefront page was rendered for.
pub fn page_id(html: &str) -> String {
    let start = html
        .find("data-page=\"")
        .map(|i| i + "data-page=\"".len())
        .expect("Page has no data-page attribute");
    html.get(start..)
        .and_then(|rest| rest.split('"').next())
        .expect("Unterminated data-page attribute")
        .to_string()
}

/// A cookie-keeping client that reports redirects instead of following them.
pub fn admin_browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Mock a successful `POST /api/login` for `admin` / `admin123`.
pub async fn mock_login(backend: &mut ServerGuard) -> Mock {
    backend
        .mock("POST", "/api/login")
        .match_body(Matcher::Json(json!({"username": "admin", "password": "admin123"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"isLoggedIn": true, "username": "admin"}).to_string())
        .create_async()
        .await
}
