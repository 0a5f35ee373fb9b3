//! Storefront page, category filter and cart against a mock catalog API.

#![allow(clippy::unwrap_used)]

use maktaba_integration_tests::{
    FORM, browser, form, mock_catalog, page_id, products_json, start_storefront,
};
use mockito::{Matcher, Server};
use reqwest::{Client, StatusCode};
use serde_json::Value;

async fn post(client: &Client, url: &str, fields: &[(&str, &str)]) -> reqwest::Response {
    client
        .post(url)
        .header("content-type", FORM)
        .body(form(fields))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_page_load_renders_catalog_with_empty_cart() {
    let mut backend = Server::new_async().await;
    let mocks = mock_catalog(&mut backend).await;
    let base = start_storefront(&backend).await;

    let resp = browser().get(&base).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Tafsir"));
    assert!(html.contains("Back to school"));
    assert!(html.contains("33%"));
    assert!(html.contains("Your cart is empty"));
    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_cart_add_update_and_checkout() {
    let mut backend = Server::new_async().await;
    let _mocks = mock_catalog(&mut backend).await;
    let base = start_storefront(&backend).await;
    let client = browser();

    let html = client.get(&base).send().await.unwrap().text().await.unwrap();
    let page = format!("{base}/p/{}", page_id(&html));

    post(&client, &format!("{page}/cart/add"), &[("product_id", "1")]).await;
    let resp = post(&client, &format!("{page}/cart/add"), &[("product_id", "1")]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cart = resp.text().await.unwrap();
    assert!(cart.contains("Tafsir added to cart"));
    assert!(cart.contains("50.00 ريال"));

    let resp = post(
        &client,
        &format!("{page}/cart/update"),
        &[("product_id", "1"), ("quantity", "3")],
    )
    .await;
    assert!(resp.text().await.unwrap().contains("75.00 ريال"));

    let resp = post(&client, &format!("{page}/checkout"), &[]).await;
    let receipt = resp.text().await.unwrap();
    assert!(receipt.contains("Order confirmed. Total: 75.00 ريال"));
    assert!(receipt.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_decrement_to_zero_removes_line() {
    let mut backend = Server::new_async().await;
    let _mocks = mock_catalog(&mut backend).await;
    let base = start_storefront(&backend).await;
    let client = browser();

    let html = client.get(&base).send().await.unwrap().text().await.unwrap();
    let page = format!("{base}/p/{}", page_id(&html));

    post(&client, &format!("{page}/cart/add"), &[("product_id", "3")]).await;
    let resp = post(
        &client,
        &format!("{page}/cart/update"),
        &[("product_id", "3"), ("quantity", "0")],
    )
    .await;

    let cart = resp.text().await.unwrap();
    assert!(cart.contains("Your cart is empty"));
    assert!(cart.contains(r#"<span id="cart-badge" class="badge" hx-swap-oob="true" hidden>0</span>"#));
}

#[tokio::test]
async fn test_oversized_quantity_is_capped() {
    let mut backend = Server::new_async().await;
    let _mocks = mock_catalog(&mut backend).await;
    let base = start_storefront(&backend).await;
    let client = browser();

    let html = client.get(&base).send().await.unwrap().text().await.unwrap();
    let page = format!("{base}/p/{}", page_id(&html));

    post(&client, &format!("{page}/cart/add"), &[("product_id", "3")]).await;
    let resp = post(
        &client,
        &format!("{page}/cart/update"),
        &[("product_id", "3"), ("quantity", "99999999999")],
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cart = resp.text().await.unwrap();
    assert!(cart.contains(r#""quantity": 999}"#));
    assert!(cart.contains(r#""quantity": 998}"#));
    assert!(cart.contains(r#"hx-swap-oob="true">999</span>"#));
}

#[tokio::test]
async fn test_reload_starts_a_new_empty_cart() {
    let mut backend = Server::new_async().await;
    let _mocks = mock_catalog(&mut backend).await;
    let base = start_storefront(&backend).await;
    let client = browser();

    let first = client.get(&base).send().await.unwrap().text().await.unwrap();
    let first_page = page_id(&first);
    post(
        &client,
        &format!("{base}/p/{first_page}/cart/add"),
        &[("product_id", "2")],
    )
    .await;

    let second = client.get(&base).send().await.unwrap().text().await.unwrap();

    assert_ne!(page_id(&second), first_page);
    assert!(second.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_checkout_of_empty_cart_shows_error() {
    let mut backend = Server::new_async().await;
    let _mocks = mock_catalog(&mut backend).await;
    let base = start_storefront(&backend).await;
    let client = browser();

    let html = client.get(&base).send().await.unwrap().text().await.unwrap();
    let resp = post(&client, &format!("{base}/p/{}/checkout", page_id(&html)), &[]).await;

    let body = resp.text().await.unwrap();
    assert!(body.contains("toast-error"));
    assert!(!body.contains("Order confirmed"));
}

#[tokio::test]
async fn test_category_filter_queries_backend() {
    let mut backend = Server::new_async().await;
    let _mocks = mock_catalog(&mut backend).await;
    let stationery = backend
        .mock("GET", "/api/products")
        .match_query(Matcher::UrlEncoded("category".into(), "Stationery".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(Value::Array(vec![products_json()[2].clone()]).to_string())
        .expect(1)
        .create_async()
        .await;
    let base = start_storefront(&backend).await;
    let client = browser();

    let html = client.get(&base).send().await.unwrap().text().await.unwrap();
    let page = format!("{base}/p/{}", page_id(&html));
    let grid = client
        .get(format!("{page}/products?category=Stationery"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(grid.contains("Notebook"));
    assert!(!grid.contains("Tafsir"));
    stationery.assert_async().await;

    // Products outside the shown grid cannot be added
    let resp = post(&client, &format!("{page}/cart/add"), &[("product_id", "1")]).await;
    assert!(resp.text().await.unwrap().contains("Your cart is empty"));
}

#[tokio::test]
async fn test_empty_category_shows_placeholder() {
    let mut backend = Server::new_async().await;
    let _mocks = mock_catalog(&mut backend).await;
    let toys = backend
        .mock("GET", "/api/products")
        .match_query(Matcher::UrlEncoded("category".into(), "Toys".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;
    let base = start_storefront(&backend).await;
    let client = browser();

    let html = client.get(&base).send().await.unwrap().text().await.unwrap();
    assert!(!html.contains("No products in this category"));
    let page = format!("{base}/p/{}", page_id(&html));
    let resp = client
        .get(format!("{page}/products?category=Toys"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let grid = resp.text().await.unwrap();
    assert!(grid.contains("No products in this category"));
    assert!(!grid.contains("toast-error"));
    toys.assert_async().await;
}

#[tokio::test]
async fn test_backend_failure_keeps_page_usable() {
    let mut backend = Server::new_async().await;
    for path in ["/api/products", "/api/categories", "/api/ads", "/api/offers"] {
        backend
            .mock("GET", path)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": "Database is down"}"#)
            .create_async()
            .await;
    }
    let base = start_storefront(&backend).await;

    let resp = browser().get(&base).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.contains("toast-error"));
    assert!(html.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_unknown_page_asks_for_refresh() {
    let backend = Server::new_async().await;
    let base = start_storefront(&backend).await;

    let resp = post(
        &browser(),
        &format!("{base}/p/00000000-0000-4000-8000-000000000000/cart/add"),
        &[("product_id", "1")],
    )
    .await;

    assert_eq!(resp.status(), StatusCode::GONE);
    assert_eq!(resp.headers()["HX-Refresh"], "true");
}

#[tokio::test]
async fn test_health() {
    let backend = Server::new_async().await;
    let base = start_storefront(&backend).await;

    let resp = browser().get(format!("{base}/health")).send().await.unwrap();

    assert_eq!(resp.text().await.unwrap(), "ok");
}
