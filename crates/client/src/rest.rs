//! `reqwest` implementation of [`CatalogApi`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use maktaba_core::{Order, Product, Stats};

use crate::api::{CatalogApi, LoginResponse};
use crate::error::ApiError;
use crate::resource::Resource;

// =============================================================================
// RestClient
// =============================================================================

/// Client for the catalog REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    client: reqwest::Client,
    base_url: Url,
}

/// Error body the backend sends with 4xx/5xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl RestClient {
    /// Create a client rooted at `base_url` (for example
    /// `http://127.0.0.1:5000/api`).
    ///
    /// With no `timeout`, requests wait as long as the transport allows.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(RestClientInner {
                client: builder.build()?,
                base_url,
            }),
        })
    }

    /// The configured API root.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build `{base}/{segments...}`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner.client.request(method, url)
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            warn!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    /// Send a request and decode a JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to parse catalog API response"
            );
            ApiError::Parse(e)
        })
    }

    async fn write<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.execute(self.request(method, url).json(body)).await
    }
}

impl CatalogApi for RestClient {
    #[instrument(skip(self))]
    async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint(&["products"])?;
        if let Some(category) = category {
            url.query_pairs_mut().append_pair("category", category);
        }
        let products: Vec<Product> = self.execute(self.request(Method::GET, url)).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    #[instrument(skip(self), fields(kind = %R::KIND))]
    async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let url = self.endpoint(&[R::KIND.path()])?;
        let records: Vec<R> = self.execute(self.request(Method::GET, url)).await?;
        debug!(count = records.len(), "Fetched records");
        Ok(records)
    }

    #[instrument(skip(self, fields), fields(kind = %R::KIND))]
    async fn create<R: Resource>(&self, fields: &R::Fields) -> Result<R, ApiError> {
        self.write(Method::POST, &[R::KIND.path()], fields).await
    }

    #[instrument(skip(self, fields), fields(kind = %R::KIND, id = %id))]
    async fn update<R: Resource>(&self, id: R::Id, fields: &R::Fields) -> Result<R, ApiError> {
        let id = id.to_string();
        self.write(Method::PUT, &[R::KIND.path(), &id], fields).await
    }

    #[instrument(skip(self), fields(kind = %R::KIND, id = %id))]
    async fn delete<R: Resource>(&self, id: R::Id) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&[R::KIND.path(), &id])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["orders"])?;
        self.execute(self.request(Method::GET, url)).await
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<Stats, ApiError> {
        let url = self.endpoint(&["stats"])?;
        self.execute(self.request(Method::GET, url)).await
    }

    #[instrument(skip(self, password))]
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({
            "username": username,
            "password": password.expose_secret(),
        });
        self.write(Method::POST, &["login"], &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maktaba_core::{Ad, Category, CategoryFields, CategoryId, ProductFields, ProductId};
    use mockito::{Matcher, Server};
    use rust_decimal::Decimal;

    fn client(server: &Server) -> RestClient {
        RestClient::new(&format!("{}/api", server.url()), None).unwrap()
    }

    #[tokio::test]
    async fn test_list_products_without_category_sends_no_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/products")
            .match_query(Matcher::Missing)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":1,"name":"Quran","price":15.5,"category":"Books","category_id":2,"image":"📖","rating":4.5}]"#,
            )
            .create_async()
            .await;

        let products = client(&server).list_products(None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].price, Decimal::new(155, 1));
    }

    #[tokio::test]
    async fn test_list_products_encodes_category() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/products")
            .match_query(Matcher::UrlEncoded(
                "category".into(),
                "كتب ومراجع".into(),
            ))
            .with_body("[]")
            .create_async()
            .await;

        let products = client(&server)
            .list_products(Some("كتب ومراجع"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_status_error_keeps_server_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/categories")
            .with_status(400)
            .with_body(r#"{"error":"Category already exists"}"#)
            .create_async()
            .await;

        let fields = CategoryFields {
            name: "Books".to_string(),
            icon: "📚".to_string(),
        };
        let err = client(&server)
            .create::<Category>(&fields)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.server_message(), Some("Category already exists"));
    }

    #[tokio::test]
    async fn test_status_error_without_json_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/ads")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = client(&server).list::<Ad>().await.unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert_eq!(err.server_message(), None);
    }

    #[tokio::test]
    async fn test_update_puts_to_record_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/products/7")
            .match_body(Matcher::PartialJsonString(
                r#"{"name":"Tafsir","category":"Books","image":"📘"}"#.to_string(),
            ))
            .with_body(r#"{"id":7,"name":"Tafsir","price":20.0,"category":"Books","image":"📘"}"#)
            .create_async()
            .await;

        let fields = ProductFields {
            name: "Tafsir".to_string(),
            price: Decimal::new(20, 0),
            category: "Books".to_string(),
            image: "📘".to_string(),
        };
        let product = client(&server)
            .update::<Product>(ProductId::new(7), &fields)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(product.name, "Tafsir");
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/categories/3")
            .with_body(r#"{"message":"deleted"}"#)
            .create_async()
            .await;

        client(&server)
            .delete::<Category>(CategoryId::new(3))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/stats")
            .with_body("not json")
            .create_async()
            .await;

        let err = client(&server).stats().await.unwrap_err();

        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/login")
            .match_body(Matcher::Json(serde_json::json!({
                "username": "admin",
                "password": "wrong",
            })))
            .with_status(401)
            .with_body(r#"{"error":"Invalid username or password"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .login("admin", &SecretString::from("wrong"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.server_message(), Some("Invalid username or password"));
    }

    #[tokio::test]
    async fn test_login_accepted() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/login")
            .with_body(r#"{"isLoggedIn":true,"username":"admin"}"#)
            .create_async()
            .await;

        let response = client(&server)
            .login("admin", &SecretString::from("secret"))
            .await
            .unwrap();

        assert!(response.is_logged_in);
        assert_eq!(response.username, "admin");
    }

    #[test]
    fn test_rejects_relative_base_url() {
        assert!(matches!(
            RestClient::new("/api", None),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = RestClient::new("http://127.0.0.1:5000/api/", None).unwrap();
        let url = client.endpoint(&["products", "4"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/products/4");
    }
}
