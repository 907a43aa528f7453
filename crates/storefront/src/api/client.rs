//! HTTP implementation of [`StoreApi`].
//!
//! Uses `reqwest` for JSON requests. The product list is cached using `moka`
//! with the TTL from [`ApiConfig`].

use std::sync::Arc;

use boutique_core::{Email, ProductId, UserId};
use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::types::{CartItem, Favorite, Product, User};
use super::{ApiError, StoreApi};
use crate::config::ApiConfig;

/// Longest slice of an error body kept for logs and errors.
const ERROR_BODY_PREVIEW: usize = 200;

/// Cache key for API responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
}

/// Client for the store API.
///
/// Cheaply cloneable; clones share the connection pool and the cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    products: Cache<CacheKey, Arc<Vec<Product>>>,
}

impl ApiClient {
    /// Create a new store API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("boutique-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let products = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.product_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                token: config.token.clone(),
                products,
            }),
        })
    }

    /// Build a request for a path relative to the API base URL.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.inner.base_url.join(path)?;
        let builder = self.inner.client.request(method, url);
        Ok(match &self.inner.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url_path = response.url().path().to_string();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url_path));
        }

        if !status.is_success() {
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            tracing::error!(
                status = %status,
                path = %url_path,
                body = %preview,
                "Store API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        Ok(body)
    }

    /// Send a request and decode the JSON response.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(ERROR_BODY_PREVIEW).collect::<String>(),
                "Failed to parse store API response"
            );
            ApiError::Parse(e)
        })
    }
}

impl StoreApi for ApiClient {
    #[instrument(skip(self, password))]
    async fn login_user(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Vec<User>, ApiError> {
        let request = self.request(Method::GET, "users")?.query(&[
            ("email", email.as_str()),
            ("password", password.expose_secret()),
        ]);

        // The request URL carries the password; keep it out of error messages.
        let users: Vec<User> = self
            .send_json(request)
            .await
            .map_err(|e| match e {
                ApiError::Http(err) => ApiError::Http(err.without_url()),
                other => other,
            })?;

        debug!(matches = users.len(), "Login lookup finished");
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(cached) = self.inner.products.get(&CacheKey::Products).await {
            debug!(count = cached.len(), "Product list served from cache");
            return Ok(cached.as_ref().clone());
        }

        let products: Vec<Product> = self
            .send_json(self.request(Method::GET, "products")?)
            .await?;

        debug!(count = products.len(), "Fetched product list");
        self.inner
            .products
            .insert(CacheKey::Products, Arc::new(products.clone()))
            .await;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get_favorites(&self, user_id: UserId) -> Result<Vec<Favorite>, ApiError> {
        let request = self
            .request(Method::GET, "favorites")?
            .query(&[("userId", user_id.to_string())]);
        self.send_json(request).await
    }

    #[instrument(skip(self, favorite), fields(product_id = %favorite.id()))]
    async fn add_to_favorites(&self, favorite: &Favorite) -> Result<Favorite, ApiError> {
        let request = self.request(Method::POST, "favorites")?.json(favorite);
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn delete_from_favorites(&self, id: ProductId) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &format!("favorites/{id}"))?;
        self.send(request).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn get_all_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.send_json(self.request(Method::GET, "cart")?).await
    }
}
