//! Store API client.
//!
//! # Architecture
//!
//! - The store API is the source of truth for users, products, favorites and
//!   cart ratings. Nothing is persisted locally.
//! - [`StoreApi`] is the seam between route handlers and the network: handlers
//!   and services are generic over it, [`ApiClient`] implements it over HTTP.
//! - The product list is cached in memory via `moka` (short TTL).
//!
//! # Example
//!
//! ```rust,ignore
//! use boutique_storefront::api::{ApiClient, StoreApi};
//!
//! let client = ApiClient::new(&config.api)?;
//! let products = client.get_products().await?;
//! ```

mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{CartItem, Favorite, Product, User};

use std::future::Future;

use boutique_core::{Email, ProductId, UserId};
use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur when talking to the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("store API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Operations the storefront needs from the store API.
///
/// Every call is a single request; there are no retries.
pub trait StoreApi: Send + Sync {
    /// Look up the accounts matching a pair of credentials.
    ///
    /// An empty list means the credentials are wrong.
    fn login_user(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<Vec<User>, ApiError>> + Send;

    /// Fetch the whole catalog.
    fn get_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch the favorites saved by a user.
    fn get_favorites(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Favorite>, ApiError>> + Send;

    /// Save a favorite, returning the stored record.
    fn add_to_favorites(
        &self,
        favorite: &Favorite,
    ) -> impl Future<Output = Result<Favorite, ApiError>> + Send;

    /// Delete a favorite by ID.
    fn delete_from_favorites(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Fetch every cart line (used for ratings).
    fn get_all_cart(&self) -> impl Future<Output = Result<Vec<CartItem>, ApiError>> + Send;
}
