//! Records exchanged with the store API.
//!
//! Field names follow the API's camelCase JSON. Fields the storefront does not
//! read are ignored on input.

use boutique_core::{Price, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shopper account as returned by the login lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    pub price: Price,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
}

/// A product saved to a shopper's favorites.
///
/// The API stores the whole product snapshot plus the owner, so a favorite's
/// `id` is the product's `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(flatten)]
    pub product: Product,
    pub user_id: UserId,
}

impl Favorite {
    /// Build the record sent to the API when a shopper favorites a product.
    #[must_use]
    pub fn new(product: Product, user_id: UserId) -> Self {
        Self { product, user_id }
    }

    /// The favorite's ID, shared with the product it points to.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }
}

/// A cart line carrying a shopper's rating of the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product the line refers to.
    pub id: ProductId,
    /// Rating given to the product, if any.
    #[serde(default)]
    pub rating: Option<Decimal>,
}
