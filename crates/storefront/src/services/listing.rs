//! Data fetched each time the product listing renders.

use tracing::instrument;

use crate::api::{CartItem, Product, StoreApi};
use crate::catalog::Favorites;
use crate::models::notice::messages;
use crate::models::{CurrentUser, Notice};

/// Inputs for [`crate::catalog::derive_view`], as fetched from the API.
#[derive(Debug, Default)]
pub struct ListingData {
    pub products: Vec<Product>,
    /// Fresh favorites of the signed-in user. `None` when signed out or when
    /// the fetch failed.
    pub favorites: Option<Favorites>,
    pub cart: Vec<CartItem>,
    /// Set when the catalog could not be loaded.
    pub notice: Option<Notice>,
}

/// Fetch the catalog, the user's favorites (when signed in) and the cart.
///
/// The calls are made one after another. A failed catalog fetch yields an
/// empty listing and an error notice; failed favorites or cart fetches only
/// degrade the page (no hearts, no stars).
#[instrument(skip(api, user), fields(signed_in = user.is_some()))]
pub async fn load_listing<A: StoreApi>(api: &A, user: Option<&CurrentUser>) -> ListingData {
    let mut data = ListingData::default();

    match api.get_products().await {
        Ok(products) => data.products = products,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch products");
            data.notice = Some(Notice::error(messages::PRODUCTS_FAILED));
        }
    }

    if let Some(user) = user {
        match api.get_favorites(user.id).await {
            Ok(favorites) => data.favorites = Some(Favorites::from(favorites)),
            Err(e) => tracing::warn!(error = %e, user_id = %user.id, "Failed to fetch favorites"),
        }
    }

    match api.get_all_cart().await {
        Ok(cart) => data.cart = cart,
        Err(e) => tracing::warn!(error = %e, "Failed to fetch cart ratings"),
    }

    data
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use boutique_core::{Price, ProductId, UserId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::api::Favorite;
    use crate::api::fake::{Call, FakeApi};

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: String::new(),
            price: Price::new(Decimal::new(5, 0)).unwrap(),
            brand: "Brand C".to_string(),
            category: "Women".to_string(),
        }
    }

    fn shopper() -> CurrentUser {
        CurrentUser {
            id: UserId::new(3),
            email: None,
            name: None,
        }
    }

    #[tokio::test]
    async fn test_signed_out_skips_favorites() {
        let api = FakeApi {
            products: vec![product(1)],
            ..FakeApi::default()
        };

        let data = load_listing(&api, None).await;

        assert_eq!(data.products.len(), 1);
        assert!(data.favorites.is_none());
        assert!(data.notice.is_none());
        assert_eq!(api.calls(), vec![Call::Products, Call::Cart]);
    }

    #[tokio::test]
    async fn test_signed_in_fetches_favorites() {
        let api = FakeApi {
            products: vec![product(1), product(2)],
            favorites: Mutex::new(vec![
                Favorite::new(product(2), UserId::new(3)),
                Favorite::new(product(1), UserId::new(99)),
            ]),
            cart: vec![CartItem {
                id: ProductId::new(1),
                rating: Some(Decimal::from(4)),
            }],
            ..FakeApi::default()
        };

        let data = load_listing(&api, Some(&shopper())).await;

        let favorites = data.favorites.unwrap();
        assert_eq!(favorites.len(), 1);
        assert!(favorites.contains(ProductId::new(2)));
        assert_eq!(data.cart.len(), 1);
        assert_eq!(
            api.calls(),
            vec![Call::Products, Call::Favorites(UserId::new(3)), Call::Cart]
        );
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty_listing_with_notice() {
        let api = FakeApi::failing();

        let data = load_listing(&api, Some(&shopper())).await;

        assert!(data.products.is_empty());
        assert!(data.favorites.is_none());
        assert!(data.cart.is_empty());
        assert_eq!(
            data.notice.unwrap().message,
            "Products could not be loaded. Please try again later."
        );
    }
}
