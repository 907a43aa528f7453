//! Favorite toggling.
//!
//! A toggle is planned against the locally held favorites, sent to the store
//! API, and applied locally only if the API accepted it. A failed call leaves
//! the local list exactly as it was.

use boutique_core::{ProductId, UserId};
use tracing::instrument;

use crate::api::{ApiError, StoreApi};
use crate::catalog::{FavoriteChange, Favorites};
use crate::models::notice::messages;
use crate::models::{CurrentUser, Notice};

/// What happened when a shopper toggled a favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Nobody is signed in; nothing was sent.
    LoginRequired,
    /// The product was saved.
    Added { name: String },
    /// The product was removed.
    Removed { name: String },
    /// The product is not in the catalog.
    UnknownProduct,
    /// The API call failed; local state is unchanged.
    Failed,
}

impl ToggleOutcome {
    /// Notice shown to the shopper afterwards.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::LoginRequired => Notice::info(messages::LOGIN_REQUIRED_FOR_FAVORITES),
            Self::Added { name } => Notice::info(format!("{name} has been added to your favorites.")),
            Self::Removed { name } => {
                Notice::info(format!("{name} has been removed from your favorites."))
            }
            Self::UnknownProduct => Notice::error(messages::PRODUCT_UNAVAILABLE),
            Self::Failed => Notice::error(messages::FAVORITES_FAILED),
        }
    }
}

/// The favorites to toggle against: the session copy if there is one,
/// otherwise a fresh fetch.
///
/// # Errors
///
/// Returns the API error when a fetch is needed and fails.
pub async fn resolve_favorites<A: StoreApi>(
    api: &A,
    user_id: UserId,
    cached: Option<Favorites>,
) -> Result<Favorites, ApiError> {
    match cached {
        Some(favorites) => Ok(favorites),
        None => api.get_favorites(user_id).await.map(Favorites::from),
    }
}

/// Toggle `product_id` in `favorites` for the signed-in `user`.
///
/// `favorites` is modified only when the API confirms the change.
#[instrument(skip(api, user, favorites), fields(user_id = user.map(|u| u.id.as_i64())))]
pub async fn toggle_favorite<A: StoreApi>(
    api: &A,
    user: Option<&CurrentUser>,
    favorites: &mut Favorites,
    product_id: ProductId,
) -> ToggleOutcome {
    let Some(user) = user else {
        return ToggleOutcome::LoginRequired;
    };

    let products = match api.get_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "Error toggling favorite item: product lookup failed");
            return ToggleOutcome::Failed;
        }
    };

    let Some(product) = products.into_iter().find(|p| p.id == product_id) else {
        tracing::warn!("Favorite toggled for a product missing from the catalog");
        return ToggleOutcome::UnknownProduct;
    };

    match favorites.plan_toggle(&product, user.id) {
        FavoriteChange::Add(favorite) => match api.add_to_favorites(&favorite).await {
            Ok(stored) => {
                favorites.apply(FavoriteChange::Add(stored));
                ToggleOutcome::Added { name: product.name }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error toggling favorite item: add failed");
                ToggleOutcome::Failed
            }
        },
        FavoriteChange::Remove(id) => match api.delete_from_favorites(id).await {
            Ok(()) => {
                favorites.apply(FavoriteChange::Remove(id));
                ToggleOutcome::Removed { name: product.name }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error toggling favorite item: delete failed");
                ToggleOutcome::Failed
            }
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use boutique_core::Price;
    use rust_decimal::Decimal;

    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::api::{Favorite, Product};

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            image: String::new(),
            price: Price::new(Decimal::new(30, 0)).unwrap(),
            brand: "Brand B".to_string(),
            category: "Men".to_string(),
        }
    }

    fn shopper() -> CurrentUser {
        CurrentUser {
            id: UserId::new(7),
            email: None,
            name: None,
        }
    }

    fn api_with(favorites: Vec<Favorite>) -> FakeApi {
        FakeApi {
            products: vec![product(1, "Wool Coat"), product(2, "Silk Tie")],
            favorites: Mutex::new(favorites),
            ..FakeApi::default()
        }
    }

    #[tokio::test]
    async fn test_signed_out_makes_no_calls() {
        let api = api_with(vec![]);
        let mut favorites = Favorites::default();

        let outcome = toggle_favorite(&api, None, &mut favorites, ProductId::new(1)).await;

        assert_eq!(outcome, ToggleOutcome::LoginRequired);
        assert_eq!(
            outcome.notice().message,
            "Please login to add items to the favorites."
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_adds_missing_favorite() {
        let api = api_with(vec![]);
        let mut favorites = Favorites::default();

        let outcome =
            toggle_favorite(&api, Some(&shopper()), &mut favorites, ProductId::new(2)).await;

        assert_eq!(
            outcome.notice().message,
            "Silk Tie has been added to your favorites."
        );
        assert_eq!(favorites.len(), 1);
        assert!(favorites.contains(ProductId::new(2)));
        assert_eq!(
            api.calls(),
            vec![Call::Products, Call::AddFavorite(ProductId::new(2))]
        );
    }

    #[tokio::test]
    async fn test_removes_existing_favorite() {
        let existing = Favorite::new(product(1, "Wool Coat"), UserId::new(7));
        let api = api_with(vec![existing.clone()]);
        let mut favorites = Favorites::new(vec![existing]);

        let outcome =
            toggle_favorite(&api, Some(&shopper()), &mut favorites, ProductId::new(1)).await;

        assert_eq!(
            outcome,
            ToggleOutcome::Removed {
                name: "Wool Coat".to_string()
            }
        );
        assert!(favorites.is_empty());
        assert_eq!(
            api.calls(),
            vec![Call::Products, Call::DeleteFavorite(ProductId::new(1))]
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_favorites_untouched() {
        let api = FakeApi {
            products: vec![product(1, "Wool Coat")],
            ..FakeApi::failing()
        };
        let mut favorites = Favorites::default();

        let outcome =
            toggle_favorite(&api, Some(&shopper()), &mut favorites, ProductId::new(1)).await;

        assert_eq!(outcome, ToggleOutcome::Failed);
        assert_eq!(
            outcome.notice().message,
            "An error occurred while updating your favorites."
        );
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let api = api_with(vec![]);
        let mut favorites = Favorites::default();

        let outcome =
            toggle_favorite(&api, Some(&shopper()), &mut favorites, ProductId::new(99)).await;

        assert_eq!(outcome, ToggleOutcome::UnknownProduct);
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_prefers_session_copy() {
        let api = api_with(vec![]);
        let cached = Favorites::new(vec![Favorite::new(product(1, "Wool Coat"), UserId::new(7))]);

        let resolved = resolve_favorites(&api, UserId::new(7), Some(cached.clone()))
            .await
            .unwrap();

        assert_eq!(resolved, cached);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_fetches_when_missing() {
        let api = api_with(vec![Favorite::new(product(2, "Silk Tie"), UserId::new(7))]);

        let resolved = resolve_favorites(&api, UserId::new(7), None).await.unwrap();

        assert!(resolved.contains(ProductId::new(2)));
        assert_eq!(api.calls(), vec![Call::Favorites(UserId::new(7))]);
    }
}
