//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use boutique_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::StoreApi;
use crate::catalog::{ProductCard, average_ratings};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{PageContext, current_user, store_favorites, stored_favorites};
use crate::services::favorites::resolve_favorites;
use crate::state::AppState;

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page: PageContext,
    pub product: ProductCard,
    pub category: String,
    /// Where the favorite toggle returns to.
    pub return_to: String,
}

/// Look up one product and its rating.
///
/// The rating is best-effort: a failed cart fetch only hides the stars.
/// For a signed-in shopper the favorites are fetched when the session holds
/// no copy yet, so the heart matches what a toggle would act on.
///
/// # Errors
///
/// Returns `NotFound` for an unknown product and `Api` when the catalog
/// cannot be fetched.
#[instrument(skip(api, session))]
pub async fn load_product<A: StoreApi>(
    api: &A,
    session: &Session,
    id: ProductId,
) -> Result<(ProductCard, String)> {
    let product = api
        .get_products()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let rating = match api.get_all_cart().await {
        Ok(cart) => average_ratings(&cart).get(&id).copied(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch cart ratings");
            None
        }
    };

    let is_favorite = match current_user(session).await {
        Some(user) => {
            let cached = stored_favorites(session).await;
            match resolve_favorites(api, user.id, cached).await {
                Ok(favorites) => {
                    store_favorites(session, &favorites).await?;
                    favorites.contains(id)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to fetch favorites");
                    false
                }
            }
        }
        None => false,
    };

    Ok((
        ProductCard::new(&product, is_favorite, rating),
        product.category,
    ))
}

/// Display product detail page.
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let (product, category) = load_product(state.api(), &session, id).await?;

    Ok(ProductShowTemplate {
        page,
        return_to: product.href(),
        product,
        category,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use boutique_core::{Price, UserId};
    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::api::{CartItem, Favorite, Product};
    use crate::middleware::set_current_user;
    use crate::models::CurrentUser;
    use crate::routes::favorites::toggle_in_session;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn tote() -> Product {
        Product {
            id: ProductId::new(6),
            name: "Canvas Tote".to_string(),
            image: "https://cdn.example.com/tote.jpg".to_string(),
            price: Price::new(Decimal::new(1990, 2)).unwrap(),
            brand: "Brand C".to_string(),
            category: "Women".to_string(),
        }
    }

    fn api() -> FakeApi {
        FakeApi {
            products: vec![tote()],
            cart: vec![CartItem {
                id: ProductId::new(6),
                rating: Some(Decimal::from(3)),
            }],
            ..FakeApi::default()
        }
    }

    #[tokio::test]
    async fn test_known_product() {
        let (card, category) = load_product(&api(), &session(), ProductId::new(6))
            .await
            .unwrap();

        assert_eq!(card.name, "Canvas Tote");
        assert_eq!(card.price, "$19.90");
        assert_eq!(card.rating.unwrap().to_string(), "3.00");
        assert!(!card.is_favorite);
        assert_eq!(category, "Women");
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let err = load_product(&api(), &session(), ProductId::new(7))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_an_api_error() {
        let err = load_product(&FakeApi::failing(), &session(), ProductId::new(6))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api(_)));
    }

    #[tokio::test]
    async fn test_signed_in_without_stored_favorites_fetches_them() {
        let api = FakeApi {
            favorites: Mutex::new(vec![Favorite::new(tote(), UserId::new(4))]),
            ..api()
        };
        let session = session();
        let user = CurrentUser {
            id: UserId::new(4),
            email: None,
            name: None,
        };
        set_current_user(&session, &user).await.unwrap();

        let (card, _) = load_product(&api, &session, ProductId::new(6))
            .await
            .unwrap();

        assert!(card.is_favorite);
        assert!(
            stored_favorites(&session)
                .await
                .unwrap()
                .contains(ProductId::new(6))
        );
        assert_eq!(
            api.calls(),
            vec![Call::Products, Call::Cart, Call::Favorites(UserId::new(4))]
        );

        // The heart was filled, so toggling it removes the favorite
        let notice = toggle_in_session(&api, &session, ProductId::new(6))
            .await
            .unwrap();
        assert_eq!(
            notice.message,
            "Canvas Tote has been removed from your favorites."
        );
        assert!(stored_favorites(&session).await.unwrap().is_empty());
    }
}
