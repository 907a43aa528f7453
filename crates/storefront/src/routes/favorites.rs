//! Favorite toggle route handler.
//!
//! The heart on each product card posts here. The outcome is flashed as a
//! notice and the shopper is sent back to the listing URL they came from.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use boutique_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::StoreApi;
use crate::catalog::listing::LISTING_PATH;
use crate::error::{AppError, add_breadcrumb};
use crate::middleware::{current_user, flash, store_favorites, stored_favorites};
use crate::models::Notice;
use crate::services::favorites::{ToggleOutcome, resolve_favorites, toggle_favorite};
use crate::state::AppState;

/// Toggle form data.
#[derive(Debug, Default, Deserialize)]
pub struct ToggleForm {
    /// Listing URL to return to, including its query string.
    pub return_to: Option<String>,
}

/// Keep `return_to` only if it is a path on this site.
///
/// Anything else (absolute URLs, protocol-relative `//host` paths, backslash
/// tricks) falls back to the listing.
#[must_use]
pub fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => LISTING_PATH,
    }
}

/// Toggle `product_id` for whoever is signed in on `session`.
///
/// Confirmed changes are written back to the session; a failed API call
/// leaves the stored favorites untouched.
///
/// Each request works on the session copy it loaded. Two toggles in flight
/// on one session both start from that copy and the later save wins, so one
/// confirmed change can be missing locally until the next listing render
/// replaces the copy with the API's list.
///
/// # Errors
///
/// Returns an error if the session cannot be updated.
pub async fn toggle_in_session<A: StoreApi>(
    api: &A,
    session: &Session,
    product_id: ProductId,
) -> Result<Notice, AppError> {
    let Some(user) = current_user(session).await else {
        return Ok(ToggleOutcome::LoginRequired.notice());
    };

    let cached = stored_favorites(session).await;
    let mut favorites = match resolve_favorites(api, user.id, cached).await {
        Ok(favorites) => favorites,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user.id, "Error toggling favorite item: favorites lookup failed");
            return Ok(ToggleOutcome::Failed.notice());
        }
    };

    let outcome = toggle_favorite(api, Some(&user), &mut favorites, product_id).await;
    if matches!(
        outcome,
        ToggleOutcome::Added { .. } | ToggleOutcome::Removed { .. }
    ) {
        store_favorites(session, &favorites).await?;
        let id = product_id.to_string();
        add_breadcrumb(
            "favorites",
            "Toggled favorite",
            Some(&[("product_id", id.as_str())]),
        );
    }

    Ok(outcome.notice())
}

/// Handle a favorite toggle.
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    let notice = toggle_in_session(state.api(), &session, product_id).await?;
    flash(&session, &notice).await;
    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())))
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
    use crate::api::{Favorite, Product};
    use crate::catalog::Favorites;
    use crate::middleware::set_current_user;
    use crate::models::CurrentUser;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            image: String::new(),
            price: Price::new(Decimal::new(4200, 2)).unwrap(),
            brand: "Brand A".to_string(),
            category: "Women".to_string(),
        }
    }

    async fn signed_in_session() -> Session {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let user = CurrentUser {
            id: UserId::new(2),
            email: None,
            name: None,
        };
        set_current_user(&session, &user).await.unwrap();
        session
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/?category=Men&page=2")), "/?category=Men&page=2");
        assert_eq!(safe_return_path(Some("/products/4")), "/products/4");
        assert_eq!(safe_return_path(None), "/");
        assert_eq!(safe_return_path(Some("")), "/");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/");
        assert_eq!(safe_return_path(Some("//evil.example")), "/");
        assert_eq!(safe_return_path(Some("/\\evil.example")), "/");
        assert_eq!(safe_return_path(Some("/\r\nSet-Cookie: x")), "/");
    }

    #[tokio::test]
    async fn test_signed_out_toggle_asks_to_login() {
        let api = FakeApi::default();
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        let notice = toggle_in_session(&api, &session, ProductId::new(1))
            .await
            .unwrap();

        assert_eq!(notice.message, "Please login to add items to the favorites.");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_twice_round_trips_through_the_session() {
        let api = FakeApi {
            products: vec![product(1, "Linen Dress")],
            ..FakeApi::default()
        };
        let session = signed_in_session().await;

        let added = toggle_in_session(&api, &session, ProductId::new(1))
            .await
            .unwrap();
        assert_eq!(added.message, "Linen Dress has been added to your favorites.");
        assert!(
            stored_favorites(&session)
                .await
                .unwrap()
                .contains(ProductId::new(1))
        );

        let removed = toggle_in_session(&api, &session, ProductId::new(1))
            .await
            .unwrap();
        assert_eq!(
            removed.message,
            "Linen Dress has been removed from your favorites."
        );
        assert!(stored_favorites(&session).await.unwrap().is_empty());

        // The first toggle fetched favorites; the second used the session copy
        assert_eq!(
            api.calls(),
            vec![
                Call::Favorites(UserId::new(2)),
                Call::Products,
                Call::AddFavorite(ProductId::new(1)),
                Call::Products,
                Call::DeleteFavorite(ProductId::new(1)),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_toggle_keeps_stored_favorites() {
        let existing = Favorite::new(product(1, "Linen Dress"), UserId::new(2));
        let api = FakeApi {
            products: vec![product(1, "Linen Dress")],
            favorites: Mutex::new(vec![existing.clone()]),
            ..FakeApi::failing()
        };
        let session = signed_in_session().await;
        store_favorites(&session, &Favorites::new(vec![existing]))
            .await
            .unwrap();

        let notice = toggle_in_session(&api, &session, ProductId::new(1))
            .await
            .unwrap();

        assert_eq!(
            notice.message,
            "An error occurred while updating your favorites."
        );
        assert_eq!(stored_favorites(&session).await.unwrap().len(), 1);
    }
}
