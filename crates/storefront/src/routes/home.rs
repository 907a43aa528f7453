//! Product listing route handler.
//!
//! The listing is the home page. Filters and the page number travel in the
//! query string, so every view is a plain link.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::StoreApi;
use crate::catalog::{Filters, ListingState, ListingView, average_ratings, derive_view};
use crate::filters;
use crate::middleware::{PageContext, forget_favorites, store_favorites};
use crate::models::{CurrentUser, Notice};
use crate::services::listing::load_listing;
use crate::state::AppState;

/// Query parameters of the listing.
///
/// Everything is optional and lenient: unknown categories are ignored and an
/// unparseable page falls back to the first one.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub page: Option<String>,
}

impl ListingQuery {
    /// The listing state this query selects.
    #[must_use]
    pub fn to_state(&self) -> ListingState {
        let filters = Filters::from_query(self.category.as_deref(), self.brand.as_deref());
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1);
        ListingState::new(filters, page)
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub view: ListingView,
    /// Where favorite toggles return to.
    pub return_to: String,
}

/// Fetch everything the listing needs and derive the view.
///
/// Fresh favorites of a signed-in user are written to the session so that
/// toggles work against what was just shown. When that fetch fails the
/// stored copy is dropped, since the page shows no hearts to match it.
#[instrument(skip(api, session, user))]
pub async fn build_listing<A: StoreApi>(
    api: &A,
    session: &Session,
    user: Option<&CurrentUser>,
    state: &ListingState,
) -> (ListingView, Option<Notice>) {
    let data = load_listing(api, user).await;

    match &data.favorites {
        Some(favorites) => {
            if let Err(e) = store_favorites(session, favorites).await {
                tracing::warn!(error = %e, "Failed to store favorites in session");
            }
        }
        None if user.is_some() => {
            if let Err(e) = forget_favorites(session).await {
                tracing::warn!(error = %e, "Failed to drop favorites from session");
            }
        }
        None => {}
    }

    let favorites = data.favorites.unwrap_or_default();
    let ratings = average_ratings(&data.cart);
    let view = derive_view(&data.products, state, &favorites, &ratings);

    (view, data.notice)
}

/// Display the product listing.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let listing_state = query.to_state();
    let (view, notice) = build_listing(
        state.api(),
        &session,
        page.current_user.as_ref(),
        &listing_state,
    )
    .await;

    HomeTemplate {
        page: page.with_notice(notice),
        return_to: view.state.href(),
        view,
    }
}
