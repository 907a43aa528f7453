//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing (?category=&brand=&page=)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail
//! POST /favorites/{id}         - Toggle favorite, redirect back
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action (rate limited)
//! POST /logout                 - Logout action
//!
//! # Progressive web app
//! GET  /service-worker.js      - Service worker script
//! GET  /manifest.webmanifest   - Web app manifest
//! GET  /offline                - Offline fallback page
//! ```
//!
//! `/sign-up` is only a link target; nothing is served there.

pub mod auth;
pub mod favorites;
pub mod home;
pub mod products;
pub mod pwa;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
///
/// Only the credential check is rate limited.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth::login_page).merge(post(auth::login).layer(auth_rate_limiter())),
        )
        .route("/logout", post(auth::logout))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/products/{id}", get(products::show))
        .route("/favorites/{id}", post(favorites::toggle))
}

/// Create the progressive web app routes router.
pub fn pwa_routes() -> Router<AppState> {
    Router::new()
        .route("/service-worker.js", get(pwa::service_worker))
        .route("/manifest.webmanifest", get(pwa::webmanifest))
        .route("/offline", get(pwa::offline))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(auth_routes())
        .merge(pwa_routes())
}
