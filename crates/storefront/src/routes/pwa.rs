//! Progressive web app routes: the service worker, the web app manifest and
//! the offline fallback page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{HeaderName, header},
    response::{IntoResponse, Response},
};

use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// The service worker script, compiled into the binary.
///
/// Served from the site root rather than `/static` so its scope covers every
/// page.
const SERVICE_WORKER_JS: &str = include_str!("../../static/service-worker.js");

/// Serve the service worker script.
///
/// Browsers check for worker updates on navigation; `no-cache` makes them
/// revalidate instead of trusting a stale copy.
pub async fn service_worker() -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
            (HeaderName::from_static("service-worker-allowed"), "/"),
        ],
        SERVICE_WORKER_JS,
    )
        .into_response()
}

/// The web app manifest as JSON.
#[must_use]
pub fn manifest() -> serde_json::Value {
    serde_json::json!({
        "name": "Boutique",
        "short_name": "Boutique",
        "start_url": "/",
        "scope": "/",
        "icons": [
            {
                "src": "/static/images/icon.svg",
                "sizes": "any",
                "type": "image/svg+xml",
                "purpose": "any maskable"
            }
        ],
        "theme_color": "#1f2933",
        "background_color": "#ffffff",
        "display": "standalone"
    })
}

/// Serve the web app manifest.
pub async fn webmanifest() -> Response {
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        manifest().to_string(),
    )
        .into_response()
}

/// Offline fallback page template.
#[derive(Template, WebTemplate)]
#[template(path = "offline.html")]
pub struct OfflineTemplate {
    pub page: PageContext,
}

impl OfflineTemplate {
    /// The page as a signed-out visitor sees it.
    ///
    /// The worker keeps this one copy for every shopper, so it never reads
    /// the session.
    #[must_use]
    pub fn anonymous(service_worker_url: String) -> Self {
        Self {
            page: PageContext {
                service_worker_url,
                ..PageContext::default()
            },
        }
    }
}

/// Serve the offline fallback page.
pub async fn offline(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        OfflineTemplate::anonymous(state.config().service_worker_url()),
    )
}
