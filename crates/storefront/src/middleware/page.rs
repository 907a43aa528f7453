//! Per-request data shared by every full page: who is signed in, the pending
//! notice, and where the service worker lives.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use super::auth::current_user;
use super::flash::take_flash;
use crate::models::{CurrentUser, Notice};
use crate::state::AppState;

/// Layout context for `base.html`.
///
/// Extracting it consumes the pending notice, so only handlers that render a
/// page should extract it.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub current_user: Option<CurrentUser>,
    pub notice: Option<Notice>,
    pub service_worker_url: String,
}

impl PageContext {
    /// Build the context from an already extracted session.
    pub async fn load(session: &Session, service_worker_url: String) -> Self {
        Self {
            current_user: current_user(session).await,
            notice: take_flash(session).await,
            service_worker_url,
        }
    }

    /// Show `notice` instead of any flashed one.
    #[must_use]
    pub fn with_notice(mut self, notice: Option<Notice>) -> Self {
        if notice.is_some() {
            self.notice = notice;
        }
        self
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let service_worker_url = state.config().service_worker_url();

        Ok(match parts.extensions.get::<Session>() {
            Some(session) => Self::load(session, service_worker_url).await,
            None => Self {
                service_worker_url,
                ..Self::default()
            },
        })
    }
}
