//! One-shot notices carried across a redirect.

use tower_sessions::Session;

use crate::models::{Notice, session_keys};

/// Queue a notice for the next rendered page, replacing any pending one.
///
/// Failures are logged and otherwise ignored; losing a notice never fails
/// the request.
pub async fn flash(session: &Session, notice: &Notice) {
    if let Err(e) = session.insert(session_keys::NOTICE, notice).await {
        tracing::warn!(error = %e, "Failed to store notice in session");
    }
}

/// Take the pending notice, if any. It is shown once.
pub async fn take_flash(session: &Session) -> Option<Notice> {
    session
        .remove::<Notice>(session_keys::NOTICE)
        .await
        .ok()
        .flatten()
}
