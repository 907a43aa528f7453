//! Session helpers for the signed-in user and their favorites.
//!
//! The signed-in user and their confirmed favorites live in the session.
//! Handlers read them through these helpers rather than touching keys.

use tower_sessions::Session;

use crate::catalog::Favorites;
use crate::models::{CurrentUser, session_keys};

/// Read the current user from the session.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Sign a user in.
///
/// The session ID is cycled to prevent fixation, and any favorites left over
/// from a previous user are dropped.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .remove::<Favorites>(session_keys::FAVORITES)
        .await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Sign the user out, forgetting their favorites too.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    session
        .remove::<Favorites>(session_keys::FAVORITES)
        .await?;
    Ok(())
}

/// Favorites last confirmed by the store API, if any were stored.
pub async fn stored_favorites(session: &Session) -> Option<Favorites> {
    session
        .get::<Favorites>(session_keys::FAVORITES)
        .await
        .ok()
        .flatten()
}

/// Store the confirmed favorites for the next request.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store_favorites(
    session: &Session,
    favorites: &Favorites,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FAVORITES, favorites).await
}

/// Drop the stored favorites so the next toggle fetches them afresh.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn forget_favorites(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<Favorites>(session_keys::FAVORITES)
        .await?;
    Ok(())
}
