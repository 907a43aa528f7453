//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use boutique_core::UserId;

use crate::api::User;

/// Session-stored user identity.
///
/// Written once by a successful login and read by every page that needs to
/// know who is browsing. This is the only place the signed-in user lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's ID in the store API.
    pub id: UserId,
    /// User's email address, when the API returned one.
    pub email: Option<String>,
    /// User's display name, when the API returned one.
    pub name: Option<String>,
}

impl CurrentUser {
    /// Name shown in the header: the display name, then the email, then the ID.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Session keys for per-visitor state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the signed-in user's favorites as last confirmed by the API.
    pub const FAVORITES: &str = "favorites";

    /// Key for a notice waiting to be shown on the next page.
    pub const NOTICE: &str = "notice";
}
