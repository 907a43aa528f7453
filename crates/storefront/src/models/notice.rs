//! Blocking notices shown to the shopper.
//!
//! A notice is either rendered directly by the handler that produced it or
//! stashed in the session and shown once on the next page.

use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Confirmation or guidance.
    Info,
    /// An operation failed.
    Error,
}

/// A message shown in a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// CSS modifier for the dialog.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Info => "notice--info",
            NoticeLevel::Error => "notice--error",
        }
    }

    /// ARIA role: errors interrupt, confirmations do not.
    #[must_use]
    pub const fn role(&self) -> &'static str {
        match self.level {
            NoticeLevel::Info => "status",
            NoticeLevel::Error => "alert",
        }
    }
}

/// Fixed notice texts.
pub mod messages {
    pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
    pub const INCOMPLETE_CREDENTIALS: &str = "Please enter your email and password.";
    pub const LOGIN_FAILED: &str = "An error occurred during login. Please try again.";
    pub const LOGIN_REQUIRED_FOR_FAVORITES: &str = "Please login to add items to the favorites.";
    pub const FAVORITES_FAILED: &str = "An error occurred while updating your favorites.";
    pub const PRODUCTS_FAILED: &str = "Products could not be loaded. Please try again later.";
    pub const PRODUCT_UNAVAILABLE: &str = "This product is no longer available.";
    pub const SIGNED_OUT: &str = "You have been signed out.";
}
