//! Domain models for storefront.
//!
//! Types kept in the visitor's session between requests.

pub mod notice;
pub mod session;

pub use notice::{Notice, NoticeLevel};
pub use session::{CurrentUser, keys as session_keys};
