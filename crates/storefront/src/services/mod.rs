//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Sign-in against the store API
//! - `listing` - Data fetched when the product listing renders
//! - `favorites` - Favorite toggling, applied only after API confirmation
//!
//! Services are generic over [`crate::api::StoreApi`] and know nothing about
//! HTTP requests or sessions; route handlers own that glue.

pub mod auth;
pub mod favorites;
pub mod listing;
