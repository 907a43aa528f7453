//! Catalog browsing logic: filtering, pagination, ratings and favorites.
//!
//! Everything here is synchronous and free of I/O. Route handlers fetch data
//! through [`crate::api::StoreApi`] and hand it to [`derive_view`].

pub mod favorites;
pub mod filter;
pub mod listing;
pub mod pagination;
pub mod ratings;

pub use favorites::{FavoriteChange, Favorites};
pub use filter::{BRANDS, Category, Filters};
pub use listing::{ListingState, ListingView, NavLink, ProductCard, derive_view};
pub use pagination::{PRODUCTS_PER_PAGE, Pagination};
pub use ratings::{AverageRating, Star, average_ratings};
