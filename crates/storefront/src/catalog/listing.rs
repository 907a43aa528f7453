//! The product listing as a pure function of its inputs.
//!
//! [`derive_view`] turns the fetched catalog plus the visitor's selection into
//! everything the listing template draws. It does no I/O, so fetch timing
//! has no influence on what is shown.

use std::collections::HashMap;
use std::fmt::Write as _;

use boutique_core::ProductId;

use super::favorites::Favorites;
use super::filter::{BRANDS, Category, Filters};
use super::pagination::Pagination;
use super::ratings::{AverageRating, Star};
use crate::api::Product;

/// Path of the listing page.
pub const LISTING_PATH: &str = "/";

/// Where the visitor is in the listing: filters plus page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    pub filters: Filters,
    pub page: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            page: 1,
        }
    }
}

impl ListingState {
    #[must_use]
    pub fn new(filters: Filters, page: usize) -> Self {
        Self {
            filters,
            page: page.max(1),
        }
    }

    /// Same page, different filters. The page is deliberately kept.
    #[must_use]
    pub fn with_filters(&self, filters: Filters) -> Self {
        Self {
            filters,
            page: self.page,
        }
    }

    /// Same filters, different page.
    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        Self::new(self.filters.clone(), page)
    }

    /// URL of the listing in this state.
    #[must_use]
    pub fn href(&self) -> String {
        let mut params = Vec::new();
        if let Some(category) = self.filters.category {
            params.push(format!("category={}", urlencoding::encode(category.as_str())));
        }
        if let Some(brand) = &self.filters.brand {
            params.push(format!("brand={}", urlencoding::encode(brand)));
        }
        if self.page > 1 {
            params.push(format!("page={}", self.page));
        }

        let mut href = LISTING_PATH.to_string();
        if !params.is_empty() {
            let _ = write!(href, "?{}", params.join("&"));
        }
        href
    }
}

/// One tile in the product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: String,
    pub brand: String,
    pub is_favorite: bool,
    pub rating: Option<AverageRating>,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: &Product, is_favorite: bool, rating: Option<AverageRating>) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
            brand: product.brand.clone(),
            is_favorite,
            rating,
        }
    }

    /// Product detail URL.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/products/{}", self.id)
    }

    /// Favorite toggle form target.
    #[must_use]
    pub fn favorite_action(&self) -> String {
        format!("/favorites/{}", self.id)
    }

    /// Rating stars, empty when the product has no rating.
    #[must_use]
    pub fn stars(&self) -> Vec<Star> {
        self.rating.map(|r| r.stars()).unwrap_or_default()
    }
}

/// A link in the category bar, brand submenu or pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Everything the listing template renders.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub state: ListingState,
    pub products: Vec<ProductCard>,
    pub pagination: Pagination,
    /// Products passing the filters, across all pages.
    pub match_count: usize,
}

impl ListingView {
    /// Top-level category links. Picking one clears the brand.
    #[must_use]
    pub fn category_links(&self) -> Vec<NavLink> {
        Category::ALL
            .into_iter()
            .map(|category| NavLink {
                label: category.as_str().to_string(),
                href: self
                    .state
                    .with_filters(Filters::select_category(category))
                    .href(),
                active: self.state.filters.is_category_selected(category),
            })
            .collect()
    }

    /// Brand submenu links.
    #[must_use]
    pub fn brand_links(&self) -> Vec<NavLink> {
        BRANDS
            .into_iter()
            .map(|brand| NavLink {
                label: brand.to_string(),
                href: self.state.with_filters(Filters::select_brand(brand)).href(),
                active: self.state.filters.is_brand_selected(brand),
            })
            .collect()
    }

    /// One link per page; empty when nothing matches.
    #[must_use]
    pub fn page_links(&self) -> Vec<NavLink> {
        self.pagination
            .page_numbers()
            .map(|page| NavLink {
                label: page.to_string(),
                href: self.state.with_page(page).href(),
                active: page == self.pagination.current_page(),
            })
            .collect()
    }

    /// Target of the "previous" arrow, `None` when disabled.
    #[must_use]
    pub fn previous_href(&self) -> Option<String> {
        self.pagination
            .previous_page()
            .map(|page| self.state.with_page(page).href())
    }

    /// Target of the "next" arrow, `None` when disabled.
    #[must_use]
    pub fn next_href(&self) -> Option<String> {
        self.pagination
            .next_page()
            .map(|page| self.state.with_page(page).href())
    }
}

/// Derive the visible listing from the catalog and the visitor's selection.
#[must_use]
pub fn derive_view(
    products: &[Product],
    state: &ListingState,
    favorites: &Favorites,
    ratings: &HashMap<ProductId, AverageRating>,
) -> ListingView {
    let filtered = state.filters.apply(products);
    let pagination = Pagination::new(filtered.len(), state.page);
    let favorite_ids = favorites.ids();

    let cards = pagination
        .page_of(&filtered)
        .map(|product| {
            ProductCard::new(
                product,
                favorite_ids.contains(&product.id),
                ratings.get(&product.id).copied(),
            )
        })
        .collect();

    ListingView {
        state: state.clone(),
        products: cards,
        pagination,
        match_count: filtered.len(),
    }
}
