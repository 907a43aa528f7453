//! Fixed-size pagination over the filtered product list.

use std::ops::RangeInclusive;

/// Number of products shown per page.
pub const PRODUCTS_PER_PAGE: usize = 13;

/// Pagination state for one render of the listing.
///
/// Pages are 1-based. The current page is whatever the visitor asked for and
/// is not clamped to the page count: changing filters keeps the page number,
/// so it can point past the last page and render an empty grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    total_pages: usize,
}

impl Pagination {
    /// Paginate `total_items` items, viewing `current_page` (0 is read as 1).
    #[must_use]
    pub const fn new(total_items: usize, current_page: usize) -> Self {
        Self {
            current_page: if current_page == 0 { 1 } else { current_page },
            total_pages: total_items.div_ceil(PRODUCTS_PER_PAGE),
        }
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(total_items / PRODUCTS_PER_PAGE)`; 0 for an empty list.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Number of items to skip before the current page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.current_page - 1).saturating_mul(PRODUCTS_PER_PAGE)
    }

    /// The slice of `items` shown on the current page.
    pub fn page_of<'a, T>(&self, items: &'a [T]) -> impl Iterator<Item = &'a T> {
        items.iter().skip(self.offset()).take(PRODUCTS_PER_PAGE)
    }

    /// Page numbers to render as buttons; empty when there are no pages.
    #[must_use]
    pub const fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// "Previous" is disabled on the first page.
    #[must_use]
    pub const fn is_previous_disabled(&self) -> bool {
        self.current_page == 1
    }

    /// "Next" is disabled on the last page, past it, or when there are no pages.
    #[must_use]
    pub const fn is_next_disabled(&self) -> bool {
        self.total_pages == 0 || self.current_page >= self.total_pages
    }

    /// Target of the "previous" control.
    #[must_use]
    pub const fn previous_page(&self) -> Option<usize> {
        if self.is_previous_disabled() {
            None
        } else {
            Some(self.current_page - 1)
        }
    }

    /// Target of the "next" control.
    #[must_use]
    pub const fn next_page(&self) -> Option<usize> {
        if self.is_next_disabled() {
            None
        } else {
            Some(self.current_page + 1)
        }
    }
}
