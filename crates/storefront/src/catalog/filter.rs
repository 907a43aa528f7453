//! Category and brand filters for the product listing.

use std::fmt;
use std::str::FromStr;

use crate::api::Product;

/// Brands offered in the brand submenu.
pub const BRANDS: [&str; 3] = ["Brand A", "Brand B", "Brand C"];

/// Top-level entries of the category bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Women,
    Men,
    /// Opens the brand submenu; filters by brand once one is picked.
    Brand,
}

impl Category {
    /// Categories in display order.
    pub const ALL: [Self; 3] = [Self::Women, Self::Men, Self::Brand];

    /// Label used in the UI, in URLs and by the API's `category` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Women => "Women",
            Self::Men => "Men",
            Self::Brand => "Brand",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a category label that is not in the category bar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// The active category/brand selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub category: Option<Category>,
    pub brand: Option<String>,
}

impl Filters {
    /// Build a selection from raw query values.
    ///
    /// Unknown categories are dropped. A brand only counts under
    /// [`Category::Brand`]; elsewhere it is cleared, the same as picking a
    /// top-level category does.
    #[must_use]
    pub fn from_query(category: Option<&str>, brand: Option<&str>) -> Self {
        let category = category.and_then(|c| c.parse().ok());
        let brand = brand
            .map(str::trim)
            .filter(|b| !b.is_empty() && category == Some(Category::Brand))
            .map(str::to_string);
        Self { category, brand }
    }

    /// Selection after clicking a top-level category. Clears the brand.
    #[must_use]
    pub const fn select_category(category: Category) -> Self {
        Self {
            category: Some(category),
            brand: None,
        }
    }

    /// Selection after clicking a brand in the submenu.
    #[must_use]
    pub fn select_brand(brand: &str) -> Self {
        Self {
            category: Some(Category::Brand),
            brand: Some(brand.to_string()),
        }
    }

    /// Whether a product passes the selection.
    ///
    /// A brand filter overrides category filtering. `Brand` without a brand
    /// compares against the product's category like any other entry.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match (self.category, self.brand.as_deref()) {
            (None, _) => true,
            (Some(Category::Brand), Some(brand)) => product.brand == brand,
            (Some(category), _) => product.category == category.as_str(),
        }
    }

    /// Products passing the selection, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    /// Whether the brand submenu entry is the current selection.
    #[must_use]
    pub fn is_brand_selected(&self, brand: &str) -> bool {
        self.category == Some(Category::Brand) && self.brand.as_deref() == Some(brand)
    }

    /// Whether a top-level category is the current selection.
    #[must_use]
    pub fn is_category_selected(&self, category: Category) -> bool {
        self.category == Some(category)
    }
}
