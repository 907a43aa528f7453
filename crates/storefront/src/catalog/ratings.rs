//! Average star ratings derived from cart lines.

use std::collections::HashMap;
use std::fmt;

use boutique_core::ProductId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::api::CartItem;

/// Stars drawn by the rating widget.
pub const STAR_COUNT: usize = 5;

/// A per-product average rating, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AverageRating(Decimal);

/// How a single star of the widget is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Full,
    Half,
    Empty,
}

impl Star {
    /// CSS modifier for the star.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Full => "star--full",
            Self::Half => "star--half",
            Self::Empty => "star--empty",
        }
    }
}

impl AverageRating {
    /// `total / count`, rounded half away from zero to two places.
    ///
    /// Returns `None` when `count` is zero.
    #[must_use]
    pub fn from_totals(total: Decimal, count: u32) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let average = (total / Decimal::from(count))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Some(Self(average))
    }

    /// The five stars of the widget for this rating.
    ///
    /// Whole points are full stars; a remainder of at least one half adds a
    /// half star.
    #[must_use]
    pub fn stars(&self) -> Vec<Star> {
        let whole = self.0.trunc();
        let has_half = self.0 - whole >= Decimal::new(5, 1);
        let full = whole.to_usize().unwrap_or(0).min(STAR_COUNT);

        (0..STAR_COUNT)
            .map(|i| {
                if i < full {
                    Star::Full
                } else if i == full && has_half {
                    Star::Half
                } else {
                    Star::Empty
                }
            })
            .collect()
    }
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Running sum for one product.
#[derive(Default)]
struct Tally {
    total: Decimal,
    count: u32,
}

/// Group cart lines by product and average their ratings.
///
/// Lines without a rating are skipped. Products with no rated lines are
/// absent from the result.
#[must_use]
pub fn average_ratings(cart: &[CartItem]) -> HashMap<ProductId, AverageRating> {
    let mut tallies: HashMap<ProductId, Tally> = HashMap::new();
    for item in cart {
        if let Some(rating) = item.rating {
            let tally = tallies.entry(item.id).or_default();
            tally.total += rating;
            tally.count += 1;
        }
    }

    tallies
        .into_iter()
        .filter_map(|(id, tally)| {
            AverageRating::from_totals(tally.total, tally.count).map(|avg| (id, avg))
        })
        .collect()
}
