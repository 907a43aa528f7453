//! A shopper's favorites as held between requests.
//!
//! Changes are planned first ([`Favorites::plan_toggle`]) and applied only
//! once the store API has confirmed them ([`Favorites::apply`]), so the local
//! list never gets ahead of the server.

use std::collections::HashSet;

use boutique_core::{ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::api::{Favorite, Product};

/// The favorites of the signed-in shopper, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<Favorite>);

/// A change to make to the favorites, pending API confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteChange {
    /// Save this record.
    Add(Favorite),
    /// Delete the favorite with this ID.
    Remove(ProductId),
}

impl Favorites {
    #[must_use]
    pub const fn new(favorites: Vec<Favorite>) -> Self {
        Self(favorites)
    }

    /// Whether the product is among the favorites.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.0.iter().any(|f| f.id() == id)
    }

    /// IDs of every favorite, for bulk lookups while rendering.
    #[must_use]
    pub fn ids(&self) -> HashSet<ProductId> {
        self.0.iter().map(Favorite::id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// What toggling `product` would do for `user_id`.
    #[must_use]
    pub fn plan_toggle(&self, product: &Product, user_id: UserId) -> FavoriteChange {
        if self.contains(product.id) {
            FavoriteChange::Remove(product.id)
        } else {
            FavoriteChange::Add(Favorite::new(product.clone(), user_id))
        }
    }

    /// Apply a change the API has confirmed.
    ///
    /// `Add` appends the stored record unless one with the same ID is
    /// already present. `Remove` drops exactly one matching entry.
    pub fn apply(&mut self, change: FavoriteChange) {
        match change {
            FavoriteChange::Add(favorite) => {
                if !self.contains(favorite.id()) {
                    self.0.push(favorite);
                }
            }
            FavoriteChange::Remove(id) => {
                if let Some(index) = self.0.iter().position(|f| f.id() == id) {
                    self.0.remove(index);
                }
            }
        }
    }
}

impl From<Vec<Favorite>> for Favorites {
    fn from(favorites: Vec<Favorite>) -> Self {
        Self(favorites)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::Price;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: String::new(),
            price: Price::new(Decimal::new(2500, 2)).unwrap(),
            brand: "Brand A".to_string(),
            category: "Women".to_string(),
        }
    }

    fn favorites(ids: &[i64]) -> Favorites {
        Favorites::new(
            ids.iter()
                .map(|id| Favorite::new(product(*id), UserId::new(1)))
                .collect(),
        )
    }

    #[test]
    fn test_contains_matches_by_id() {
        let favs = favorites(&[1, 3]);
        assert!(favs.contains(ProductId::new(1)));
        assert!(favs.contains(ProductId::new(3)));
        assert!(!favs.contains(ProductId::new(2)));
    }

    #[test]
    fn test_plan_toggle_removes_existing() {
        let favs = favorites(&[1]);
        assert_eq!(
            favs.plan_toggle(&product(1), UserId::new(1)),
            FavoriteChange::Remove(ProductId::new(1))
        );
    }

    #[test]
    fn test_plan_toggle_adds_missing_with_owner() {
        let favs = favorites(&[1]);
        match favs.plan_toggle(&product(2), UserId::new(8)) {
            FavoriteChange::Add(favorite) => {
                assert_eq!(favorite.id(), ProductId::new(2));
                assert_eq!(favorite.user_id, UserId::new(8));
            }
            FavoriteChange::Remove(_) => panic!("expected an add"),
        }
    }

    #[test]
    fn test_planning_does_not_change_the_list() {
        let favs = favorites(&[1]);
        let _ = favs.plan_toggle(&product(2), UserId::new(1));
        assert_eq!(favs.len(), 1);
    }

    #[test]
    fn test_apply_add_appends_one() {
        let mut favs = favorites(&[1]);
        let change = favs.plan_toggle(&product(2), UserId::new(1));
        favs.apply(change);
        assert_eq!(favs.len(), 2);
        assert!(favs.contains(ProductId::new(2)));
    }

    #[test]
    fn test_apply_remove_drops_exactly_one() {
        let mut favs = favorites(&[1, 2, 1]);
        favs.apply(FavoriteChange::Remove(ProductId::new(1)));
        assert_eq!(favs.len(), 2);
        assert!(favs.contains(ProductId::new(1)));
        assert!(favs.contains(ProductId::new(2)));
    }

    #[test]
    fn test_session_round_trip() {
        let favs = favorites(&[4, 5]);
        let json = serde_json::to_value(&favs).unwrap();
        assert!(json.is_array());
        let back: Favorites = serde_json::from_value(json).unwrap();
        assert_eq!(back, favs);
    }
}
