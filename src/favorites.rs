use std::collections::BTreeSet;

use serde::Serialize;

use crate::data::RestaurantId;

/// Ids of the restaurants marked as favorite.
///
/// The registry only refers to restaurants by id and never checks that the
/// id exists in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favorites(BTreeSet<RestaurantId>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: RestaurantId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = RestaurantId> + '_ {
        self.0.iter().copied()
    }

    // consumed the set
    pub fn toggled(mut self, id: RestaurantId) -> Self {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
        self
    }
}

impl FromIterator<RestaurantId> for Favorites {
    fn from_iter<I: IntoIterator<Item = RestaurantId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Return a new set with `id` removed if present, added otherwise.
pub fn toggle_favorite(favorites: &Favorites, id: RestaurantId) -> Favorites {
    favorites.clone().toggled(id)
}
