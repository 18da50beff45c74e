use serde::Serialize;

use crate::catalog::Catalog;
use crate::data::{Cuisine, CuisineId, Restaurant, RestaurantId};
use crate::error::{Error, Result};
use crate::favorites::Favorites;
use crate::filter::{filter_restaurants, FilterProps};
use crate::review::ReviewDraft;

/// Which screen the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum View {
    Cuisines,
    #[serde(rename_all = "camelCase")]
    Restaurants { cuisine_id: CuisineId },
    #[serde(rename_all = "camelCase")]
    Detail {
        cuisine_id: CuisineId,
        restaurant_id: RestaurantId,
    },
}

/// Everything a presentation shell needs to render a screen.
///
/// Restaurants are only ever read back out of the catalog by id, so the
/// detail screen and the restaurant list can never disagree after a review.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Catalog,
    favorites: Favorites,
    view: View,
    search_term: String,
    favorites_only: bool,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            favorites: Favorites::new(),
            view: View::Cuisines,
            search_term: String::new(),
            favorites_only: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn is_favorite(&self, id: RestaurantId) -> bool {
        self.favorites.contains(id)
    }

    pub fn selected_cuisine(&self) -> Option<&Cuisine> {
        let id = match self.view {
            View::Cuisines => return None,
            View::Restaurants { cuisine_id } | View::Detail { cuisine_id, .. } => cuisine_id,
        };
        self.catalog.cuisine(id).ok()
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        match self.view {
            View::Detail { restaurant_id, .. } => self.catalog.restaurant(restaurant_id).ok(),
            _ => None,
        }
    }

    pub fn select_cuisine(&mut self, id: CuisineId) -> Result<()> {
        self.catalog.cuisine(id)?;
        tracing::debug!(cuisine = id, "cuisine selected");
        self.view = View::Restaurants { cuisine_id: id };
        Ok(())
    }

    /// Open the detail screen of restaurant `id`.
    pub fn select_restaurant(&mut self, id: RestaurantId) -> Result<()> {
        let restaurant = self.catalog.restaurant(id)?;
        tracing::debug!(restaurant = id, "restaurant selected");
        self.view = View::Detail {
            cuisine_id: restaurant.cuisine_id,
            restaurant_id: id,
        };
        Ok(())
    }

    pub fn home(&mut self) {
        self.view = View::Cuisines;
    }

    /// Step one screen up: detail to list, list to cuisines.
    pub fn back(&mut self) {
        self.view = match self.view {
            View::Detail { cuisine_id, .. } => View::Restaurants { cuisine_id },
            View::Restaurants { .. } | View::Cuisines => View::Cuisines,
        };
        tracing::debug!(view = ?self.view, "navigated back");
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn toggle_favorites_only(&mut self) -> bool {
        self.favorites_only = !self.favorites_only;
        self.favorites_only
    }

    /// Flip the favorite mark of `id`, returning whether it is now a favorite.
    pub fn toggle_favorite(&mut self, id: RestaurantId) -> bool {
        self.favorites = std::mem::take(&mut self.favorites).toggled(id);
        let marked = self.favorites.contains(id);
        tracing::debug!(restaurant = id, marked, "favorite toggled");
        marked
    }

    /// Review the restaurant on the detail screen.
    pub fn submit_review(&mut self, draft: &ReviewDraft) -> Result<&Restaurant> {
        let View::Detail { restaurant_id, .. } = self.view else {
            return Err(Error::InvalidReview("no restaurant is selected"));
        };
        self.catalog = self.catalog.submit_review(restaurant_id, draft)?;
        let restaurant = self.catalog.restaurant(restaurant_id)?;
        tracing::info!(
            restaurant = restaurant_id,
            reviews = restaurant.reviews.len(),
            rating = restaurant.rating,
            "review accepted"
        );
        Ok(restaurant)
    }

    /// Restaurants of the selected cuisine that pass search and favorites.
    pub fn displayed_restaurants(&self) -> Vec<&Restaurant> {
        let cuisine_id = match self.view {
            View::Cuisines => return Vec::new(),
            View::Restaurants { cuisine_id } | View::Detail { cuisine_id, .. } => cuisine_id,
        };
        let props = FilterProps {
            cuisine_id: Some(cuisine_id),
            search_term: self.search_term.clone(),
            favorites_only: self.favorites_only,
        };
        filter_restaurants(self.catalog.restaurants(), &props, &self.favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ReviewDraftBuilder;
    use crate::seed;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::new(seed::load().unwrap())
    }

    fn draft(rating: i32, comment: &str) -> ReviewDraft {
        ReviewDraftBuilder::default()
            .rating(rating)
            .comment(comment)
            .build()
            .unwrap()
    }

    fn shown(state: &AppState) -> Vec<&str> {
        state
            .displayed_restaurants()
            .into_iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    #[test]
    fn test_navigation() {
        let mut state = state();
        assert_eq!(state.view(), View::Cuisines);
        assert!(state.displayed_restaurants().is_empty());

        state.select_cuisine(1).unwrap();
        assert_eq!(state.view(), View::Restaurants { cuisine_id: 1 });
        assert_eq!(state.selected_cuisine().unwrap().name, "Italian");

        state.select_restaurant(2).unwrap();
        assert_eq!(state.selected_restaurant().unwrap().name, "Pizza Heaven");

        state.back();
        assert_eq!(state.view(), View::Restaurants { cuisine_id: 1 });
        assert!(state.selected_restaurant().is_none());

        state.back();
        assert_eq!(state.view(), View::Cuisines);
        state.back();
        assert_eq!(state.view(), View::Cuisines);
    }

    #[test]
    fn test_selecting_cuisine_clears_restaurant() {
        let mut state = state();
        state.select_restaurant(1).unwrap();
        state.select_cuisine(2).unwrap();
        assert!(state.selected_restaurant().is_none());
        assert_eq!(shown(&state), vec!["Dragon Wok", "Sichuan Spice"]);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut state = state();
        assert!(matches!(state.select_cuisine(99), Err(Error::NotFound { .. })));
        assert!(matches!(state.select_restaurant(99), Err(Error::NotFound { .. })));
        assert_eq!(state.view(), View::Cuisines);
    }

    #[test]
    fn test_search_and_favorites_compose() {
        let mut state = state();
        state.select_cuisine(1).unwrap();
        assert_eq!(shown(&state), vec!["Pasta Paradise", "Pizza Heaven"]);

        state.set_search_term("PIZZA");
        assert_eq!(shown(&state), vec!["Pizza Heaven"]);

        state.set_search_term("");
        assert!(state.toggle_favorites_only());
        assert!(shown(&state).is_empty());

        assert!(state.toggle_favorite(1));
        assert_eq!(shown(&state), vec!["Pasta Paradise"]);
        assert!(!state.toggle_favorite(1));
        assert!(shown(&state).is_empty());
    }

    #[test]
    fn test_review_reaches_detail_and_list() {
        let mut state = state();
        state.select_cuisine(1).unwrap();
        state.select_restaurant(1).unwrap();

        let rating = state.submit_review(&draft(3, "ok")).unwrap().rating;
        assert_eq!(rating, 4.0);

        let detail = state.selected_restaurant().unwrap();
        assert_eq!(detail.reviews.len(), 3);
        assert_eq!(detail.rating, 4.0);

        state.back();
        let listed = state.displayed_restaurants()[0];
        assert_eq!(listed.reviews.len(), 3);
        assert_eq!(listed.rating, 4.0);
    }

    #[test]
    fn test_rejected_review_leaves_state() {
        let mut state = state();
        state.select_restaurant(1).unwrap();
        let before = state.catalog().clone();

        assert!(matches!(
            state.submit_review(&draft(6, "ok")),
            Err(Error::InvalidReview(_))
        ));
        assert_eq!(state.catalog(), &before);
    }

    #[test]
    fn test_review_needs_selected_restaurant() {
        let mut state = state();
        state.select_cuisine(1).unwrap();
        assert!(state.submit_review(&draft(4, "nice")).is_err());
    }
}
