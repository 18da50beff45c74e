use std::collections::HashSet;

use crate::data::{Cuisine, CuisineId, Restaurant, RestaurantId, ReviewId};
use crate::error::{Error, Result};
use crate::rating::compute_rating;
use crate::review::{self, ReviewDraft, ReviewIdSequence};

/// Cuisines and restaurants known to the app.
///
/// A catalog is a value: writes never touch it in place but hand back an
/// updated copy, so anything still holding the old catalog keeps seeing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    cuisines: Vec<Cuisine>,
    restaurants: Vec<Restaurant>,
    review_ids: ReviewIdSequence,
}

impl Catalog {
    /// Validate seed records and build a catalog from them.
    ///
    /// Each restaurant's rating is re-derived from its reviews, the seed value
    /// only survives for restaurants without any review.
    pub fn new(cuisines: Vec<Cuisine>, mut restaurants: Vec<Restaurant>) -> Result<Self> {
        let mut cuisine_ids = HashSet::new();
        for cuisine in &cuisines {
            if !cuisine_ids.insert(cuisine.id) {
                return Err(Error::InvalidSeed(format!(
                    "duplicate cuisine id {}",
                    cuisine.id
                )));
            }
        }

        let mut restaurant_ids = HashSet::new();
        let mut last_review_id: ReviewId = 0;
        for restaurant in &mut restaurants {
            if !restaurant_ids.insert(restaurant.id) {
                return Err(Error::InvalidSeed(format!(
                    "duplicate restaurant id {}",
                    restaurant.id
                )));
            }
            if !cuisine_ids.contains(&restaurant.cuisine_id) {
                return Err(Error::InvalidSeed(format!(
                    "restaurant {} refers to unknown cuisine {}",
                    restaurant.id, restaurant.cuisine_id
                )));
            }
            if !restaurant.rating.is_finite() || !(0.0..=5.0).contains(&restaurant.rating) {
                return Err(Error::InvalidSeed(format!(
                    "restaurant {} has rating {} outside 0..=5",
                    restaurant.id, restaurant.rating
                )));
            }

            let mut review_ids = HashSet::new();
            for review in &restaurant.reviews {
                if !(1..=5).contains(&review.rating) {
                    return Err(Error::InvalidSeed(format!(
                        "review {} of restaurant {} has {} stars",
                        review.id, restaurant.id, review.rating
                    )));
                }
                if !review_ids.insert(review.id) {
                    return Err(Error::InvalidSeed(format!(
                        "duplicate review id {} in restaurant {}",
                        review.id, restaurant.id
                    )));
                }
                last_review_id = last_review_id.max(review.id);
            }

            let derived = compute_rating(&restaurant.reviews, restaurant.rating);
            if derived != restaurant.rating {
                tracing::debug!(
                    restaurant = restaurant.id,
                    seed = restaurant.rating,
                    derived,
                    "seed rating disagrees with reviews, using the mean"
                );
                restaurant.rating = derived;
            }
        }

        let review_ids = ReviewIdSequence::after(last_review_id).ok_or_else(|| {
            Error::InvalidSeed(format!("review id {last_review_id} leaves no room for new reviews"))
        })?;

        Ok(Self {
            cuisines,
            restaurants,
            review_ids,
        })
    }

    pub fn list_cuisines(&self) -> &[Cuisine] {
        &self.cuisines
    }

    /// Every restaurant, or only those of `cuisine_id` when given.
    pub fn list_restaurants(&self, cuisine_id: Option<CuisineId>) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|restaurant| cuisine_id.map_or(true, |id| restaurant.cuisine_id == id))
            .collect()
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn cuisine(&self, id: CuisineId) -> Result<&Cuisine> {
        self.cuisines
            .iter()
            .find(|cuisine| cuisine.id == id)
            .ok_or_else(|| Error::cuisine_not_found(id))
    }

    pub fn restaurant(&self, id: RestaurantId) -> Result<&Restaurant> {
        self.restaurants
            .iter()
            .find(|restaurant| restaurant.id == id)
            .ok_or_else(|| Error::restaurant_not_found(id))
    }

    /// The id the next accepted review will get, `None` once ids ran out.
    pub fn next_review_id(&self) -> Option<ReviewId> {
        self.review_ids.peek()
    }

    /// Add a review to restaurant `id`, returning the updated catalog.
    ///
    /// On error nothing is consumed, the id sequence included.
    pub fn submit_review(&self, id: RestaurantId, draft: &ReviewDraft) -> Result<Self> {
        let index = self
            .restaurants
            .iter()
            .position(|restaurant| restaurant.id == id)
            .ok_or_else(|| Error::restaurant_not_found(id))?;

        let mut review_ids = self.review_ids;
        let review_id = review_ids.peek().ok_or(Error::ReviewIdsExhausted)?;
        let updated = review::submit_review(&self.restaurants[index], draft, review_id)?;
        review_ids.advance();

        let mut restaurants = self.restaurants.clone();
        restaurants[index] = updated;
        Ok(Self {
            cuisines: self.cuisines.clone(),
            restaurants,
            review_ids,
        })
    }
}
