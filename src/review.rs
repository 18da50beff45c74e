use derive_builder::Builder;

use crate::data::{Restaurant, Review, ReviewId};
use crate::error::{Error, Result};
use crate::rating::compute_rating;

pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 5;

/// A review as typed in by the user, before it gets an id.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: i32,
    #[builder(setter(into))]
    pub comment: String,
}

impl ReviewDraft {
    /// Check the draft and return the star count it stands for.
    pub fn validate(&self) -> Result<u8> {
        if !(MIN_STARS..=MAX_STARS).contains(&self.rating) {
            return Err(Error::InvalidReview("rating must be between 1 and 5"));
        }
        if self.comment.trim().is_empty() {
            return Err(Error::InvalidReview("comment must not be empty"));
        }
        u8::try_from(self.rating).map_err(|_| Error::InvalidReview("rating out of range"))
    }
}

/// Append `draft` to the reviews of `restaurant` under `id` and recompute the
/// rating. The input restaurant is left as it was.
pub fn submit_review(
    restaurant: &Restaurant,
    draft: &ReviewDraft,
    id: ReviewId,
) -> Result<Restaurant> {
    let stars = draft.validate()?;

    let mut updated = restaurant.clone();
    updated.reviews.push(Review {
        id,
        rating: stars,
        comment: draft.comment.trim().to_string(),
    });
    updated.rating = compute_rating(&updated.reviews, restaurant.rating);

    tracing::debug!(
        restaurant = updated.id,
        review = id,
        rating = updated.rating,
        "review appended"
    );
    Ok(updated)
}

/// Monotonic source of review ids. Once `ReviewId::MAX` is handed out the
/// sequence is exhausted and never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewIdSequence {
    next: Option<ReviewId>,
}

impl ReviewIdSequence {
    /// A sequence whose first id is greater than `last_used`, `None` if no
    /// such id exists.
    pub fn after(last_used: ReviewId) -> Option<Self> {
        last_used.checked_add(1).map(|next| Self { next: Some(next) })
    }

    pub fn peek(&self) -> Option<ReviewId> {
        self.next
    }

    pub fn advance(&mut self) -> Option<ReviewId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Price;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn restaurant_with(stars: &[u8], rating: f64) -> Restaurant {
        Restaurant {
            id: 1,
            name: String::from("Pasta Paradise"),
            cuisine_id: 1,
            price: Price::Moderate,
            rating,
            image: String::new(),
            address: String::from("123 Italian St, Foodville"),
            menu: vec![String::from("Tiramisu")],
            reviews: stars
                .iter()
                .enumerate()
                .map(|(i, &rating)| Review {
                    id: i as u64 + 1,
                    rating,
                    comment: String::from("nice"),
                })
                .collect(),
        }
    }

    fn draft(rating: i32, comment: &str) -> ReviewDraft {
        ReviewDraftBuilder::default()
            .rating(rating)
            .comment(comment)
            .build()
            .unwrap()
    }

    #[test]
    fn test_submit_recomputes_mean() {
        let restaurant = restaurant_with(&[5, 4], 4.5);
        let updated = submit_review(&restaurant, &draft(3, "ok"), 3).unwrap();

        let stars: Vec<u8> = updated.reviews.iter().map(|r| r.rating).collect();
        assert_eq!(stars, vec![5, 4, 3]);
        assert_eq!(updated.rating, 4.0);
        assert_eq!(updated.reviews[2].id, 3);
        assert_eq!(updated.reviews[2].comment, "ok");
        // original value is untouched
        assert_eq!(restaurant.reviews.len(), 2);
        assert_eq!(restaurant.rating, 4.5);
    }

    #[test]
    fn test_first_review_replaces_seed_rating() {
        let restaurant = restaurant_with(&[], 4.8);
        let updated = submit_review(&restaurant, &draft(2, "meh"), 1).unwrap();
        assert_eq!(updated.rating, 2.0);
    }

    #[test]
    fn test_rejects_out_of_range_rating() {
        let restaurant = restaurant_with(&[5, 4], 4.5);
        for rating in [0, 6, -1] {
            let err = submit_review(&restaurant, &draft(rating, "ok"), 3).unwrap_err();
            assert!(matches!(err, Error::InvalidReview(_)));
        }
    }

    #[test]
    fn test_rejects_blank_comment() {
        let restaurant = restaurant_with(&[5], 5.0);
        for comment in ["", "   ", "\n\t"] {
            let err = submit_review(&restaurant, &draft(4, comment), 2).unwrap_err();
            assert!(matches!(err, Error::InvalidReview(_)));
        }
    }

    #[test]
    fn test_comment_is_trimmed() {
        let restaurant = restaurant_with(&[], 0.0);
        let updated = submit_review(&restaurant, &draft(5, "  great crust \n"), 1).unwrap();
        assert_eq!(updated.reviews[0].comment, "great crust");
    }

    #[test]
    fn test_id_sequence_is_monotonic() {
        let mut ids = ReviewIdSequence::after(8).unwrap();
        assert_eq!(ids.peek(), Some(9));
        assert_eq!(ids.advance(), Some(9));
        assert_eq!(ids.advance(), Some(10));
        assert_eq!(ids.peek(), Some(11));
    }

    #[test]
    fn test_id_sequence_never_wraps() {
        assert_eq!(ReviewIdSequence::after(u64::MAX), None);

        let mut ids = ReviewIdSequence::after(u64::MAX - 1).unwrap();
        assert_eq!(ids.advance(), Some(u64::MAX));
        assert_eq!(ids.peek(), None);
        assert_eq!(ids.advance(), None);
        assert_eq!(ids.advance(), None);
    }

    proptest! {
        #[test]
        fn submit_is_append_only_and_bounded(
            stars in prop::collection::vec(1u8..=5, 0..16),
            new in 1i32..=5,
        ) {
            let restaurant = restaurant_with(&stars, 3.0);
            let updated = submit_review(&restaurant, &draft(new, "fine"), 100).unwrap();

            prop_assert_eq!(updated.reviews.len(), restaurant.reviews.len() + 1);
            prop_assert_eq!(&updated.reviews[..stars.len()], &restaurant.reviews[..]);

            let all = stars.iter().copied().chain([new as u8]);
            let min = all.clone().min().unwrap() as f64;
            let max = all.max().unwrap() as f64;
            prop_assert!(updated.rating >= min && updated.rating <= max);
        }
    }
}
