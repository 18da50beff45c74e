use crate::data::Review;

/// Aggregate rating of a review list.
///
/// Returns `fallback` for an empty list, otherwise the unrounded mean of every
/// review's stars.
pub fn compute_rating(reviews: &[Review], fallback: f64) -> f64 {
    if reviews.is_empty() {
        return fallback;
    }
    let sum: u64 = reviews.iter().map(|review| u64::from(review.rating)).sum();
    sum as f64 / reviews.len() as f64
}

/// Render a rating with a fixed number of decimals, e.g. `4.5` -> `"4.5"`.
pub fn format_rating(rating: f64, precision: usize) -> String {
    format!("{rating:.precision$}")
}
