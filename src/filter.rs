use derive_builder::Builder;

use crate::data::{CuisineId, Restaurant};
use crate::favorites::Favorites;

/// What the restaurant list is narrowed down by.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterProps {
    #[builder(setter(into, strip_option), default)]
    pub cuisine_id: Option<CuisineId>,
    #[builder(setter(into), default)]
    pub search_term: String,
    #[builder(default)]
    pub favorites_only: bool,
}

/// Apply cuisine, search and favorites predicates, keeping the order of `all`.
pub fn filter_restaurants<'a>(
    all: &'a [Restaurant],
    props: &FilterProps,
    favorites: &Favorites,
) -> Vec<&'a Restaurant> {
    let needle = case_fold(&props.search_term);
    all.iter()
        .filter(|restaurant| {
            props
                .cuisine_id
                .map_or(true, |cuisine_id| restaurant.cuisine_id == cuisine_id)
                && (needle.is_empty() || case_fold(&restaurant.name).contains(&needle))
                && (!props.favorites_only || favorites.contains(restaurant.id))
        })
        .collect()
}

/// Unicode case folding for substring search.
///
/// Works char by char so no context-dependent rule (Greek final sigma) can
/// fold the same letter two ways. Upper-casing first expands `ß` to `SS` and
/// turns `ς` into `Σ`, so both spellings meet in `ss` and `σ`.
pub fn case_fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
        .collect()
}
