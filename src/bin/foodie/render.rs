use std::fmt::Write;

use foodie_review::{
    config::Config,
    data::Restaurant,
    rating::format_rating,
    state::{AppState, View},
};
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

pub(super) fn view(state: &AppState, config: &Config) -> String {
    match state.view() {
        View::Cuisines => cuisines(state),
        View::Restaurants { .. } => restaurants(state, config),
        View::Detail { .. } => match state.selected_restaurant() {
            Some(restaurant) => detail(state, restaurant, config),
            None => String::from("Restaurant is gone."),
        },
    }
}

fn cuisines(state: &AppState) -> String {
    let mut text = String::from("Choose Your Cuisine\n");
    for cuisine in state.catalog().list_cuisines() {
        let _ = write!(text, "\n  [{}] {} {}", cuisine.id, cuisine.icon, cuisine.name);
    }
    text
}

fn restaurants(state: &AppState, config: &Config) -> String {
    let title = state
        .selected_cuisine()
        .map(|cuisine| format!("{} Restaurants", cuisine.name))
        .unwrap_or_else(|| String::from("Restaurants"));
    let mut text = title;

    let mut filters = Vec::new();
    if !state.search_term().is_empty() {
        filters.push(format!("search: {:?}", state.search_term()));
    }
    if state.favorites_only() {
        filters.push(String::from("favorites only"));
    }
    if !filters.is_empty() {
        let _ = write!(text, " ({})", filters.join(", "));
    }
    text.push('\n');

    let shown = state.displayed_restaurants();
    if shown.is_empty() {
        text.push_str("\nNo restaurants found");
        text.push_str("\nTry adjusting your search or filter to find what you're looking for.");
        let suggestions = suggest(state, config.suggestions);
        if !suggestions.is_empty() {
            let _ = write!(text, "\nDid you mean: {}?", suggestions.join(", "));
        }
        return text;
    }

    for restaurant in shown {
        let heart = if state.is_favorite(restaurant.id) { "  ♥" } else { "" };
        let _ = write!(
            text,
            "\n  [{}] {}  {}  ★ {}{heart}",
            restaurant.id,
            restaurant.name,
            restaurant.price,
            format_rating(restaurant.rating, config.rating_precision),
        );
    }
    text
}

fn detail(state: &AppState, restaurant: &Restaurant, config: &Config) -> String {
    let mut text = restaurant.name.clone();
    if state.is_favorite(restaurant.id) {
        text.push_str("  ♥");
    }
    let _ = write!(
        text,
        "\n★ {} ({} reviews)\nPrice: {}\n{}\nPhoto: {}\n\nMenu",
        format_rating(restaurant.rating, config.rating_precision),
        restaurant.reviews.len(),
        restaurant.price,
        restaurant.address,
        restaurant.image,
    );
    for item in &restaurant.menu {
        let _ = write!(text, "\n  - {item}");
    }
    text.push_str("\n\nReviews");
    for review in &restaurant.reviews {
        let _ = write!(text, "\n  {}/5  {}", review.rating, review.comment);
    }
    text
}

/// Names in the selected cuisine that fuzzily match the search term, best first.
fn suggest(state: &AppState, limit: usize) -> Vec<String> {
    let pattern = state.search_term();
    let Some(cuisine) = state.selected_cuisine() else {
        return Vec::new();
    };
    if pattern.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &str)> = state
        .catalog()
        .list_restaurants(Some(cuisine.id))
        .into_iter()
        .filter_map(|restaurant| {
            matcher
                .fuzzy_match(&restaurant.name, pattern)
                .map(|score| (score, restaurant.name.as_str()))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}
