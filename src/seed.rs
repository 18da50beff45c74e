use serde::Deserialize;

use crate::catalog::Catalog;
use crate::data::{Cuisine, Restaurant};
use crate::error::Result;

const SEED: &str = include_str!("seed.json");

#[derive(Deserialize)]
struct SeedDocument {
    cuisines: Vec<Cuisine>,
    restaurants: Vec<Restaurant>,
}

/// The catalog the app starts with.
pub fn load() -> Result<Catalog> {
    parse(SEED)
}

/// Build a catalog from a JSON document shaped like `seed.json`.
pub fn parse(document: &str) -> Result<Catalog> {
    let SeedDocument {
        cuisines,
        restaurants,
    } = serde_json::from_str(document)?;
    tracing::debug!(
        cuisines = cuisines.len(),
        restaurants = restaurants.len(),
        "seed parsed"
    );
    Catalog::new(cuisines, restaurants)
}
