use serde::{Deserialize, Serialize};

pub type CuisineId = u32;
pub type RestaurantId = u32;
pub type ReviewId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cuisine {
    pub id: CuisineId,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Price {
    #[serde(rename = "$")]
    Cheap,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Expensive,
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self {
            Self::Cheap => "$",
            Self::Moderate => "$$",
            Self::Expensive => "$$$",
        };
        f.write_str(sign)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine_id: CuisineId,
    pub price: Price,
    /// Mean of `reviews`, or the seed value while there are none.
    pub rating: f64,
    /// url to image
    pub image: String,
    pub address: String,
    pub menu: Vec<String>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub rating: u8,
    pub comment: String,
}
