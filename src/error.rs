use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Cuisine,
    Restaurant,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cuisine => f.write_str("cuisine"),
            Self::Restaurant => f.write_str("restaurant"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("no {kind} found with id {id}")]
    NotFound { kind: EntityKind, id: u32 },

    #[error("invalid review: {0}")]
    InvalidReview(&'static str),

    #[error("no review ids left to hand out")]
    ReviewIdsExhausted,

    #[error("invalid seed data: {0}")]
    InvalidSeed(String),

    #[error("malformed seed document: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn cuisine_not_found(id: u32) -> Self {
        Self::NotFound {
            kind: EntityKind::Cuisine,
            id,
        }
    }

    pub(crate) fn restaurant_not_found(id: u32) -> Self {
        Self::NotFound {
            kind: EntityKind::Restaurant,
            id,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
