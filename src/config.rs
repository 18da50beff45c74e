use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;
use tracing::Level;

/// Runtime knobs of the shell, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: Level,
    /// Decimals shown for ratings.
    pub rating_precision: usize,
    /// How many "did you mean" names to offer when nothing matches.
    pub suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            rating_precision: 1,
            suggestions: 3,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            log_level: try_load(&lookup, "FOODIE_LOG_LEVEL", defaults.log_level)?,
            rating_precision: try_load(
                &lookup,
                "FOODIE_RATING_PRECISION",
                defaults.rating_precision,
            )?,
            suggestions: try_load(&lookup, "FOODIE_SUGGESTIONS", defaults.suggestions)?,
        })
    }
}

fn try_load<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key} value: {raw:?}")),
        None => {
            tracing::debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
