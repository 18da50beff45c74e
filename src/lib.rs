pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod rating;
pub mod review;
pub mod seed;
pub mod state;

pub use error::{Error, Result};
