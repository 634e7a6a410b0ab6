//! API clients for external services
//!
//! - TMDB: category lists, details, search, seasons and trailers

pub mod tmdb;

pub use tmdb::{CatalogClient, CatalogError};
