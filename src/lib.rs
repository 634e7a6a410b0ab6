//! cinerow - movie and TV catalog browser for the terminal
//!
//! Rows of now-playing, popular, upcoming and top-rated titles, paged as
//! carousels with a slide animation, plus search and a detail view.
//!
//! # Modules
//!
//! - `models` - Catalog items, detail records, seasons, videos
//! - `api` - TMDB catalog client
//! - `carousel` - Paged carousel controller with transition lock
//! - `config` - Config file and API key lookup
//! - `app` - Application state and navigation
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod carousel;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use models::{Category, DetailRecord, Item, ItemList, MediaType, SeasonDetail, Video};

pub use api::{CatalogClient, CatalogError};
pub use app::{App, Request, Response, Screen};
pub use carousel::{Carousel, CarouselView, Direction, Intent, Phase};
pub use config::Config;
