//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.

pub mod banner;
pub mod carousel;
pub mod detail;
pub mod layout;
pub mod search;
pub mod theme;

pub use layout::render;
pub use theme::Theme;
