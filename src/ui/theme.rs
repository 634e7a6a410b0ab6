//! Marquee theme for cinerow
//!
//! Color palette and style helpers for the TUI: a dark theater
//! background with a red marquee accent and warm gold ratings.

use ratatui::style::{Color, Modifier, Style};

/// Theater color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #141414 (theater black)
    pub const BACKGROUND: Color = Color::Rgb(0x14, 0x14, 0x14);

    /// Primary: #e50914 (marquee red)
    pub const PRIMARY: Color = Color::Rgb(0xe5, 0x09, 0x14);

    /// Secondary: #b3b3b3 (silver)
    pub const SECONDARY: Color = Color::Rgb(0xb3, 0xb3, 0xb3);

    /// Accent: #f5c518 (rating gold)
    pub const ACCENT: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    /// Text: #e5e5e5 (screen white)
    pub const TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);

    /// Dim: #6d6d6e (aisle grey)
    pub const DIM: Color = Color::Rgb(0x6d, 0x6d, 0x6e);

    /// Success: #46d369 (match green)
    pub const SUCCESS: Color = Color::Rgb(0x46, 0xd3, 0x69);

    /// Error: #ff4b4b (warning red)
    pub const ERROR: Color = Color::Rgb(0xff, 0x4b, 0x4b);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS (for UI elements)
    // ═══════════════════════════════════════════════════════════════════════

    /// Card and panel background
    pub const CARD: Color = Color::Rgb(0x2f, 0x2f, 0x2f);

    /// Border color when unfocused
    pub const BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Row heading
    pub fn row_title() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text style
    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Rating stars and counts
    pub fn rating() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Poster card body
    pub fn card() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::CARD)
    }

    /// Card under the cursor
    pub fn card_selected() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::CARD)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::CARD)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::CARD)
    }

    /// Loading indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::ITALIC)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Genre tags
    pub fn genre() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Trailer link
    pub fn link() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::UNDERLINED)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTRAST HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Relative luminance per WCAG 2.x
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Contrast ratio between two colors (1.0 ..= 21.0)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (hi, lo) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (hi + 0.05) / (lo + 0.05)
}

/// Extract RGB components from an RGB color
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
