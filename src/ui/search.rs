//! Search box
//!
//! Header input showing the query and a cursor while editing.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{InputMode, SearchState};
use crate::ui::Theme;

/// Text shown inside the search box
pub fn search_text(search: &SearchState, mode: &InputMode) -> String {
    if *mode == InputMode::Editing {
        let split = search
            .query
            .char_indices()
            .nth(search.cursor)
            .map(|(i, _)| i)
            .unwrap_or(search.query.len());
        let (before, after) = search.query.split_at(split);
        format!("⌕ {}│{}", before, after)
    } else if search.query.is_empty() {
        "⌕ Type / to search...".to_string()
    } else {
        format!("⌕ {}", search.query)
    }
}

pub fn render_search_box(frame: &mut Frame, area: Rect, search: &SearchState, mode: &InputMode) {
    let editing = *mode == InputMode::Editing;
    let border = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let search_box = Paragraph::new(search_text(search, mode))
        .style(if editing {
            Theme::input().fg(Theme::PRIMARY)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border)
                .title(Span::styled(" SEARCH ", Theme::title())),
        );
    frame.render_widget(search_box, area);
}
