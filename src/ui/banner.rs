//! Hero banner
//!
//! Title, backdrop, overview and trailer link of the featured item at the top of a
//! category screen.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::Banner;
use crate::ui::Theme;

/// Preferred banner height
pub const BANNER_HEIGHT: u16 = 9;

const BACKDROP_SIZE: &str = "w1280";

pub fn render_banner(frame: &mut Frame, area: Rect, banner: Option<&Banner>) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(BorderType::Thick)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(banner) = banner else {
        frame.render_widget(
            Paragraph::new("Loading...")
                .style(Theme::loading())
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let item = &banner.item;
    let mut lines = vec![
        Line::from(Span::styled(
            item.title.to_uppercase(),
            Theme::title().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(item.date.clone().unwrap_or_default(), Theme::year()),
            Span::raw("  "),
            Span::styled(format!("⭐ {:.1}", item.vote_average), Theme::rating()),
            Span::raw("  "),
            Span::styled(item.genre_names().join(" · "), Theme::genre()),
        ]),
        Line::from(vec![
            Span::styled("▣ Backdrop ", Theme::dimmed()),
            Span::styled(item.backdrop_url(BACKDROP_SIZE), Theme::link()),
        ]),
        Line::from(""),
        Line::from(Span::styled(item.overview.as_str(), Theme::text())),
    ];

    if let Some(url) = banner.trailer.as_ref().and_then(|t| t.url()) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("▶ Trailer ", Theme::keybind()),
            Span::styled(url, Theme::link()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
