//! Carousel row view
//!
//! Draws one catalog row as a strip of cards. While a slide animation
//! runs, the incoming page is shifted horizontally and clipped to the row.

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::CatalogRow;
use crate::models::Item;
use crate::ui::Theme;

/// Height of one rendered row (heading + cards)
pub const ROW_HEIGHT: u16 = 8;

/// Render a carousel row
pub fn render_row(
    frame: &mut Frame,
    area: Rect,
    row: &CatalogRow,
    focused: bool,
    now: Instant,
    viewport_width: u16,
) {
    if area.height < 2 || area.width < 4 {
        return;
    }

    let [heading, cards] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);

    let carousel = &row.carousel;
    let page_marker = format!(" {}/{}", carousel.page() + 1, carousel.page_count());
    let heading_line = Line::from(vec![
        Span::styled(
            if focused { "▸ " } else { "  " },
            if focused { Theme::title() } else { Theme::dimmed() },
        ),
        Span::styled(row.title.as_str(), Theme::row_title()),
        Span::styled(page_marker, Theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(heading_line), heading);

    if let Some(msg) = row.loading.message() {
        let style = if row.loading.is_error() {
            Theme::error()
        } else {
            Theme::loading()
        };
        let text = if row.loading.is_error() {
            format!("{} (r to retry)", msg)
        } else {
            msg.to_string()
        };
        frame.render_widget(Paragraph::new(text).style(style), cards);
        return;
    }

    let window = carousel.current_window();
    if window.is_empty() {
        frame.render_widget(Paragraph::new("Nothing here").style(Theme::dimmed()), cards);
        return;
    }

    let shift = row
        .animation
        .map(|a| a.shift(now, viewport_width))
        .unwrap_or(0);

    for (i, rect) in card_rects(cards, carousel.page_size(), shift)
        .into_iter()
        .enumerate()
        .take(window.len())
    {
        if let Some(rect) = rect {
            render_card(frame, rect, &window[i], focused && i == row.selected);
        }
    }
}

/// Card slots for a row, shifted by `shift` columns and clipped to `area`.
///
/// Slots pushed entirely outside the row are `None`.
pub fn card_rects(area: Rect, slots: usize, shift: i32) -> Vec<Option<Rect>> {
    let slots = slots.max(1);
    let gap = 1i32;
    let width = ((i32::from(area.width) - gap * (slots as i32 - 1)) / slots as i32).max(1);
    let left = i32::from(area.x);
    let right = left + i32::from(area.width);

    (0..slots)
        .map(|i| {
            let x0 = left + i as i32 * (width + gap) + shift;
            let x1 = x0 + width;
            let cx0 = x0.max(left);
            let cx1 = x1.min(right);
            (cx1 > cx0).then(|| Rect {
                x: cx0 as u16,
                y: area.y,
                width: (cx1 - cx0) as u16,
                height: area.height,
            })
        })
        .collect()
}

fn render_card(frame: &mut Frame, area: Rect, item: &Item, selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if selected {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .style(if selected {
            Theme::card_selected()
        } else {
            Theme::card()
        });

    let date = item.date.as_deref().unwrap_or("----");
    let genres = item.genre_names().join(" ");
    let lines = vec![
        Line::from(Span::styled(
            item.title.as_str(),
            if selected {
                Theme::title()
            } else {
                Theme::row_title()
            },
        )),
        Line::from(Span::styled(date, Theme::year())),
        Line::from(Span::styled(genres, Theme::genre())),
        Line::from(Span::styled(
            format!("⭐ {:.1}", item.vote_average),
            Theme::rating(),
        )),
    ];

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(card, area);
}
