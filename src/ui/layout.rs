//! Screen layout
//!
//! Header, banner, carousel rows, status bar, and the overlays drawn on
//! top of them.

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, InputMode, Screen};
use crate::ui::banner::{render_banner, BANNER_HEIGHT};
use crate::ui::carousel::{render_row, ROW_HEIGHT};
use crate::ui::detail::render_detail;
use crate::ui::search::render_search_box;
use crate::ui::Theme;

/// Main render function
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let [header, content, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, app);
    render_content(frame, content, app, now);
    render_status_bar(frame, status, app);

    if let Some(detail) = &app.detail {
        render_detail(frame, content, detail);
    }

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let [logo_area, tabs_area, search_area] = Layout::horizontal([
        Constraint::Length(12),
        Constraint::Length(24),
        Constraint::Min(1),
    ])
    .areas(area);

    let logo = Paragraph::new(Span::styled(
        "CINEROW",
        Style::default()
            .fg(Theme::PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, logo_area);

    let tab = |screen: Screen, key: &'static str| {
        let style = if app.screen == screen {
            Theme::title()
        } else {
            Theme::dimmed()
        };
        vec![
            Span::styled(key, Theme::keybind()),
            Span::styled(format!(":{} ", screen.title()), style),
        ]
    };
    let mut spans = tab(Screen::Movies, "1");
    spans.extend(tab(Screen::Tv, "2"));
    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(tabs, tabs_area);

    render_search_box(frame, search_area, &app.search, &app.input_mode);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let state = app.current();

    let rows_area = if app.screen == Screen::Search {
        if let Some(msg) = app.search.loading.message() {
            let style = if app.search.loading.is_error() {
                Theme::error()
            } else {
                Theme::loading()
            };
            frame.render_widget(
                Paragraph::new(msg).style(style).alignment(Alignment::Center),
                area,
            );
            return;
        }
        if state.rows.is_empty() {
            frame.render_widget(
                Paragraph::new("Type / and a keyword (2+ characters) to search")
                    .style(Theme::dimmed())
                    .alignment(Alignment::Center),
                area,
            );
            return;
        }
        area
    } else {
        let banner_height = BANNER_HEIGHT.min(area.height / 2);
        let [banner, rest] =
            Layout::vertical([Constraint::Length(banner_height), Constraint::Min(0)]).areas(area);
        render_banner(frame, banner, state.banner.as_ref());
        rest
    };

    // Keep the focused row on screen
    let visible = (rows_area.height / ROW_HEIGHT).max(1) as usize;
    let first = state.focused_row.saturating_sub(visible - 1);

    for (slot, (index, row)) in state
        .rows
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .enumerate()
    {
        let y = rows_area.y + slot as u16 * ROW_HEIGHT;
        let height = ROW_HEIGHT.min(rows_area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let rect = Rect {
            x: rows_area.x,
            y,
            width: rows_area.width,
            height,
        };
        render_row(
            frame,
            rect,
            row,
            index == state.focused_row,
            now,
            app.viewport.width,
        );
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let help = if app.detail.is_some() {
        " ↑↓:season  ESC:close "
    } else {
        " ←→:card  </>:page  ↑↓:row  ↵:detail  r:retry  /:search  q:quit "
    };

    let status_line = Line::from(vec![
        mode_indicator,
        Span::styled(format!(" {} ", app.screen.title()), Theme::dimmed()),
        Span::raw(" │ "),
        Span::styled(help, Theme::dimmed()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(Theme::status_bar()), area);
}

fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5.min(area.height);

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}
