//! Detail overlay for movies and TV shows
//!
//! Centered modal with the opened card's metadata; shows additionally list
//! their seasons and the episodes of the season under the cursor.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::DetailState;
use crate::models::DetailRecord;
use crate::ui::Theme;

/// Area of a modal covering `percent` of `area`, centered
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_detail(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let modal = centered_rect(area, 80, 80);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(
            format!(" {} ", detail.item.title),
            Theme::title(),
        ))
        .style(Theme::text());
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let is_tv = matches!(detail.record, Some(DetailRecord::Tv(_)));
    let [info, seasons] = if is_tv {
        Layout::vertical([Constraint::Length(8), Constraint::Min(3)]).areas(inner)
    } else {
        [inner, Rect::default()]
    };

    render_info(frame, info, detail);
    if let Some(DetailRecord::Tv(_)) = &detail.record {
        render_seasons(frame, seasons, detail);
    }
}

fn render_info(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let item = &detail.item;
    let mut meta = vec![
        Span::styled(item.date.clone().unwrap_or_default(), Theme::year()),
        Span::raw("  "),
    ];

    match &detail.record {
        Some(record) => meta.push(Span::styled(record.runtime_label(), Theme::secondary())),
        None if detail.loading.is_error() => {
            meta.push(Span::styled("details unavailable", Theme::error()))
        }
        None => meta.push(Span::styled("Loading...", Theme::loading())),
    }

    meta.extend([
        Span::raw("  "),
        Span::styled(item.genre_names().join(" "), Theme::genre()),
        Span::raw("  "),
        Span::styled(format!("⭐{:.1}", item.vote_average), Theme::rating()),
        Span::raw("  "),
        Span::styled(format!("🧡{}", item.vote_count), Theme::rating()),
    ]);

    let mut lines = vec![Line::from(meta)];

    if let Some(DetailRecord::Movie(movie)) = &detail.record {
        if let Some(tagline) = &movie.tagline {
            lines.push(Line::from(Span::styled(
                tagline.as_str(),
                Theme::secondary().add_modifier(Modifier::ITALIC),
            )));
        }
    }
    if let Some(DetailRecord::Tv(tv)) = &detail.record {
        lines.push(Line::from(vec![
            Span::styled("Seasons: ", Theme::dimmed()),
            Span::styled(tv.number_of_seasons.to_string(), Theme::text()),
            Span::styled("  Episodes: ", Theme::dimmed()),
            Span::styled(tv.number_of_episodes.to_string(), Theme::text()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(item.overview.as_str(), Theme::text())));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_seasons(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let [list_area, episodes_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let Some(DetailRecord::Tv(tv)) = &detail.record else {
        return;
    };

    let seasons: Vec<ListItem> = tv
        .seasons
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let selected = i == detail.season_list.selected;
            let style = if selected {
                Theme::card_selected()
            } else {
                Theme::secondary()
            };
            ListItem::new(Line::from(Span::styled(s.to_string(), style)))
        })
        .collect();
    frame.render_widget(
        List::new(seasons).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(" EPISODES ", Theme::title())),
        ),
        list_area,
    );

    let episodes_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if detail.loading.is_loading() {
        frame.render_widget(
            Paragraph::new("Loading...")
                .style(Theme::loading())
                .block(episodes_block),
            episodes_area,
        );
        return;
    }

    let Some(season) = detail.selected_season() else {
        let msg = detail.loading.message().unwrap_or("No episodes");
        frame.render_widget(
            Paragraph::new(msg).style(Theme::dimmed()).block(episodes_block),
            episodes_area,
        );
        return;
    };

    let episodes: Vec<ListItem> = season
        .episodes
        .iter()
        .map(|e| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3} ", e.episode), Theme::dimmed()),
                Span::styled(e.name.as_str(), Theme::text()),
                Span::raw(" "),
                Span::styled(e.air_date.clone().unwrap_or_default(), Theme::year()),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(episodes).block(episodes_block.title(Span::styled(
            format!(" {} ", season.name),
            Theme::row_title(),
        ))),
        episodes_area,
    );
}
