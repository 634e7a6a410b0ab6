//! CLI Command Handlers
//!
//! Each handler takes CLI args, the loaded config and Output, and returns
//! an ExitCode.

use serde::Serialize;

use crate::api::CatalogClient;
use crate::carousel::{Carousel, Direction};
use crate::cli::{
    ExitCode, InfoCmd, ListCmd, Output, SearchCmd, SeasonsCmd, VideosCmd, WindowCmd,
};
use crate::config::Config;
use crate::models::{pick_trailer, Category, Item, MediaType, SeasonDetail, Video};

/// Build the catalog client or report why it can't be built
fn catalog(config: &Config, output: &Output) -> Result<CatalogClient, ExitCode> {
    config
        .catalog_client()
        .map_err(|e| output.catalog_error("Cannot reach catalog", &e))
}

/// Print data, mapping serialization failures to ExitCode::Error
fn emit<T: Serialize>(output: &Output, data: T, human: impl FnOnce(&T) -> String) -> ExitCode {
    match output.print(data, human) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn item_lines(items: &[Item]) -> String {
    if items.is_empty() {
        return "No results".to_string();
    }
    items
        .iter()
        .map(|i| format!("{:>8}  {}  ⭐ {:.1}", i.id, i, i.vote_average))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// List Command
// =============================================================================

pub async fn list_cmd(cmd: ListCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match catalog(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let category = Category::from(cmd.category);

    output.info(format!("Fetching {}...", category));

    match client.list_by_category(category, cmd.page).await {
        Ok(mut list) => {
            list.items.truncate(cmd.limit);
            emit(output, list.items, |items| item_lines(items))
        }
        Err(e) => output.catalog_error("List failed", &e),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match catalog(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    output.info(format!("Searching for: {}", cmd.keyword));

    match client.search_multi(&cmd.keyword).await {
        Ok(list) => {
            let mut items = list.items;
            if let Some(filter) = cmd.media_type {
                let kind = MediaType::from(filter);
                items.retain(|i| i.media_type == kind);
            }
            items.truncate(cmd.limit);
            emit(output, items, |items| item_lines(items))
        }
        Err(e) => output.catalog_error("Search failed", &e),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match catalog(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    output.info(format!("Getting info for: {}", cmd.id));

    match client.get_detail(cmd.media_type.into(), cmd.id).await {
        Ok(record) => emit(output, record, |r| r.to_string()),
        Err(e) => output.catalog_error("Info failed", &e),
    }
}

// =============================================================================
// Seasons Command
// =============================================================================

fn season_lines(seasons: &[SeasonDetail]) -> String {
    let mut out = Vec::new();
    for season in seasons {
        out.push(format!("{} ({} episodes)", season.name, season.episodes.len()));
        for episode in &season.episodes {
            let date = episode.air_date.as_deref().unwrap_or("TBA");
            out.push(format!("  {}  {}", episode, date));
        }
    }
    out.join("\n")
}

pub async fn seasons_cmd(cmd: SeasonsCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match catalog(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    output.info(format!(
        "Fetching {} season(s) of show {}...",
        cmd.seasons.len(),
        cmd.id
    ));

    match client.season_details(cmd.id, &cmd.seasons).await {
        Ok(seasons) => emit(output, seasons, |s| season_lines(s)),
        Err(e) => output.catalog_error("Seasons failed", &e),
    }
}

// =============================================================================
// Videos Command
// =============================================================================

fn video_lines(videos: &[Video]) -> String {
    if videos.is_empty() {
        return "No videos".to_string();
    }
    videos
        .iter()
        .map(|v| {
            let url = v.url().unwrap_or_else(|| format!("{} {}", v.site, v.key));
            format!("{:<10} {}  {}", v.kind, v.name, url)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn videos_cmd(cmd: VideosCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match catalog(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.videos(cmd.media_type.into(), cmd.id).await {
        Ok(videos) if cmd.trailer => match pick_trailer(&videos).cloned() {
            Some(trailer) => emit(output, vec![trailer], |v| video_lines(v)),
            None => output.error("No YouTube trailer", ExitCode::NotFound),
        },
        Ok(videos) => emit(output, videos, |v| video_lines(v)),
        Err(e) => output.catalog_error("Videos failed", &e),
    }
}

// =============================================================================
// Window Command
// =============================================================================

/// One carousel page as printed by `window`
#[derive(Debug, Serialize)]
pub struct WindowOutput {
    pub category: String,
    pub page: usize,
    pub page_size: usize,
    pub max_page: Option<usize>,
    pub direction: Direction,
    pub items: Vec<Item>,
}

/// Step a carousel forward `pages` times from page 0, completing each slide
pub fn step_to_page<T>(carousel: &mut Carousel<T>, pages: usize) {
    for _ in 0..pages {
        if carousel.next().is_none() {
            break;
        }
        carousel.on_transition_complete();
    }
}

pub async fn window_cmd(cmd: WindowCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match catalog(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let category = Category::from(cmd.category);
    let page_size = cmd.page_size.unwrap_or_else(|| config.page_size());
    if page_size == 0 {
        return output.error("Page size must be at least 1", ExitCode::InvalidArgs);
    }

    let list = match client.list_by_category(category, None).await {
        Ok(list) => list,
        Err(e) => return output.catalog_error("List failed", &e),
    };

    let mut carousel = Carousel::new(list.items).with_page_size(page_size);
    step_to_page(&mut carousel, cmd.page);

    let window = WindowOutput {
        category: category.title().to_string(),
        page: carousel.page(),
        page_size: carousel.page_size(),
        max_page: carousel.max_page(),
        direction: carousel.direction(),
        items: carousel.current_window().to_vec(),
    };

    emit(output, window, |w| {
        let pages = w.max_page.map(|m| m + 1).unwrap_or(1);
        format!(
            "{} - page {}/{}\n{}",
            w.category,
            w.page + 1,
            pages,
            item_lines(&w.items)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_to_page_wraps() {
        let mut c = Carousel::new((0..20).collect::<Vec<u32>>()).with_page_size(6);
        step_to_page(&mut c, 3);
        assert_eq!(c.page(), 0);
        assert!(!c.is_locked());
        assert_eq!(c.direction(), Direction::Forward);
    }

    #[test]
    fn test_step_to_page_short_list_stays() {
        let mut c = Carousel::new(vec![1, 2, 3]).with_page_size(6);
        step_to_page(&mut c, 2);
        assert_eq!(c.page(), 0);
        assert_eq!(c.current_window(), &[1, 2, 3]);
    }

    #[test]
    fn test_item_lines_empty() {
        assert_eq!(item_lines(&[]), "No results");
    }
}
