//! App state tests
//!
//! Request queueing, response handling, carousel navigation from the
//! keyboard, search, and the detail overlay.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use cinerow::api::CatalogError;
use cinerow::app::{App, AppSettings, InputMode, LoadingState, Request, Response, Screen};
use cinerow::models::{
    Category, DetailRecord, Item, ItemList, MediaType, SeasonSummary, TvDetail, Video,
};

fn item(id: u64, media_type: MediaType) -> Item {
    Item {
        id,
        media_type,
        title: format!("Title {}", id),
        backdrop_path: None,
        poster_path: None,
        date: Some("2024-01-01".into()),
        genre_ids: vec![18],
        overview: String::new(),
        popularity: 1.0,
        vote_average: 7.5,
        vote_count: 10,
    }
}

fn list(ids: std::ops::Range<u64>, media_type: MediaType) -> ItemList {
    let items: Vec<Item> = ids.map(|id| item(id, media_type)).collect();
    ItemList {
        page: 1,
        total_pages: 1,
        total_results: items.len() as u32,
        items,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

/// App on the Movies screen with the first row loaded with 20 items
fn loaded_app() -> App {
    let mut app = App::default();
    app.start();
    app.take_requests();
    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 0,
        result: Ok(list(0..20, MediaType::Movie)),
    });
    app.take_requests();
    app
}

fn later() -> Instant {
    Instant::now() + Duration::from_secs(5)
}

// =============================================================================
// Loading Rows
// =============================================================================

#[test]
fn test_start_requests_every_movie_row() {
    let mut app = App::default();
    app.start();

    let requests = app.take_requests();
    let categories: Vec<Category> = requests
        .iter()
        .map(|r| match r {
            Request::LoadRow {
                screen: Screen::Movies,
                category,
                ..
            } => *category,
            other => panic!("unexpected request {:?}", other),
        })
        .collect();
    assert_eq!(categories, Category::MOVIES.to_vec());
    assert!(app.current().rows.iter().all(|r| r.loading.is_loading()));

    // Starting again does not re-request
    app.start();
    assert!(app.take_requests().is_empty());
}

#[test]
fn test_row_response_fills_carousel_and_banner() {
    let mut app = App::default();
    app.start();
    app.take_requests();

    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 0,
        result: Ok(list(0..20, MediaType::Movie)),
    });

    let row = &app.current().rows[0];
    assert_eq!(row.loading, LoadingState::Idle);
    assert_eq!(row.carousel.len(), 20);
    assert_eq!(row.carousel.current_window().len(), 6);

    let banner = app.current().banner.clone().expect("banner picked");
    assert!(banner.item.id < 20);
    let requests = app.take_requests();
    assert_eq!(
        requests,
        vec![Request::LoadBannerVideos {
            screen: Screen::Movies,
            media_type: MediaType::Movie,
            id: banner.item.id,
        }]
    );

    app.apply(Response::BannerVideos {
        screen: Screen::Movies,
        id: banner.item.id,
        result: Ok(vec![Video {
            key: "k1".into(),
            name: "Official Trailer".into(),
            site: "YouTube".into(),
            kind: "Trailer".into(),
        }]),
    });
    let trailer = app.current().banner.as_ref().and_then(|b| b.trailer.clone());
    assert_eq!(trailer.map(|t| t.key), Some("k1".to_string()));
}

#[test]
fn test_failed_row_can_be_retried() {
    let mut app = App::default();
    app.start();
    app.take_requests();

    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 0,
        result: Err(CatalogError::ServerError(500)),
    });
    assert!(app.current().rows[0].loading.is_error());

    assert!(app.handle_key(key(KeyCode::Char('r'))));
    assert_eq!(
        app.take_requests(),
        vec![Request::LoadRow {
            screen: Screen::Movies,
            row: 0,
            category: Category::NowPlaying,
        }]
    );

    // Loaded rows ignore retry
    let mut app = loaded_app();
    assert!(!app.handle_key(key(KeyCode::Char('r'))));
}

#[test]
fn test_row_error_messages() {
    let mut app = App::default();
    app.start();
    app.take_requests();

    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 0,
        result: Err(CatalogError::ServerError(503)),
    });
    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 1,
        result: Err(CatalogError::MissingApiKey),
    });

    let rows = &app.current().rows;
    let outage = rows[0].loading.message().unwrap();
    assert!(outage.starts_with("Data unavailable"), "{}", outage);
    let setup = rows[1].loading.message().unwrap();
    assert!(!setup.starts_with("Data unavailable"), "{}", setup);
    assert!(setup.contains("TMDB_API_KEY"));
}

#[test]
fn test_switching_screens_loads_once() {
    let mut app = App::default();
    app.start();
    app.take_requests();

    app.handle_key(key(KeyCode::Char('2')));
    assert_eq!(app.screen, Screen::Tv);
    assert_eq!(app.take_requests().len(), Category::TV.len());

    app.handle_key(key(KeyCode::Char('1')));
    app.handle_key(key(KeyCode::Char('2')));
    assert!(app.take_requests().is_empty());
}

// =============================================================================
// Carousel Navigation
// =============================================================================

#[test]
fn test_page_keys_lock_until_animation_finishes() {
    let mut app = loaded_app();

    assert!(app.handle_key(key(KeyCode::Char('>'))));
    assert!(app.is_animating());
    let row = &app.current().rows[0];
    assert_eq!(row.carousel.page(), 1);
    assert!(row.carousel.is_locked());

    // Locked: further paging is ignored
    assert!(!app.handle_key(key(KeyCode::Char('>'))));
    assert!(!app.handle_key(key(KeyCode::Char('<'))));
    assert_eq!(app.current().rows[0].carousel.page(), 1);

    app.tick(later());
    assert!(!app.is_animating());
    assert!(!app.current().rows[0].carousel.is_locked());

    assert!(app.handle_key(key(KeyCode::Char('<'))));
    app.tick(later());
    assert_eq!(app.current().rows[0].carousel.page(), 0);
}

#[test]
fn test_row_reload_during_slide_resets_page() {
    let mut app = loaded_app();

    assert!(app.next_page());
    assert!(app.is_animating());
    assert_eq!(app.current().rows[0].carousel.page(), 1);

    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 0,
        result: Ok(list(100..118, MediaType::Movie)),
    });

    let row = &app.current().rows[0];
    assert!(!app.is_animating());
    assert!(!row.carousel.is_locked());
    assert_eq!(row.carousel.page(), 0);
    assert_eq!(row.carousel.current_window()[0].id, 100);

    // Paging works again right away
    assert!(app.next_page());
    assert_eq!(app.current().rows[0].carousel.page(), 1);
}

#[test]
fn test_card_cursor_pages_at_window_edge() {
    let mut app = loaded_app();

    for _ in 0..5 {
        assert!(app.handle_key(key(KeyCode::Right)));
    }
    assert_eq!(app.current().rows[0].selected, 5);
    assert_eq!(app.current().rows[0].carousel.page(), 0);

    // Stepping past the last card slides in the next page
    assert!(app.handle_key(key(KeyCode::Right)));
    assert_eq!(app.current().rows[0].carousel.page(), 1);
    assert_eq!(app.current().rows[0].selected, 0);
    app.tick(later());

    // Stepping left of the first card goes back, cursor on the last card
    assert!(app.handle_key(key(KeyCode::Left)));
    assert_eq!(app.current().rows[0].carousel.page(), 0);
    assert_eq!(app.current().rows[0].selected, 5);
}

#[test]
fn test_short_row_does_not_page() {
    let mut app = App::default();
    app.start();
    app.take_requests();
    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 0,
        result: Ok(list(0..4, MediaType::Movie)),
    });

    assert!(!app.handle_key(key(KeyCode::Char('>'))));
    assert!(!app.is_animating());
}

#[test]
fn test_rows_page_independently() {
    let mut app = loaded_app();
    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 1,
        result: Ok(list(100..130, MediaType::Movie)),
    });

    app.handle_key(key(KeyCode::Char('>')));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.current().focused_row, 1);

    // Row 0 is still mid-slide; row 1 accepts its own navigation
    assert!(app.handle_key(key(KeyCode::Char('>'))));
    assert_eq!(app.current().rows[1].carousel.page(), 1);
    assert!(app.current().rows[0].carousel.is_locked());
}

#[test]
fn test_stuck_transition_expires_with_timeout() {
    let settings = AppSettings {
        transition: Duration::from_secs(3600),
        transition_timeout: Some(Duration::from_millis(100)),
        ..AppSettings::default()
    };
    let mut app = App::new(settings);
    app.start();
    app.take_requests();
    app.apply(Response::Row {
        screen: Screen::Movies,
        row: 0,
        result: Ok(list(0..20, MediaType::Movie)),
    });

    app.handle_key(key(KeyCode::Char('>')));
    app.tick(Instant::now() + Duration::from_secs(1));
    assert!(!app.current().rows[0].carousel.is_locked());
    assert!(!app.is_animating());
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_needs_two_characters() {
    let mut app = loaded_app();

    app.handle_key(key(KeyCode::Char('/')));
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.screen, Screen::Search);

    type_text(&mut app, "a");
    assert!(!app.handle_key(key(KeyCode::Enter)));
    assert!(app.error.is_some());
    assert!(app.take_requests().is_empty());

    type_text(&mut app, "b");
    assert!(app.handle_key(key(KeyCode::Enter)));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(
        app.take_requests(),
        vec![Request::Search {
            keyword: "ab".into()
        }]
    );
}

#[test]
fn test_search_results_split_by_kind() {
    let mut app = loaded_app();
    app.handle_key(key(KeyCode::Char('/')));
    type_text(&mut app, "dune");
    app.handle_key(key(KeyCode::Enter));
    app.take_requests();

    let mut results = list(0..3, MediaType::Movie);
    results.items.push(item(50, MediaType::Tv));
    app.apply(Response::Search {
        keyword: "dune".into(),
        result: Ok(results),
    });

    let rows = &app.current().rows;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].carousel.len(), 3);
    assert_eq!(rows[1].carousel.items()[0].id, 50);
    assert_eq!(app.search.loading, LoadingState::Idle);
}

#[test]
fn test_stale_search_response_dropped() {
    let mut app = loaded_app();
    app.handle_key(key(KeyCode::Char('/')));
    type_text(&mut app, "dune");
    app.handle_key(key(KeyCode::Enter));

    app.apply(Response::Search {
        keyword: "old query".into(),
        result: Ok(list(0..5, MediaType::Movie)),
    });
    assert!(app.current().rows.is_empty());
    assert!(app.search.loading.is_loading());
}

#[test]
fn test_escape_leaves_search() {
    let mut app = loaded_app();
    app.handle_key(key(KeyCode::Char('2')));
    app.handle_key(key(KeyCode::Char('/')));
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.screen, Screen::Search);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.screen, Screen::Tv);
}

// =============================================================================
// Detail Overlay
// =============================================================================

fn show_detail(id: u64) -> TvDetail {
    TvDetail {
        id,
        name: "Show".into(),
        first_air_date: None,
        episode_run_time: vec![],
        number_of_seasons: 2,
        number_of_episodes: 16,
        seasons: vec![
            SeasonSummary {
                season_number: 1,
                episode_count: 8,
                name: Some("Season 1".into()),
                air_date: None,
            },
            SeasonSummary {
                season_number: 2,
                episode_count: 8,
                name: Some("Season 2".into()),
                air_date: None,
            },
        ],
        genres: vec![],
        overview: String::new(),
        vote_average: 0.0,
        vote_count: 0,
        poster_path: None,
        backdrop_path: None,
    }
}

#[test]
fn test_tv_detail_requests_seasons() {
    let mut app = App::default();
    app.switch_screen(Screen::Tv);
    app.take_requests();
    app.apply(Response::Row {
        screen: Screen::Tv,
        row: 0,
        result: Ok(list(70..80, MediaType::Tv)),
    });
    app.take_requests();

    assert!(app.handle_key(key(KeyCode::Enter)));
    assert_eq!(
        app.take_requests(),
        vec![Request::LoadDetail {
            media_type: MediaType::Tv,
            id: 70,
        }]
    );

    app.apply(Response::Detail {
        id: 70,
        result: Ok(DetailRecord::Tv(show_detail(70))),
    });
    assert_eq!(
        app.take_requests(),
        vec![Request::LoadSeasons {
            id: 70,
            seasons: vec![1, 2],
        }]
    );
    let detail = app.detail.as_ref().unwrap();
    assert!(detail.loading.is_loading());
    assert_eq!(detail.record.as_ref().map(|r| r.runtime_label()), Some("00 min".to_string()));
}

#[test]
fn test_detail_for_other_id_ignored_and_escape_closes() {
    let mut app = loaded_app();
    app.handle_key(key(KeyCode::Enter));
    app.take_requests();

    app.apply(Response::Detail {
        id: 999,
        result: Err(CatalogError::NotFound),
    });
    let detail = app.detail.as_ref().unwrap();
    assert!(detail.record.is_none());
    assert!(detail.loading.is_loading());

    // Paging keys do nothing while the overlay is open
    assert!(!app.handle_key(key(KeyCode::Char('>'))));

    app.handle_key(key(KeyCode::Esc));
    assert!(app.detail.is_none());
    assert_eq!(app.screen, Screen::Movies);
}

#[test]
fn test_quit_keys() {
    let mut app = App::default();
    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.running);

    let mut app = App::default();
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(!app.running);
}
