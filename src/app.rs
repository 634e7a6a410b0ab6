//! App state and core application logic
//!
//! Owns one carousel per catalog row, turns key presses into navigation
//! intents, and drives slide animations. Network work never happens here:
//! key handling queues [`Request`]s which the event loop runs, feeding the
//! outcome back through [`App::apply`].

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::tmdb::{CatalogError, MIN_KEYWORD_LEN};
use crate::carousel::{Carousel, CarouselView, Direction, DEFAULT_PAGE_SIZE};
use crate::config::Config;
use crate::models::*;

// =============================================================================
// Screens and Modes
// =============================================================================

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Movie rows with hero banner
    #[default]
    Movies,
    /// TV rows with hero banner
    Tv,
    /// Search results split by kind
    Search,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Movies => "MOVIES",
            Screen::Tv => "TV SHOWS",
            Screen::Search => "SEARCH",
        }
    }

    /// Catalog rows shown on this screen
    fn categories(&self) -> &'static [Category] {
        match self {
            Screen::Movies => &Category::MOVIES,
            Screen::Tv => &Category::TV,
            Screen::Search => &[],
        }
    }
}

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Data unavailable, with the reason
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    /// Failure state for a catalog error. Outages read as "data unavailable";
    /// configuration problems keep their own message.
    pub fn failed(err: &CatalogError) -> Self {
        if err.is_unavailable() {
            LoadingState::Error(format!("Data unavailable: {}", err))
        } else {
            LoadingState::Error(err.to_string())
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Viewport and Animation
// =============================================================================

/// Terminal size, supplied by the event loop on start and on resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// In-flight slide of one carousel row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideAnimation {
    pub started: Instant,
    pub duration: Duration,
    pub direction: Direction,
}

impl SlideAnimation {
    pub fn new(started: Instant, duration: Duration, direction: Direction) -> Self {
        Self {
            started,
            duration,
            direction,
        }
    }

    /// Fraction done in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Horizontal shift of the incoming page at `now`
    pub fn shift(&self, now: Instant, viewport_width: u16) -> i32 {
        let remaining = 1.0 - self.progress(now);
        (self.direction.sign() as f32 * f32::from(viewport_width) * remaining).round() as i32
    }
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move selection up
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Rows, Banner, Detail, Search
// =============================================================================

/// Where a row's items come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    Category(Category),
    SearchMovies,
    SearchTv,
}

/// One carousel row on a screen
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub source: RowSource,
    pub title: String,
    pub carousel: Carousel<Item>,
    pub loading: LoadingState,
    /// Selected card inside the visible window
    pub selected: usize,
    pub animation: Option<SlideAnimation>,
}

impl CatalogRow {
    fn new(source: RowSource, title: impl Into<String>, carousel: Carousel<Item>) -> Self {
        Self {
            source,
            title: title.into(),
            carousel,
            loading: LoadingState::Idle,
            selected: 0,
            animation: None,
        }
    }

    /// Card under the cursor
    pub fn selected_item(&self) -> Option<&Item> {
        self.carousel.current_window().get(self.selected)
    }

    fn set_items(&mut self, items: Vec<Item>) {
        self.carousel.set_items(items);
        self.selected = 0;
        self.animation = None;
        self.loading = LoadingState::Idle;
    }
}

/// Hero banner item and its trailer
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub item: Item,
    pub trailer: Option<Video>,
}

/// Per-screen state
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub rows: Vec<CatalogRow>,
    pub focused_row: usize,
    pub banner: Option<Banner>,
    /// Rows have been requested at least once
    pub started: bool,
}

impl ScreenState {
    pub fn focused(&self) -> Option<&CatalogRow> {
        self.rows.get(self.focused_row)
    }

    fn focused_mut(&mut self) -> Option<&mut CatalogRow> {
        self.rows.get_mut(self.focused_row)
    }
}

/// Detail overlay state
#[derive(Debug, Clone)]
pub struct DetailState {
    /// The card that was opened
    pub item: Item,
    pub record: Option<DetailRecord>,
    pub seasons: Vec<SeasonDetail>,
    pub season_list: ListState,
    pub loading: LoadingState,
}

impl DetailState {
    fn new(item: Item) -> Self {
        Self {
            item,
            record: None,
            seasons: Vec::new(),
            season_list: ListState::new(0),
            loading: LoadingState::Loading(Some("Loading details...".into())),
        }
    }

    /// Episodes of the season under the cursor
    pub fn selected_season(&self) -> Option<&SeasonDetail> {
        self.seasons.get(self.season_list.selected)
    }
}

/// Search input state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in query (in chars)
    pub cursor: usize,
    /// Last keyword sent to the catalog
    pub submitted: Option<String>,
    pub loading: LoadingState,
}

impl SearchState {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.query.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.query.remove(idx);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.query.remove(idx);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear query
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }
}

// =============================================================================
// Requests and Responses
// =============================================================================

/// Catalog work queued by the app for the event loop
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadRow {
        screen: Screen,
        row: usize,
        category: Category,
    },
    Search {
        keyword: String,
    },
    LoadDetail {
        media_type: MediaType,
        id: u64,
    },
    LoadSeasons {
        id: u64,
        seasons: Vec<u32>,
    },
    LoadBannerVideos {
        screen: Screen,
        media_type: MediaType,
        id: u64,
    },
}

/// Outcome of a [`Request`]
#[derive(Debug)]
pub enum Response {
    Row {
        screen: Screen,
        row: usize,
        result: Result<ItemList, CatalogError>,
    },
    Search {
        keyword: String,
        result: Result<ItemList, CatalogError>,
    },
    Detail {
        id: u64,
        result: Result<DetailRecord, CatalogError>,
    },
    Seasons {
        id: u64,
        result: Result<Vec<SeasonDetail>, CatalogError>,
    },
    BannerVideos {
        screen: Screen,
        id: u64,
        result: Result<Vec<Video>, CatalogError>,
    },
}

// =============================================================================
// Settings
// =============================================================================

/// Carousel and animation settings taken from config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppSettings {
    pub page_size: usize,
    pub transition: Duration,
    pub transition_timeout: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            transition: Duration::from_millis(1000),
            transition_timeout: None,
        }
    }
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size(),
            transition: config.transition(),
            transition_timeout: config.transition_timeout(),
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Global error message
    pub error: Option<String>,
    pub viewport: Viewport,
    pub settings: AppSettings,

    pub movies: ScreenState,
    pub tv: ScreenState,
    pub search_results: ScreenState,
    pub search: SearchState,
    pub detail: Option<DetailState>,

    /// Screen to return to when search is closed
    previous_screen: Screen,
    pending: Vec<Request>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl App {
    /// Create a new App instance
    pub fn new(settings: AppSettings) -> Self {
        Self {
            screen: Screen::Movies,
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            viewport: Viewport::default(),
            settings,
            movies: ScreenState::default(),
            tv: ScreenState::default(),
            search_results: ScreenState::default(),
            search: SearchState::default(),
            detail: None,
            previous_screen: Screen::Movies,
            pending: Vec::new(),
        }
    }

    /// Queue the initial rows of the start screen
    pub fn start(&mut self) {
        self.ensure_loaded(self.screen);
    }

    /// Drain queued catalog requests
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.pending)
    }

    pub fn screen_state(&self, screen: Screen) -> &ScreenState {
        match screen {
            Screen::Movies => &self.movies,
            Screen::Tv => &self.tv,
            Screen::Search => &self.search_results,
        }
    }

    fn screen_state_mut(&mut self, screen: Screen) -> &mut ScreenState {
        match screen {
            Screen::Movies => &mut self.movies,
            Screen::Tv => &mut self.tv,
            Screen::Search => &mut self.search_results,
        }
    }

    /// State of the screen on display
    pub fn current(&self) -> &ScreenState {
        self.screen_state(self.screen)
    }

    fn new_carousel(&self) -> Carousel<Item> {
        let carousel = Carousel::default().with_page_size(self.settings.page_size);
        match self.settings.transition_timeout {
            Some(timeout) => carousel.with_timeout(timeout),
            None => carousel,
        }
    }

    /// Build rows for a category screen and request them once
    fn ensure_loaded(&mut self, screen: Screen) {
        if self.screen_state(screen).started || screen == Screen::Search {
            return;
        }

        let rows: Vec<CatalogRow> = screen
            .categories()
            .iter()
            .map(|&c| CatalogRow::new(RowSource::Category(c), c.title(), self.new_carousel()))
            .collect();

        let state = self.screen_state_mut(screen);
        state.rows = rows;
        state.started = true;

        for row in 0..state.rows.len() {
            self.request_row(screen, row);
        }
    }

    fn request_row(&mut self, screen: Screen, row: usize) {
        let Some(target) = self.screen_state_mut(screen).rows.get_mut(row) else {
            return;
        };
        let RowSource::Category(category) = target.source else {
            return;
        };
        target.loading = LoadingState::Loading(Some("Loading...".into()));
        self.pending.push(Request::LoadRow {
            screen,
            row,
            category,
        });
    }

    /// Switch screens, loading rows on first visit
    pub fn switch_screen(&mut self, screen: Screen) {
        if screen != Screen::Search {
            self.previous_screen = screen;
        }
        self.screen = screen;
        self.detail = None;
        self.ensure_loaded(screen);
    }

    /// Terminal was resized
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    // -------------------------------------------------------------------------
    // Carousel Navigation
    // -------------------------------------------------------------------------

    /// Page the focused row forward
    pub fn next_page(&mut self) -> bool {
        self.page(Direction::Forward)
    }

    /// Page the focused row backward
    pub fn previous_page(&mut self) -> bool {
        self.page(Direction::Backward)
    }

    fn page(&mut self, direction: Direction) -> bool {
        let duration = self.settings.transition;
        let screen = self.screen;
        let Some(row) = self.screen_state_mut(screen).focused_mut() else {
            return false;
        };

        let view: Option<CarouselView<'_, Item>> = match direction {
            Direction::Forward => row.carousel.next(),
            Direction::Backward => row.carousel.previous(),
        };
        let Some(view) = view else {
            return false;
        };
        let window_len = view.visible_items.len();

        row.selected = match direction {
            Direction::Forward => 0,
            Direction::Backward => window_len.saturating_sub(1),
        };
        row.animation = Some(SlideAnimation::new(Instant::now(), duration, direction));
        true
    }

    /// Move the card cursor; stepping off either edge pages the row
    fn move_card(&mut self, direction: Direction) -> bool {
        let screen = self.screen;
        let Some(row) = self.screen_state_mut(screen).focused_mut() else {
            return false;
        };
        let window_len = row.carousel.current_window().len();
        match direction {
            Direction::Forward if row.selected + 1 < window_len => {
                row.selected += 1;
                true
            }
            Direction::Backward if row.selected > 0 => {
                row.selected -= 1;
                true
            }
            _ => self.page(direction),
        }
    }

    fn move_row(&mut self, down: bool) {
        let screen = self.screen;
        let state = self.screen_state_mut(screen);
        if state.rows.is_empty() {
            return;
        }
        if down {
            state.focused_row = (state.focused_row + 1).min(state.rows.len() - 1);
        } else {
            state.focused_row = state.focused_row.saturating_sub(1);
        }
    }

    /// Advance animations; completed slides release their carousel lock
    pub fn tick(&mut self, now: Instant) {
        for screen in [Screen::Movies, Screen::Tv, Screen::Search] {
            for row in &mut self.screen_state_mut(screen).rows {
                if row.animation.is_some_and(|a| a.is_finished(now)) {
                    row.animation = None;
                    row.carousel.on_transition_complete();
                }
                if row.carousel.expire(now).is_some() {
                    row.animation = None;
                }
            }
        }
    }

    /// Whether any slide is still running
    pub fn is_animating(&self) -> bool {
        [&self.movies, &self.tv, &self.search_results]
            .iter()
            .any(|s| s.rows.iter().any(|r| r.animation.is_some()))
    }

    // -------------------------------------------------------------------------
    // Detail and Search
    // -------------------------------------------------------------------------

    /// Open the detail overlay for the focused card
    pub fn open_detail(&mut self) -> bool {
        let Some(item) = self.current().focused().and_then(|r| r.selected_item()).cloned() else {
            return false;
        };
        self.pending.push(Request::LoadDetail {
            media_type: item.media_type,
            id: item.id,
        });
        self.detail = Some(DetailState::new(item));
        true
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
        if self.screen != Screen::Search {
            self.switch_screen(Screen::Search);
        }
    }

    /// Submit the current query
    pub fn submit_search(&mut self) -> bool {
        let keyword = self.search.query.trim().to_string();
        if keyword.chars().count() < MIN_KEYWORD_LEN {
            self.set_error(format!(
                "Search needs at least {} characters",
                MIN_KEYWORD_LEN
            ));
            return false;
        }
        self.input_mode = InputMode::Normal;
        self.search.submitted = Some(keyword.clone());
        self.search.loading = LoadingState::Loading(Some("Searching...".into()));
        self.pending.push(Request::Search { keyword });
        true
    }

    // -------------------------------------------------------------------------
    // Responses
    // -------------------------------------------------------------------------

    /// Apply the outcome of a catalog request
    pub fn apply(&mut self, response: Response) {
        match response {
            Response::Row {
                screen,
                row,
                result,
            } => self.apply_row(screen, row, result),
            Response::Search { keyword, result } => self.apply_search(keyword, result),
            Response::Detail { id, result } => self.apply_detail(id, result),
            Response::Seasons { id, result } => {
                let Some(detail) = self.detail.as_mut().filter(|d| d.item.id == id) else {
                    return;
                };
                match result {
                    Ok(seasons) => {
                        detail.season_list.set_len(seasons.len());
                        detail.seasons = seasons;
                        detail.loading = LoadingState::Idle;
                    }
                    Err(e) => {
                        tracing::warn!(id, error = %e, "season listing unavailable");
                        detail.loading = LoadingState::failed(&e);
                    }
                }
            }
            Response::BannerVideos { screen, id, result } => {
                let state = self.screen_state_mut(screen);
                let Some(banner) = state.banner.as_mut().filter(|b| b.item.id == id) else {
                    return;
                };
                match result {
                    Ok(videos) => banner.trailer = pick_trailer(&videos).cloned(),
                    Err(e) => tracing::debug!(id, error = %e, "no banner videos"),
                }
            }
        }
    }

    fn apply_row(&mut self, screen: Screen, row: usize, result: Result<ItemList, CatalogError>) {
        let Some(target) = self.screen_state_mut(screen).rows.get_mut(row) else {
            return;
        };
        match result {
            Ok(list) => {
                tracing::debug!(?screen, row, items = list.len(), "row loaded");
                target.set_items(list.items);
                if row == 0 {
                    self.pick_banner(screen);
                }
            }
            Err(e) => {
                tracing::warn!(?screen, row, error = %e, "row unavailable");
                target.loading = LoadingState::failed(&e);
            }
        }
    }

    fn apply_search(&mut self, keyword: String, result: Result<ItemList, CatalogError>) {
        if self.search.submitted.as_deref() != Some(keyword.as_str()) {
            tracing::debug!(%keyword, "dropping stale search response");
            return;
        }
        match result {
            Ok(list) => {
                self.search.loading = LoadingState::Idle;
                let (movies, shows) = list.partition_by_kind();
                let mut movie_row =
                    CatalogRow::new(RowSource::SearchMovies, "Movie Results", self.new_carousel());
                movie_row.set_items(movies);
                let mut tv_row =
                    CatalogRow::new(RowSource::SearchTv, "TV Results", self.new_carousel());
                tv_row.set_items(shows);

                let state = &mut self.search_results;
                state.rows = vec![movie_row, tv_row];
                state.focused_row = 0;
                state.started = true;
            }
            Err(e) => {
                tracing::warn!(%keyword, error = %e, "search unavailable");
                self.search.loading = LoadingState::failed(&e);
            }
        }
    }

    fn apply_detail(&mut self, id: u64, result: Result<DetailRecord, CatalogError>) {
        let Some(detail) = self.detail.as_mut().filter(|d| d.item.id == id) else {
            return;
        };
        match result {
            Ok(record) => {
                if let DetailRecord::Tv(tv) = &record {
                    let seasons = tv.season_numbers();
                    if !seasons.is_empty() {
                        detail.loading = LoadingState::Loading(Some("Loading episodes...".into()));
                        self.pending.push(Request::LoadSeasons { id, seasons });
                    } else {
                        detail.loading = LoadingState::Idle;
                    }
                } else {
                    detail.loading = LoadingState::Idle;
                }
                detail.record = Some(record);
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "detail unavailable");
                detail.loading = LoadingState::failed(&e);
            }
        }
    }

    /// Pick a random banner from the screen's first row
    fn pick_banner(&mut self, screen: Screen) {
        let state = self.screen_state_mut(screen);
        let Some(items) = state.rows.first().map(|r| r.carousel.items()) else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let item = items[random_index(items.len())].clone();
        let request = Request::LoadBannerVideos {
            screen,
            media_type: item.media_type,
            id: item.id,
        };
        state.banner = Some(Banner {
            item,
            trailer: None,
        });
        self.pending.push(request);
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear error on any keypress
        self.error = None;

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else if self.detail.is_some() {
            self.handle_detail_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Enter => self.submit_search(),
            KeyCode::Char(c) => {
                self.search.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.search.backspace();
                true
            }
            KeyCode::Delete => {
                self.search.delete();
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        let Some(detail) = self.detail.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                self.close_detail();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                detail.season_list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                detail.season_list.down();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                true
            }
            KeyCode::Char('1') => {
                self.switch_screen(Screen::Movies);
                true
            }
            KeyCode::Char('2') => {
                self.switch_screen(Screen::Tv);
                true
            }
            KeyCode::Esc if self.screen == Screen::Search => {
                let back = self.previous_screen;
                self.switch_screen(back);
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_row(false);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_row(true);
                true
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_card(Direction::Backward),
            KeyCode::Right | KeyCode::Char('l') => self.move_card(Direction::Forward),
            KeyCode::Char('<') | KeyCode::Char(',') | KeyCode::PageUp => self.previous_page(),
            KeyCode::Char('>') | KeyCode::Char('.') | KeyCode::PageDown => self.next_page(),
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('r') => self.retry_focused(),
            _ => false,
        }
    }

    /// Re-request the focused row if it failed
    pub fn retry_focused(&mut self) -> bool {
        let screen = self.screen;
        let state = self.screen_state(screen);
        let row = state.focused_row;
        if !state.focused().is_some_and(|r| r.loading.is_error()) {
            return false;
        }
        self.request_row(screen, row);
        true
    }
}

/// Time-seeded index, good enough for picking a banner
fn random_index(len: usize) -> usize {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as usize)
        .unwrap_or(0);
    seed % len.max(1)
}
