//! cinerow - movie and TV catalog browser for the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cinerow
//!
//! # CLI mode (for automation)
//! cinerow list now-playing
//! cinerow search "parasite" --json
//! cinerow window popular-tv --page 2
//! ```

use std::fs::{self, OpenOptions};
use std::io::{stdout, Stdout};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use cinerow::api::CatalogClient;
use cinerow::app::{App, AppSettings, Request, Response, Viewport};
use cinerow::cli::{Cli, Command, ExitCode, Output};
use cinerow::commands;
use cinerow::config::Config;
use cinerow::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            let code = Output::new(&cli).error(format!("{:#}", e), ExitCode::Error);
            std::process::exit(code.into());
        }
    };
    init_logging(&config, cli.is_cli_mode());

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    }

    // TUI mode: launch interactive interface
    let client = match config.catalog_client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(ExitCode::MissingApiKey.into());
        }
    };
    run_tui(&config, client).await
}

/// Load config from `--config` or the default path, then apply flag overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(language) = &cli.language {
        config.language = Some(language.clone());
    }
    if let Some(region) = &cli.region {
        config.region = Some(region.clone());
    }
    Ok(config)
}

/// CLI logs go to stderr; the TUI logs to a file so the screen stays clean
fn init_logging(config: &Config, cli_mode: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    if cli_mode {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let file = Config::log_path().and_then(|path| {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    if let Some(file) = file {
        fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::List(cmd)) => commands::list_cmd(cmd, config, &output).await,
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, config, &output).await,
        Some(Command::Info(cmd)) => commands::info_cmd(cmd, config, &output).await,
        Some(Command::Seasons(cmd)) => commands::seasons_cmd(cmd, config, &output).await,
        Some(Command::Videos(cmd)) => commands::videos_cmd(cmd, config, &output).await,
        Some(Command::Window(cmd)) => commands::window_cmd(cmd, config, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: &Config, client: CatalogClient) -> Result<()> {
    let mut terminal = init_terminal()?;

    let mut app = App::new(AppSettings::from(config));
    let size = terminal.size()?;
    app.resize(Viewport {
        width: size.width,
        height: size.height,
    });

    tracing::info!(
        language = client.language(),
        page_size = app.settings.page_size,
        "starting tui"
    );

    let result = run_event_loop(&mut terminal, &mut app, Arc::new(client)).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Run one catalog request to completion
async fn fetch(client: &CatalogClient, request: Request) -> Response {
    match request {
        Request::LoadRow {
            screen,
            row,
            category,
        } => Response::Row {
            screen,
            row,
            result: client.list_by_category(category, None).await,
        },
        Request::Search { keyword } => {
            let result = client.search_multi(&keyword).await;
            Response::Search { keyword, result }
        }
        Request::LoadDetail { media_type, id } => Response::Detail {
            id,
            result: client.get_detail(media_type, id).await,
        },
        Request::LoadSeasons { id, seasons } => Response::Seasons {
            id,
            result: client.season_details(id, &seasons).await,
        },
        Request::LoadBannerVideos {
            screen,
            media_type,
            id,
        } => Response::BannerVideos {
            screen,
            id,
            result: client.videos(media_type, id).await,
        },
    }
}

/// Spawn queued requests; responses come back over `tx`
fn dispatch(app: &mut App, client: &Arc<CatalogClient>, tx: &mpsc::UnboundedSender<Response>) {
    for request in app.take_requests() {
        let client = Arc::clone(client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = fetch(&client, request).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(response);
        });
    }
}

/// Main event loop - handles input, updates state, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: Arc<CatalogClient>) -> Result<()> {
    const IDLE_TICK: Duration = Duration::from_millis(100);
    const FRAME_TICK: Duration = Duration::from_millis(16);

    let (tx, mut rx) = mpsc::unbounded_channel();
    app.start();

    while app.running {
        dispatch(app, &client, &tx);

        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| ui::render(frame, app, now))?;

        let tick = if app.is_animating() { FRAME_TICK } else { IDLE_TICK };
        if event::poll(tick)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Resize(width, height) => app.resize(Viewport { width, height }),
                _ => {}
            }
        }

        while let Ok(response) = rx.try_recv() {
            app.apply(response);
        }
    }

    Ok(())
}
