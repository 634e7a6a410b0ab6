//! CLI - Command Line Interface for cinerow
//!
//! Every catalog query the TUI makes is scriptable. Output is JSON when
//! `--json` is passed or stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! # Browse a category
//! cinerow list now-playing --limit 10
//!
//! # Search and inspect
//! cinerow search "parasite" --media-type movie
//! cinerow info 496243 --media-type movie
//! cinerow seasons 1399 1 2 --json
//!
//! # Show the third page of a carousel row
//! cinerow window popular-tv --page-size 6 --page 2
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::CatalogError;
use crate::models::{Category, MediaType};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error or catalog unavailable
    NetworkError = 3,
    /// Title not found
    NotFound = 4,
    /// No API key configured
    MissingApiKey = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

impl From<&CatalogError> for ExitCode {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::NotFound => ExitCode::NotFound,
            CatalogError::MissingApiKey => ExitCode::MissingApiKey,
            CatalogError::InvalidQuery(_) => ExitCode::InvalidArgs,
            _ => ExitCode::NetworkError,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// cinerow - browse movie and TV catalogs from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "cinerow",
    version,
    about = "Browse movie and TV catalogs from the terminal",
    long_about = "Paged carousel rows of now-playing, popular, upcoming and \
                  top-rated titles, with search and detail views.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  cinerow                               Launch interactive TUI\n\
                  cinerow list popular-movies           List a category\n\
                  cinerow search \"dune\" -t movie        Search the catalog\n\
                  cinerow window top-rated-tv --page 1  Show a carousel page"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Response language (e.g. "ko", "en-US")
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Region filter for lists (e.g. "KR"); empty disables it
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List one catalog category
    #[command(visible_alias = "ls")]
    List(ListCmd),

    /// Search for movies and TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Get details for a movie or show
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Get episode listings for seasons of a show
    Seasons(SeasonsCmd),

    /// List videos (trailers, teasers) for a title
    Videos(VideosCmd),

    /// Show one page of a category as a carousel window
    #[command(visible_alias = "w")]
    Window(WindowCmd),
}

/// Catalog category names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryArg {
    /// Movies in theaters
    NowPlaying,
    /// Popular movies
    PopularMovies,
    /// Top-rated movies
    TopRatedMovies,
    /// Upcoming movies
    Upcoming,
    /// Shows airing today
    AiringToday,
    /// Popular shows
    PopularTv,
    /// Top-rated shows
    TopRatedTv,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::NowPlaying => Category::NowPlaying,
            CategoryArg::PopularMovies => Category::PopularMovies,
            CategoryArg::TopRatedMovies => Category::TopRatedMovies,
            CategoryArg::Upcoming => Category::Upcoming,
            CategoryArg::AiringToday => Category::AiringToday,
            CategoryArg::PopularTv => Category::PopularTv,
            CategoryArg::TopRatedTv => Category::TopRatedTv,
        }
    }
}

/// Media type filter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeFilter {
    /// Movies only
    Movie,
    /// TV shows only
    Tv,
}

impl From<MediaTypeFilter> for MediaType {
    fn from(filter: MediaTypeFilter) -> Self {
        match filter {
            MediaTypeFilter::Movie => MediaType::Movie,
            MediaTypeFilter::Tv => MediaType::Tv,
        }
    }
}

// =============================================================================
// Command Arguments
// =============================================================================

/// List one catalog category
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Category to list
    #[arg(value_enum)]
    pub category: CategoryArg,

    /// Catalog page (1-based)
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Search for movies and TV shows by keyword
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search keyword (at least 2 characters)
    #[arg(required = true)]
    pub keyword: String,

    /// Filter by media type
    #[arg(long, short = 't', value_enum)]
    pub media_type: Option<MediaTypeFilter>,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Get detailed information about a movie or TV show
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB ID
    #[arg(required = true)]
    pub id: u64,

    /// Kind of title the ID refers to
    #[arg(long, short = 't', value_enum)]
    pub media_type: MediaTypeFilter,
}

/// Get episode listings for seasons of a show
#[derive(Args, Debug)]
pub struct SeasonsCmd {
    /// TMDB show ID
    #[arg(required = true)]
    pub id: u64,

    /// Season numbers, in the order to print them
    #[arg(required = true, num_args = 1..)]
    pub seasons: Vec<u32>,
}

/// List videos for a title
#[derive(Args, Debug)]
pub struct VideosCmd {
    /// TMDB ID
    #[arg(required = true)]
    pub id: u64,

    /// Kind of title the ID refers to
    #[arg(long, short = 't', value_enum)]
    pub media_type: MediaTypeFilter,

    /// Only print the trailer the banner would use
    #[arg(long)]
    pub trailer: bool,
}

/// Show one page of a category as a carousel window
#[derive(Args, Debug)]
pub struct WindowCmd {
    /// Category to load
    #[arg(value_enum)]
    pub category: CategoryArg,

    /// Cards per page (defaults to config `page_size`)
    #[arg(long, short = 's')]
    pub page_size: Option<usize>,

    /// Carousel page to show, reached by stepping forward from page 0
    #[arg(long, short = 'p', default_value = "0")]
    pub page: usize,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }
}

impl JsonOutput<()> {
    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> Self {
        Self {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data; `human` renders it for a terminal
    pub fn print<T: Serialize>(&self, data: T, human: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", human(&data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print a catalog failure with the matching exit code
    pub fn catalog_error(&self, context: &str, err: &CatalogError) -> ExitCode {
        self.error(format!("{}: {}", context, err), ExitCode::from(err))
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
