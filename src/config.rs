//! Configuration management for cinerow
//!
//! Handles config file loading and API key lookup.
//! Config is stored at ~/.config/cinerow/config.toml

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{CatalogClient, CatalogError};
use crate::carousel::DEFAULT_PAGE_SIZE;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

const DEFAULT_LANGUAGE: &str = "ko";
const DEFAULT_REGION: &str = "KR";
const DEFAULT_TRANSITION_MS: u64 = 1000;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// TMDB v3 API key
    pub tmdb_api_key: Option<String>,
    /// Override for the TMDB base URL
    pub base_url: Option<String>,
    /// Response language, e.g. "ko" or "en-US"
    pub language: Option<String>,
    /// Region filter for list queries, e.g. "KR"
    pub region: Option<String>,
    /// Cards per carousel page
    pub page_size: Option<usize>,
    /// Slide animation length in milliseconds
    pub transition_ms: Option<u64>,
    /// Release a carousel lock held longer than this (milliseconds)
    pub transition_timeout_ms: Option<u64>,
    /// tracing filter directive, e.g. "info" or "cinerow=debug"
    pub log_level: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/cinerow/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cinerow").join("config.toml"))
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|p| p.join("cinerow").join("cinerow.log"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(p) => Self::load_from(&p),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file yields the default;
    /// an unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse TOML config text
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Get TMDB API key with fallback chain:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.tmdb_api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Region, with an empty string meaning "no region filter"
    pub fn region(&self) -> Option<&str> {
        match self.region.as_deref() {
            Some("") => None,
            Some(r) => Some(r),
            None => Some(DEFAULT_REGION),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size.filter(|&n| n > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms.unwrap_or(DEFAULT_TRANSITION_MS))
    }

    pub fn transition_timeout(&self) -> Option<Duration> {
        self.transition_timeout_ms.map(Duration::from_millis)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Build a catalog client from this config
    pub fn catalog_client(&self) -> Result<CatalogClient, CatalogError> {
        let key = self.api_key().ok_or(CatalogError::MissingApiKey)?;
        let client = match &self.base_url {
            Some(url) => CatalogClient::with_base_url(key, url.clone()),
            None => CatalogClient::new(key),
        };
        Ok(client
            .with_language(self.language())
            .with_region(self.region().map(String::from)))
    }
}
