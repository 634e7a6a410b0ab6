//! TMDB (The Movie Database) catalog client
//!
//! Category lists, per-item details, multi-search, season listings and
//! trailer lookups. Every call is a single GET; only HTTP 429 is retried.
//! API docs: https://developer.themoviedb.org/docs

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{
    Category, DetailRecord, Episode, Item, ItemList, MediaType, MovieDetail, SeasonDetail,
    SeasonSummary, TvDetail, Video,
};

/// Default TMDB v3 address
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Shortest keyword accepted by [`CatalogClient::search_multi`]
pub const MIN_KEYWORD_LEN: usize = 2;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("No TMDB API key configured (set TMDB_API_KEY or tmdb_api_key in config)")]
    MissingApiKey,
}

impl CatalogError {
    /// Whether the render layer should show this as "data unavailable"
    pub fn is_unavailable(&self) -> bool {
        !matches!(
            self,
            CatalogError::InvalidQuery(_) | CatalogError::MissingApiKey
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// TMDB catalog client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api_key: String,
    base_url: String,
    language: String,
    region: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
}

impl CatalogClient {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: "ko".to_string(),
            region: Some("KR".to_string()),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Response language (`language` query parameter)
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Region filter for list and search queries
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Number of attempts on HTTP 429 before giving up
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Build a request URL with credentials and locale appended
    fn url(&self, endpoint: &str, params: &[(&str, String)], regional: bool) -> String {
        let mut url = format!(
            "{}{}?api_key={}&language={}",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language)
        );
        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }
        if regional {
            if let Some(region) = &self.region {
                url.push_str(&format!("&region={}", urlencoding::encode(region)));
            }
        }
        url
    }

    /// GET and decode, retrying on rate limits
    async fn get<T: for<'de> Deserialize<'de>>(&self, url: &str, endpoint: &str) -> Result<T> {
        let mut retries = 0;

        loop {
            tracing::debug!(endpoint, attempt = retries + 1, "catalog request");
            let response = self
                .client
                .get(url)
                .header("Accept", "application/json")
                .send()
                .await?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await?;
                    return serde_json::from_str(&body).map_err(|e| {
                        tracing::warn!(endpoint, error = %e, "catalog response did not parse");
                        CatalogError::InvalidResponse(format!("JSON parse error: {}", e))
                    });
                }
                StatusCode::NOT_FOUND => return Err(CatalogError::NotFound),
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(CatalogError::RateLimited);
                    }

                    // Honor Retry-After, else exponential backoff
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    tracing::warn!(endpoint, wait_secs, retries, "catalog rate limited, retrying");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                }
                status => {
                    tracing::warn!(endpoint, status = status.as_u16(), "catalog request failed");
                    return Err(CatalogError::ServerError(status.as_u16()));
                }
            }
        }
    }

    /// List one catalog row; `page` defaults to the first page
    pub async fn list_by_category(&self, category: Category, page: Option<u32>) -> Result<ItemList> {
        let endpoint = category.endpoint();
        let params = [("page", page.unwrap_or(1).max(1).to_string())];
        let url = self.url(&endpoint, &params, true);
        let response: ListResponse = self.get(&url, &endpoint).await?;
        Ok(response.into_item_list(Some(category.media_type())))
    }

    /// Search movies and shows; persons are dropped
    pub async fn search_multi(&self, keyword: &str) -> Result<ItemList> {
        let keyword = keyword.trim();
        if keyword.chars().count() < MIN_KEYWORD_LEN {
            return Err(CatalogError::InvalidQuery(format!(
                "keyword must be at least {} characters",
                MIN_KEYWORD_LEN
            )));
        }

        let endpoint = "/search/multi";
        let params = [("query", keyword.to_string()), ("page", "1".to_string())];
        let url = self.url(endpoint, &params, true);
        let response: ListResponse = self.get(&url, endpoint).await?;
        Ok(response.into_item_list(None))
    }

    /// Movie details by id
    pub async fn movie_detail(&self, id: u64) -> Result<MovieDetail> {
        let endpoint = format!("/movie/{}", id);
        let url = self.url(&endpoint, &[], false);
        let response: MovieResponse = self.get(&url, &endpoint).await?;
        Ok(response.into_detail())
    }

    /// TV show details by id
    pub async fn tv_detail(&self, id: u64) -> Result<TvDetail> {
        let endpoint = format!("/tv/{}", id);
        let url = self.url(&endpoint, &[], false);
        let response: TvResponse = self.get(&url, &endpoint).await?;
        Ok(response.into_detail())
    }

    /// Details for either kind
    pub async fn get_detail(&self, media_type: MediaType, id: u64) -> Result<DetailRecord> {
        match media_type {
            MediaType::Movie => self.movie_detail(id).await.map(DetailRecord::Movie),
            MediaType::Tv => self.tv_detail(id).await.map(DetailRecord::Tv),
        }
    }

    /// One season listing
    pub async fn season_detail(&self, id: u64, season: u32) -> Result<SeasonDetail> {
        let endpoint = format!("/tv/{}/season/{}", id, season);
        let url = self.url(&endpoint, &[], false);
        let response: SeasonResponse = self.get(&url, &endpoint).await?;
        Ok(response.into_detail(season))
    }

    /// Several seasons fetched concurrently, returned in request order
    pub async fn season_details(&self, id: u64, seasons: &[u32]) -> Result<Vec<SeasonDetail>> {
        let requests = seasons.iter().map(|&s| self.season_detail(id, s));
        futures::future::try_join_all(requests).await
    }

    /// Videos (trailers, teasers) attached to a title
    pub async fn videos(&self, media_type: MediaType, id: u64) -> Result<Vec<Video>> {
        let endpoint = format!("/{}/{}/videos", media_type.path(), id);
        let url = self.url(&endpoint, &[], false);
        let response: VideosResponse = self.get(&url, &endpoint).await?;
        Ok(response.into_videos())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    page: Option<u32>,
    results: Vec<ListItemRaw>,
    total_pages: Option<u32>,
    total_results: Option<u32>,
}

impl ListResponse {
    fn into_item_list(self, kind: Option<MediaType>) -> ItemList {
        ItemList {
            page: self.page.unwrap_or(1),
            total_pages: self.total_pages.unwrap_or(1),
            total_results: self.total_results.unwrap_or(0),
            items: self
                .results
                .into_iter()
                .filter_map(|r| r.into_item(kind))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListItemRaw {
    id: u64,
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    backdrop_path: Option<String>,
    poster_path: Option<String>,
    genre_ids: Option<Vec<u32>>,
    overview: Option<String>,
    popularity: Option<f32>,
    vote_average: Option<f32>,
    vote_count: Option<u32>,
}

impl ListItemRaw {
    /// Tagged results pick their own kind; untagged ones take the row's
    fn into_item(self, row_kind: Option<MediaType>) -> Option<Item> {
        let media_type = match self.media_type.as_deref() {
            Some(tag) => MediaType::from_tag(tag)?,
            None => row_kind?,
        };

        Some(Item {
            id: self.id,
            media_type,
            title: self.title.or(self.name).unwrap_or_default(),
            backdrop_path: non_empty(self.backdrop_path),
            poster_path: non_empty(self.poster_path),
            date: non_empty(self.release_date.or(self.first_air_date)),
            genre_ids: self.genre_ids.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            popularity: self.popularity.unwrap_or(0.0),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
        })
    }
}

#[derive(Debug, Deserialize)]
struct MovieResponse {
    id: u64,
    title: String,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    tagline: Option<String>,
    overview: Option<String>,
    vote_average: Option<f32>,
    vote_count: Option<u32>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

impl MovieResponse {
    fn into_detail(self) -> MovieDetail {
        MovieDetail {
            id: self.id,
            title: self.title,
            release_date: non_empty(self.release_date),
            runtime: self.runtime,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            tagline: non_empty(self.tagline),
            overview: self.overview.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TvResponse {
    id: u64,
    name: String,
    first_air_date: Option<String>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    number_of_seasons: Option<u32>,
    number_of_episodes: Option<u32>,
    #[serde(default)]
    seasons: Vec<SeasonRaw>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    overview: Option<String>,
    vote_average: Option<f32>,
    vote_count: Option<u32>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

impl TvResponse {
    fn into_detail(self) -> TvDetail {
        let seasons: Vec<SeasonSummary> = self.seasons.into_iter().map(|s| s.into_summary()).collect();

        TvDetail {
            id: self.id,
            name: self.name,
            first_air_date: non_empty(self.first_air_date),
            episode_run_time: self.episode_run_time,
            number_of_seasons: self.number_of_seasons.unwrap_or(seasons.len() as u32),
            number_of_episodes: self
                .number_of_episodes
                .unwrap_or_else(|| seasons.iter().map(|s| s.episode_count).sum()),
            seasons,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            overview: self.overview.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeasonRaw {
    season_number: u32,
    #[serde(default)]
    episode_count: u32,
    name: Option<String>,
    air_date: Option<String>,
}

impl SeasonRaw {
    fn into_summary(self) -> SeasonSummary {
        SeasonSummary {
            season_number: self.season_number,
            episode_count: self.episode_count,
            name: self.name,
            air_date: non_empty(self.air_date),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeasonResponse {
    name: Option<String>,
    air_date: Option<String>,
    #[serde(default)]
    episodes: Vec<EpisodeRaw>,
}

impl SeasonResponse {
    fn into_detail(self, season: u32) -> SeasonDetail {
        SeasonDetail {
            season_number: season,
            name: self.name.unwrap_or_else(|| format!("Season {}", season)),
            air_date: non_empty(self.air_date),
            episodes: self
                .episodes
                .into_iter()
                .map(|e| e.into_episode(season))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EpisodeRaw {
    episode_number: u32,
    name: Option<String>,
    air_date: Option<String>,
    overview: Option<String>,
    runtime: Option<u32>,
}

impl EpisodeRaw {
    fn into_episode(self, season: u32) -> Episode {
        Episode {
            season,
            episode: self.episode_number,
            name: self.name.unwrap_or_default(),
            air_date: non_empty(self.air_date),
            overview: self.overview.unwrap_or_default(),
            runtime: self.runtime,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<VideoRaw>,
}

impl VideosResponse {
    fn into_videos(self) -> Vec<Video> {
        self.results
            .into_iter()
            .map(|v| Video {
                key: v.key,
                name: v.name.unwrap_or_default(),
                site: v.site.unwrap_or_default(),
                kind: v.kind.unwrap_or_default(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    key: String,
    name: Option<String>,
    site: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// TMDB sends "" for missing strings in places
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(media_type: Option<&str>) -> ListItemRaw {
        ListItemRaw {
            id: 1,
            media_type: media_type.map(String::from),
            title: None,
            name: Some("Show".to_string()),
            release_date: None,
            first_air_date: Some(String::new()),
            backdrop_path: Some("/b.jpg".to_string()),
            poster_path: None,
            genre_ids: None,
            overview: None,
            popularity: None,
            vote_average: Some(8.0),
            vote_count: None,
        }
    }

    #[test]
    fn test_tagged_item_keeps_own_kind() {
        let item = raw(Some("tv")).into_item(Some(MediaType::Movie)).unwrap();
        assert_eq!(item.media_type, MediaType::Tv);
        assert_eq!(item.title, "Show");
        assert_eq!(item.date, None);
    }

    #[test]
    fn test_person_result_dropped() {
        assert!(raw(Some("person")).into_item(None).is_none());
    }

    #[test]
    fn test_untagged_item_takes_row_kind() {
        let item = raw(None).into_item(Some(MediaType::Movie)).unwrap();
        assert_eq!(item.media_type, MediaType::Movie);
        assert!(raw(None).into_item(None).is_none());
    }

    #[test]
    fn test_url_includes_locale() {
        let client = CatalogClient::with_base_url("k", "http://localhost/")
            .with_language("en-US")
            .with_region(Some("US".into()));
        let url = client.url("/movie/popular", &[("page", "2".into())], true);
        assert_eq!(
            url,
            "http://localhost/movie/popular?api_key=k&language=en-US&page=2&region=US"
        );
        let url = client.url("/movie/1", &[], false);
        assert_eq!(url, "http://localhost/movie/1?api_key=k&language=en-US");
    }

    #[test]
    fn test_error_classification() {
        assert!(CatalogError::NotFound.is_unavailable());
        assert!(CatalogError::ServerError(503).is_unavailable());
        assert!(!CatalogError::MissingApiKey.is_unavailable());
        assert!(!CatalogError::InvalidQuery("x".into()).is_unavailable());
    }
}
