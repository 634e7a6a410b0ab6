//! Data structures and types for cinerow
//!
//! Shared models used across the application, organized by domain:
//! - **Catalog**: list items, categories, paged item lists
//! - **Detail**: movie and TV detail records, seasons, episodes
//! - **Media**: trailer videos, genre names, image URLs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base address for TMDB images
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Placeholder shown when an item has no backdrop
pub const FALLBACK_IMAGE_URL: &str =
    "https://assets.brand.microsites.netflix.io/assets/2800a67c-4252-11ec-a9ce-066b49664af6_cm_800w.jpg?v=4";

// =============================================================================
// Catalog Models
// =============================================================================

/// Media kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by TMDB endpoints
    pub fn path(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Parse the `media_type` tag of a multi-search result
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

/// Catalog row a list query is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NowPlaying,
    PopularMovies,
    TopRatedMovies,
    Upcoming,
    AiringToday,
    PopularTv,
    TopRatedTv,
}

impl Category {
    /// Movie rows in display order
    pub const MOVIES: [Category; 4] = [
        Category::NowPlaying,
        Category::PopularMovies,
        Category::Upcoming,
        Category::TopRatedMovies,
    ];

    /// TV rows in display order
    pub const TV: [Category; 3] = [
        Category::AiringToday,
        Category::PopularTv,
        Category::TopRatedTv,
    ];

    /// Media kind of every item in this row
    pub fn media_type(&self) -> MediaType {
        match self {
            Category::NowPlaying
            | Category::PopularMovies
            | Category::TopRatedMovies
            | Category::Upcoming => MediaType::Movie,
            Category::AiringToday | Category::PopularTv | Category::TopRatedTv => MediaType::Tv,
        }
    }

    /// Endpoint path, e.g. `/movie/now_playing`
    pub fn endpoint(&self) -> String {
        let list = match self {
            Category::NowPlaying => "now_playing",
            Category::PopularMovies | Category::PopularTv => "popular",
            Category::TopRatedMovies | Category::TopRatedTv => "top_rated",
            Category::Upcoming => "upcoming",
            Category::AiringToday => "airing_today",
        };
        format!("/{}/{}", self.media_type().path(), list)
    }

    /// Row heading
    pub fn title(&self) -> &'static str {
        match self {
            Category::NowPlaying => "Now Playing Movies",
            Category::PopularMovies => "Popular Movies",
            Category::TopRatedMovies => "Top Rated Movies",
            Category::Upcoming => "Upcoming Movies",
            Category::AiringToday => "Airing Today",
            Category::PopularTv => "Popular TV Shows",
            Category::TopRatedTv => "Top Rated TV Shows",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A single catalog entry (movie or show) with display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    /// Release date for movies, first air date for shows
    pub date: Option<String>,
    pub genre_ids: Vec<u32>,
    pub overview: String,
    pub popularity: f32,
    pub vote_average: f32,
    pub vote_count: u32,
}

impl Item {
    /// Year part of the release/air date
    pub fn year(&self) -> Option<u16> {
        self.date.as_deref().and_then(extract_year)
    }

    /// Genre names resolved from the static genre table
    pub fn genre_names(&self) -> Vec<&'static str> {
        self.genre_ids.iter().filter_map(|&id| genre_name(id)).collect()
    }

    /// Backdrop URL, or the placeholder when the item has none
    pub fn backdrop_url(&self, size: &str) -> String {
        self.backdrop_path
            .as_deref()
            .map(|p| image_url(p, size))
            .unwrap_or_else(|| FALLBACK_IMAGE_URL.to_string())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.media_type)
    }
}

/// Ordered result of a list or search query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub items: Vec<Item>,
}

impl ItemList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split a mixed search result into (movies, shows), keeping order
    pub fn partition_by_kind(self) -> (Vec<Item>, Vec<Item>) {
        self.items
            .into_iter()
            .partition(|i| i.media_type == MediaType::Movie)
    }
}

// =============================================================================
// Detail Models
// =============================================================================

/// Summary of a TV season inside a show's detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    pub episode_count: u32,
    pub name: Option<String>,
    pub air_date: Option<String>,
}

impl fmt::Display for SeasonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("Season");
        let air = self.air_date.as_deref().unwrap_or("coming soon");
        write!(f, "{} ({} episodes, {})", name, self.episode_count, air)
    }
}

/// Detailed movie information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub tagline: Option<String>,
    pub overview: String,
    pub vote_average: f32,
    pub vote_count: u32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// Detailed TV show information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvDetail {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub episode_run_time: Vec<u32>,
    pub number_of_seasons: u32,
    pub number_of_episodes: u32,
    pub seasons: Vec<SeasonSummary>,
    pub genres: Vec<String>,
    pub overview: String,
    pub vote_average: f32,
    pub vote_count: u32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl TvDetail {
    /// Season numbers in the order TMDB lists them
    pub fn season_numbers(&self) -> Vec<u32> {
        self.seasons.iter().map(|s| s.season_number).collect()
    }
}

/// Per-item detail record, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum DetailRecord {
    Movie(MovieDetail),
    Tv(TvDetail),
}

impl DetailRecord {
    pub fn id(&self) -> u64 {
        match self {
            DetailRecord::Movie(m) => m.id,
            DetailRecord::Tv(t) => t.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            DetailRecord::Movie(m) => &m.title,
            DetailRecord::Tv(t) => &t.name,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            DetailRecord::Movie(_) => MediaType::Movie,
            DetailRecord::Tv(_) => MediaType::Tv,
        }
    }

    /// Running time in minutes: movie runtime, or the first episode run time
    pub fn runtime_minutes(&self) -> Option<u32> {
        match self {
            DetailRecord::Movie(m) => m.runtime.filter(|&r| r > 0),
            DetailRecord::Tv(t) => t.episode_run_time.first().copied(),
        }
    }

    /// Runtime label, `00` when unknown
    pub fn runtime_label(&self) -> String {
        match self.runtime_minutes() {
            Some(mins) => format!("{} min", mins),
            None => "00 min".to_string(),
        }
    }
}

impl fmt::Display for DetailRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailRecord::Movie(m) => write!(
                f,
                "{} - {} - ⭐ {:.1}",
                m.title,
                self.runtime_label(),
                m.vote_average
            ),
            DetailRecord::Tv(t) => write!(
                f,
                "{} - {} seasons, {} episodes - ⭐ {:.1}",
                t.name, t.number_of_seasons, t.number_of_episodes, t.vote_average
            ),
        }
    }
}

/// TV episode information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    pub name: String,
    pub air_date: Option<String>,
    pub overview: String,
    pub runtime: Option<u32>,
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02} - {}", self.season, self.episode, self.name)
    }
}

/// Full listing of one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetail {
    pub season_number: u32,
    pub name: String,
    pub air_date: Option<String>,
    pub episodes: Vec<Episode>,
}

// =============================================================================
// Media Models
// =============================================================================

/// Trailer/teaser attached to a movie or show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    pub kind: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
            && (self.kind == "Trailer" || self.name.contains("예고편"))
    }

    /// Watch URL for YouTube-hosted videos
    pub fn url(&self) -> Option<String> {
        self.site
            .eq_ignore_ascii_case("youtube")
            .then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

/// Pick the trailer shown in the hero banner
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    videos.iter().find(|v| v.is_youtube_trailer())
}

/// Build an image URL; size is a TMDB size token like `w500` or `original`
pub fn image_url(path: &str, size: &str) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, size, path)
}

/// TMDB genre ids shared by movies and shows
const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
    (10759, "Action & Adventure"),
    (10762, "Kids"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
];

/// Look up a genre name by TMDB id
pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|(g, _)| *g == id).map(|(_, name)| *name)
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, kind: MediaType) -> Item {
        Item {
            id,
            media_type: kind,
            title: format!("Item {}", id),
            backdrop_path: None,
            poster_path: None,
            date: Some("2022-03-04".to_string()),
            genre_ids: vec![28, 9999, 18],
            overview: String::new(),
            popularity: 1.0,
            vote_average: 7.5,
            vote_count: 10,
        }
    }

    #[test]
    fn test_media_type_serde() {
        let json = serde_json::to_string(&MediaType::Tv).unwrap();
        assert_eq!(json, "\"tv\"");
        let parsed: MediaType = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(parsed, MediaType::Movie);
    }

    #[test]
    fn test_media_type_from_tag_filters_person() {
        assert_eq!(MediaType::from_tag("movie"), Some(MediaType::Movie));
        assert_eq!(MediaType::from_tag("tv"), Some(MediaType::Tv));
        assert_eq!(MediaType::from_tag("person"), None);
    }

    #[test]
    fn test_category_endpoints() {
        assert_eq!(Category::NowPlaying.endpoint(), "/movie/now_playing");
        assert_eq!(Category::PopularTv.endpoint(), "/tv/popular");
        assert_eq!(Category::TopRatedMovies.endpoint(), "/movie/top_rated");
        assert_eq!(Category::AiringToday.endpoint(), "/tv/airing_today");
    }

    #[test]
    fn test_category_rows_share_kind() {
        assert!(Category::MOVIES.iter().all(|c| c.media_type() == MediaType::Movie));
        assert!(Category::TV.iter().all(|c| c.media_type() == MediaType::Tv));
    }

    #[test]
    fn test_item_display_with_year() {
        assert_eq!(item(1, MediaType::Movie).to_string(), "Item 1 (2022) [Movie]");
    }

    #[test]
    fn test_item_genre_names_skip_unknown() {
        assert_eq!(item(1, MediaType::Movie).genre_names(), vec!["Action", "Drama"]);
    }

    #[test]
    fn test_backdrop_url_fallback() {
        let mut it = item(1, MediaType::Movie);
        assert_eq!(it.backdrop_url("w500"), FALLBACK_IMAGE_URL);
        it.backdrop_path = Some("/abc.jpg".to_string());
        assert_eq!(it.backdrop_url("w500"), "https://image.tmdb.org/t/p/w500/abc.jpg");
    }

    #[test]
    fn test_partition_by_kind_keeps_order() {
        let list = ItemList {
            items: vec![
                item(1, MediaType::Movie),
                item(2, MediaType::Tv),
                item(3, MediaType::Movie),
            ],
            ..Default::default()
        };
        let (movies, shows) = list.partition_by_kind();
        assert_eq!(movies.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(shows.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_runtime_label() {
        let movie = DetailRecord::Movie(MovieDetail {
            id: 1,
            title: "M".into(),
            release_date: None,
            runtime: Some(0),
            genres: vec![],
            tagline: None,
            overview: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            poster_path: None,
            backdrop_path: None,
        });
        assert_eq!(movie.runtime_label(), "00 min");

        let show = DetailRecord::Tv(TvDetail {
            id: 2,
            name: "S".into(),
            first_air_date: None,
            episode_run_time: vec![45, 50],
            number_of_seasons: 1,
            number_of_episodes: 8,
            seasons: vec![],
            genres: vec![],
            overview: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            poster_path: None,
            backdrop_path: None,
        });
        assert_eq!(show.runtime_label(), "45 min");
        assert_eq!(show.media_type(), MediaType::Tv);
    }

    #[test]
    fn test_pick_trailer() {
        let videos = vec![
            Video {
                key: "a".into(),
                name: "Behind the scenes".into(),
                site: "YouTube".into(),
                kind: "Featurette".into(),
            },
            Video {
                key: "b".into(),
                name: "메인 예고편".into(),
                site: "YouTube".into(),
                kind: "Teaser".into(),
            },
        ];
        let trailer = pick_trailer(&videos).unwrap();
        assert_eq!(trailer.key, "b");
        assert_eq!(trailer.url().unwrap(), "https://www.youtube.com/watch?v=b");
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2022-03-04"), Some(2022));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("abc"), None);
    }
}
