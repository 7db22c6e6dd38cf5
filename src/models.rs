//! Data structures and types for blip
//!
//! Contains the shared models used across the application:
//! - **Movie**: normalized movie card, plus the raw record it is mapped from
//! - **Opinion**: the four reactions a user can record against a movie
//! - **Platform**: streaming services used as a discovery filter

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Base URL for TMDB poster paths (`/abc.jpg`)
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Placeholder used when the backend has no date or runtime
pub const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// Opinion
// =============================================================================

/// A user's categorical reaction to a movie
///
/// Serialized as its integer tag, which is what the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opinion {
    LovedIt = 1,
    DidntLikeIt = 2,
    WantToWatch = 3,
    Pass = 4,
}

impl Opinion {
    pub const ALL: [Opinion; 4] = [
        Opinion::LovedIt,
        Opinion::DidntLikeIt,
        Opinion::WantToWatch,
        Opinion::Pass,
    ];

    /// Integer tag sent over the wire
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.tag() == tag)
    }

    /// Short label shown on the swipe overlay
    pub fn label(self) -> &'static str {
        match self {
            Opinion::LovedIt => "Loved it",
            Opinion::DidntLikeIt => "Didn't like it",
            Opinion::WantToWatch => "Watch",
            Opinion::Pass => "Pass",
        }
    }
}

impl fmt::Display for Opinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Opinion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.tag())
    }
}

impl<'de> Deserialize<'de> for Opinion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = u8::deserialize(deserializer)?;
        Opinion::from_tag(tag)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown opinion tag {}", tag)))
    }
}

// =============================================================================
// Platform
// =============================================================================

/// Streaming service used as a discovery filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Netflix,
    PrimeVideo,
    HboMax,
    DisneyPlus,
    ParamountPlus,
    AppleTvPlus,
    Youtube,
    Hulu,
}

impl Platform {
    pub const ALL: [Platform; 8] = [
        Platform::Netflix,
        Platform::PrimeVideo,
        Platform::HboMax,
        Platform::DisneyPlus,
        Platform::ParamountPlus,
        Platform::AppleTvPlus,
        Platform::Youtube,
        Platform::Hulu,
    ];

    /// Provider name as the backend matches it
    pub fn wire_name(self) -> &'static str {
        match self {
            Platform::Netflix => "Netflix",
            Platform::PrimeVideo => "Prime Video",
            Platform::HboMax => "HBO Max",
            Platform::DisneyPlus => "Disney Plus",
            Platform::ParamountPlus => "Paramount Plus",
            Platform::AppleTvPlus => "Apple TV Plus",
            Platform::Youtube => "YouTube",
            Platform::Hulu => "Hulu",
        }
    }

    /// Kebab-case identifier used on the command line and in config
    pub fn slug(self) -> &'static str {
        match self {
            Platform::Netflix => "netflix",
            Platform::PrimeVideo => "prime-video",
            Platform::HboMax => "hbo-max",
            Platform::DisneyPlus => "disney-plus",
            Platform::ParamountPlus => "paramount-plus",
            Platform::AppleTvPlus => "apple-tv-plus",
            Platform::Youtube => "youtube",
            Platform::Hulu => "hulu",
        }
    }

    /// Three-letter badge drawn on cards
    pub fn badge(self) -> &'static str {
        match self {
            Platform::Netflix => "NFX",
            Platform::PrimeVideo => "PRM",
            Platform::HboMax => "MAX",
            Platform::DisneyPlus => "DIS",
            Platform::ParamountPlus => "PAR",
            Platform::AppleTvPlus => "ATV",
            Platform::Youtube => "YTB",
            Platform::Hulu => "HLU",
        }
    }

    /// Lenient lookup: accepts slugs, wire names and the backend's variants
    /// ("Paramount+", "Amazon Prime Video", "Disney+", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .to_lowercase()
            .replace('+', " plus")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        let platform = match key.as_str() {
            "netflix" | "netflixbasicwithads" => Platform::Netflix,
            "primevideo" | "amazonprimevideo" | "prime" => Platform::PrimeVideo,
            "hbomax" | "max" => Platform::HboMax,
            "disneyplus" | "disney" => Platform::DisneyPlus,
            "paramountplus" | "paramount" => Platform::ParamountPlus,
            "appletvplus" | "appletv" => Platform::AppleTvPlus,
            "youtube" => Platform::Youtube,
            "hulu" => Platform::Hulu,
            _ => return None,
        };
        Some(platform)
    }

    /// The platform's own search page for a title
    pub fn search_url(self, title: &str) -> String {
        let q = urlencoding::encode(title);
        match self {
            Platform::Netflix => format!("https://www.netflix.com/search?q={}", q),
            Platform::DisneyPlus => format!("https://www.disneyplus.com/search?q={}", q),
            Platform::Hulu => format!("https://www.hulu.com/search?q={}", q),
            Platform::HboMax => format!("https://www.hbomax.com/search?q={}", q),
            Platform::AppleTvPlus => format!("https://tv.apple.com/search/{}", q),
            Platform::PrimeVideo => {
                format!("https://www.primevideo.com/storefront/search?q={}", q)
            }
            Platform::ParamountPlus => format!("https://www.paramountplus.com/search?q={}", q),
            Platform::Youtube => format!("https://www.youtube.com/results?search_query={}", q),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::from_name(s).ok_or_else(|| format!("unknown platform: {}", s))
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Movie
// =============================================================================

/// Normalized movie card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    /// Poster image URL
    pub image: String,
    /// Release year, or "N/A"
    pub date: String,
    /// Rating out of 10, one decimal
    pub rate: f32,
    pub overview: String,
    pub trailer_key: Option<String>,
    /// Runtime in minutes, or "N/A"
    pub runtime: String,
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub platforms: Vec<Platform>,
}

impl Movie {
    /// Embeddable YouTube trailer URL
    pub fn trailer_url(&self) -> Option<String> {
        self.trailer_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(|k| format!("https://www.youtube.com/embed/{}", k))
    }

    pub fn genres_str(&self) -> String {
        self.genres.join(", ")
    }

    /// Runtime with unit, if known
    pub fn runtime_str(&self) -> Option<String> {
        if self.runtime.is_empty() || self.runtime == NOT_AVAILABLE {
            None
        } else {
            Some(format!("{} min", self.runtime))
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) ★ {:.1}", self.title, self.date, self.rate)
    }
}

// =============================================================================
// Raw API records
// =============================================================================

/// Movie record as returned by the backend
///
/// Accepts both the backend's enriched shape and raw TMDB field names.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    #[serde(default, alias = "poster_path")]
    pub image: Option<String>,
    #[serde(default, alias = "release_date")]
    pub date: Option<String>,
    #[serde(default, alias = "vote_average")]
    pub rate: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub trailer_key: Option<String>,
    #[serde(default)]
    pub runtime: Option<RuntimeRaw>,
    #[serde(default)]
    pub genres: Vec<GenreRaw>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Runtime comes back as minutes or as "N/A"
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuntimeRaw {
    Minutes(u64),
    Text(String),
}

/// Genre as a plain name or a TMDB `{id, name}` object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenreRaw {
    Name(String),
    Object { name: String },
}

impl GenreRaw {
    fn into_name(self) -> String {
        match self {
            GenreRaw::Name(name) => name,
            GenreRaw::Object { name } => name,
        }
    }
}

impl MovieRecord {
    /// Map the raw record into a normalized `Movie`
    pub fn into_movie(self) -> Movie {
        let image = match self.image {
            Some(path) if path.starts_with('/') => format!("{}{}", POSTER_BASE_URL, path),
            Some(url) => url,
            None => String::new(),
        };

        let date = self
            .date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.trim().is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        let runtime = match self.runtime {
            Some(RuntimeRaw::Minutes(m)) => m.to_string(),
            Some(RuntimeRaw::Text(t)) if !t.trim().is_empty() => t,
            _ => NOT_AVAILABLE.to_string(),
        };

        Movie {
            id: self.id,
            title: self.title,
            image,
            date,
            rate: round_rating(self.rate.unwrap_or(0.0)),
            overview: self.overview.unwrap_or_default(),
            trailer_key: self.trailer_key.filter(|k| !k.is_empty()),
            runtime,
            genres: self
                .genres
                .into_iter()
                .map(GenreRaw::into_name)
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
            director: self.director.filter(|d| !d.is_empty()),
            platforms: self
                .platforms
                .iter()
                .filter_map(|p| Platform::from_name(p))
                .collect(),
        }
    }
}

/// Round a rating to one decimal place
pub fn round_rating(rate: f64) -> f32 {
    ((rate * 10.0).round() / 10.0) as f32
}

/// Watchlist page payload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatchlistPage {
    pub movies: Vec<Movie>,
    pub has_more: bool,
}

/// Body of `POST /user/<id>/movie`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpinionRequest {
    pub movie_id: u64,
    pub opinion: Opinion,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> MovieRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_opinion_tags() {
        assert_eq!(Opinion::LovedIt.tag(), 1);
        assert_eq!(Opinion::Pass.tag(), 4);
        assert_eq!(Opinion::from_tag(3), Some(Opinion::WantToWatch));
        assert_eq!(Opinion::from_tag(0), None);
        assert_eq!(serde_json::to_string(&Opinion::DidntLikeIt).unwrap(), "2");
    }

    #[test]
    fn test_platform_from_name_variants() {
        assert_eq!(Platform::from_name("prime-video"), Some(Platform::PrimeVideo));
        assert_eq!(Platform::from_name("Amazon Prime Video"), Some(Platform::PrimeVideo));
        assert_eq!(Platform::from_name("Paramount+"), Some(Platform::ParamountPlus));
        assert_eq!(Platform::from_name("Disney Plus"), Some(Platform::DisneyPlus));
        assert_eq!(Platform::from_name("HBO Max"), Some(Platform::HboMax));
        assert_eq!(Platform::from_name("Crunchyroll"), None);
    }

    #[test]
    fn test_platform_slugs_parse_back() {
        for platform in Platform::ALL {
            assert_eq!(platform.slug().parse::<Platform>(), Ok(platform));
            assert_eq!(platform.wire_name().parse::<Platform>(), Ok(platform));
        }
    }

    #[test]
    fn test_platform_search_url_encodes_title() {
        let url = Platform::Netflix.search_url("The Batman");
        assert_eq!(url, "https://www.netflix.com/search?q=The%20Batman");
        let url = Platform::AppleTvPlus.search_url("Dune");
        assert_eq!(url, "https://tv.apple.com/search/Dune");
    }

    #[test]
    fn test_enriched_record_mapping() {
        let movie = record(
            r#"{
                "id": 550,
                "title": "Fight Club",
                "image": "https://image.tmdb.org/t/p/w500/abc.jpg",
                "date": "1999",
                "rate": 8.433,
                "overview": "An insomniac office worker...",
                "trailer_key": "SUXWAEX2jlg",
                "runtime": 139,
                "genres": ["Drama", " Thriller"],
                "platforms": ["Netflix", "Paramount+", "Unknown TV"]
            }"#,
        )
        .into_movie();

        assert_eq!(movie.id, 550);
        assert_eq!(movie.image, "https://image.tmdb.org/t/p/w500/abc.jpg");
        assert_eq!(movie.date, "1999");
        assert_eq!(movie.rate, 8.4);
        assert_eq!(movie.runtime, "139");
        assert_eq!(movie.genres, vec!["Drama", "Thriller"]);
        assert_eq!(movie.platforms, vec![Platform::Netflix, Platform::ParamountPlus]);
        assert_eq!(
            movie.trailer_url().as_deref(),
            Some("https://www.youtube.com/embed/SUXWAEX2jlg")
        );
    }

    #[test]
    fn test_tmdb_record_mapping() {
        let movie = record(
            r#"{
                "id": 27205,
                "title": "Inception",
                "poster_path": "/inception.jpg",
                "release_date": "2010-07-15",
                "vote_average": 8.36,
                "overview": "Cobb steals secrets",
                "genres": [{"id": 28, "name": "Action"}]
            }"#,
        )
        .into_movie();

        assert_eq!(movie.image, format!("{}/inception.jpg", POSTER_BASE_URL));
        assert_eq!(movie.date, "2010");
        assert_eq!(movie.rate, 8.4);
        assert_eq!(movie.runtime, NOT_AVAILABLE);
        assert_eq!(movie.genres, vec!["Action"]);
        assert!(movie.trailer_key.is_none());
    }

    #[test]
    fn test_record_missing_optionals() {
        let movie = record(r#"{"id": 1, "title": "Bare", "runtime": "N/A", "date": ""}"#).into_movie();
        assert_eq!(movie.date, NOT_AVAILABLE);
        assert_eq!(movie.rate, 0.0);
        assert_eq!(movie.runtime_str(), None);
        assert!(movie.image.is_empty());
        assert!(movie.platforms.is_empty());
    }

    #[test]
    fn test_record_requires_id() {
        let parsed: Result<MovieRecord, _> = serde_json::from_str(r#"{"title": "No id"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_round_rating() {
        assert_eq!(round_rating(7.25), 7.3);
        assert_eq!(round_rating(6.04), 6.0);
        assert_eq!(round_rating(10.0), 10.0);
    }
}
