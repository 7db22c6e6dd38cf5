//! blip backend API client
//!
//! Thin wrapper over the three REST endpoints the app consumes:
//! discovery, opinion recording and the per-user movie lists.
//! No retries: a failed call is reported once and the caller decides.

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

use crate::models::{Movie, MovieRecord, Opinion, OpinionRequest, Platform, WatchlistPage};

/// Default backend URL when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Backend API error types
#[derive(Error, Debug)]
pub enum BlipError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// blip backend client
#[derive(Debug, Clone)]
pub struct BlipClient {
    base_url: String,
    user_id: u64,
    client: reqwest::Client,
}

impl BlipClient {
    /// Create a client for the given backend and user
    pub fn new(base_url: impl Into<String>, user_id: u64) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Turn a response into a parsed body or a typed error
    async fn parse<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
        match response.status() {
            status if status.is_success() => {
                let body = response.text().await.map_err(BlipError::from)?;
                let parsed: T = serde_json::from_str(&body).map_err(|e| {
                    BlipError::InvalidResponse(format!("JSON parse error: {}", e))
                })?;
                Ok(parsed)
            }
            StatusCode::NOT_FOUND => Err(BlipError::NotFound.into()),
            status => Err(BlipError::ServerError(status.as_u16()).into()),
        }
    }

    /// Fetch a batch of candidate movies available on any of `platforms`
    pub async fn discover(&self, platforms: &[Platform]) -> Result<Vec<Movie>> {
        let url = format!("{}/discover-movies", self.base_url);
        let platforms_csv = platforms
            .iter()
            .map(|p| p.wire_name())
            .collect::<Vec<_>>()
            .join(",");

        debug!(user_id = self.user_id, platforms = %platforms_csv, "discovering movies");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("user_id", self.user_id.to_string()),
                ("platforms", platforms_csv),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(BlipError::from)?;

        let records: Vec<MovieRecord> = Self::parse(response).await?;
        Ok(records.into_iter().map(MovieRecord::into_movie).collect())
    }

    /// Record the user's opinion of a movie
    pub async fn record_opinion(&self, movie_id: u64, opinion: Opinion) -> Result<()> {
        let url = format!("{}/user/{}/movie", self.base_url, self.user_id);
        debug!(movie_id, opinion = opinion.tag(), "recording opinion");

        let response = self
            .client
            .post(&url)
            .json(&OpinionRequest { movie_id, opinion })
            .send()
            .await
            .map_err(BlipError::from)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(BlipError::NotFound.into()),
            status => Err(BlipError::ServerError(status.as_u16()).into()),
        }
    }

    /// Fetch one page of the user's movies tagged with `opinion`
    pub async fn user_movies(&self, opinion: Opinion, page: u32) -> Result<WatchlistPage> {
        let url = format!("{}/user/{}/movies", self.base_url, self.user_id);
        debug!(opinion = opinion.tag(), page, "fetching user movies");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("opinion", opinion.tag().to_string()),
                ("page", page.to_string()),
                ("t", cache_bust_token()),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(BlipError::from)?;

        let raw: UserMoviesResponse = Self::parse(response).await?;
        Ok(raw.into_page())
    }

    /// Fetch one page of the "want to watch" list
    pub async fn watchlist(&self, page: u32) -> Result<WatchlistPage> {
        self.user_movies(Opinion::WantToWatch, page).await
    }
}

/// Timestamp token that defeats intermediate HTTP caches
fn cache_bust_token() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{}r", millis)
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

/// Paged object, or a bare array from backends that do not paginate
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserMoviesResponse {
    Paged {
        movies: Vec<MovieRecord>,
        #[serde(default)]
        has_more: bool,
    },
    Bare(Vec<MovieRecord>),
}

impl UserMoviesResponse {
    fn into_page(self) -> WatchlistPage {
        let (records, has_more) = match self {
            UserMoviesResponse::Paged { movies, has_more } => (movies, has_more),
            UserMoviesResponse::Bare(movies) => (movies, false),
        };
        WatchlistPage {
            movies: records.into_iter().map(MovieRecord::into_movie).collect(),
            has_more,
        }
    }
}
