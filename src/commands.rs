//! CLI Command Handlers
//!
//! Each handler takes its CLI args, the resolved settings and an Output,
//! and returns an ExitCode.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::BlipClient;
use crate::cli::{
    DiscoverCmd, ExitCode, Output, PlatformInfo, PlatformsCmd, RateCmd, RateResponse, WatchlistCmd,
};
use crate::config::Settings;
use crate::discovery::PlatformSet;
use crate::merge::merge_by_id;
use crate::models::{Movie, Opinion, Platform, WatchlistPage};

/// Upper bound on pages fetched by `watchlist --all`
pub const MAX_PAGES: u32 = 200;

fn client_for(settings: &Settings) -> BlipClient {
    BlipClient::new(&settings.api_url, settings.user_id)
}

fn movie_lines(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .map(|m| {
            let platforms = m
                .platforms
                .iter()
                .map(|p| p.wire_name())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{:>8}  {}  [{}]", m.id, m, platforms)
        })
        .collect()
}

fn print_movies<T: Serialize>(output: &Output, data: T, movies: &[Movie]) -> ExitCode {
    match output.print_lines(data, &movie_lines(movies)) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Discover Command
// =============================================================================

pub async fn discover_cmd(cmd: DiscoverCmd, settings: &Settings, output: &Output) -> ExitCode {
    let platforms: PlatformSet = if cmd.platforms.is_empty() {
        settings.platforms.clone()
    } else {
        cmd.platforms.into_iter().collect()
    };
    if platforms.is_empty() {
        return output.error("No platforms selected", ExitCode::InvalidArgs);
    }

    let client = client_for(settings);
    let names = platforms.iter().map(|p| p.wire_name()).collect::<Vec<_>>();
    output.info(format!("Discovering on: {}", names.join(", ")));

    match client.discover(&platforms.to_vec()).await {
        Ok(mut movies) => {
            if let Some(limit) = cmd.limit {
                movies.truncate(limit);
            }
            if movies.is_empty() {
                return output.error(
                    "No movie found. Please modify your filters.",
                    ExitCode::NoMovies,
                );
            }
            print_movies(output, &movies, &movies)
        }
        Err(e) => output.error(format!("Discovery failed: {}", e), ExitCode::NetworkError),
    }
}

// =============================================================================
// Rate Command
// =============================================================================

pub async fn rate_cmd(cmd: RateCmd, settings: &Settings, output: &Output) -> ExitCode {
    let client = client_for(settings);
    let opinion = Opinion::from(cmd.opinion);

    output.info(format!("Rating movie {}: {}", cmd.movie_id, opinion));

    match client.record_opinion(cmd.movie_id, opinion).await {
        Ok(()) => {
            let response = RateResponse {
                status: "ok".to_string(),
                movie_id: cmd.movie_id,
                opinion,
            };
            let line = format!("Recorded \"{}\" for movie {}", opinion, cmd.movie_id);
            match output.print_lines(&response, &[line]) {
                Ok(()) => ExitCode::Success,
                Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
            }
        }
        Err(e) => output.error(
            format!("Failed to record opinion: {}", e),
            ExitCode::NetworkError,
        ),
    }
}

// =============================================================================
// Watchlist Command
// =============================================================================

pub async fn watchlist_cmd(cmd: WatchlistCmd, settings: &Settings, output: &Output) -> ExitCode {
    if cmd.page == 0 {
        return output.error("Pages start at 1", ExitCode::InvalidArgs);
    }

    let client = client_for(settings);
    let opinion = Opinion::from(cmd.opinion);

    let result = if cmd.all {
        output.info(format!("Fetching every \"{}\" page...", opinion));
        fetch_all(&client, opinion).await
    } else {
        output.info(format!("Fetching \"{}\" page {}...", opinion, cmd.page));
        client.user_movies(opinion, cmd.page).await
    };

    match result {
        Ok(page) => print_movies(output, &page, &page.movies),
        Err(e) => output.error(
            format!("Watchlist fetch failed: {}", e),
            ExitCode::NetworkError,
        ),
    }
}

/// Fetch pages until the backend reports no more, folding them with the
/// same id-keyed merge the TUI uses
pub async fn fetch_all(client: &BlipClient, opinion: Opinion) -> Result<WatchlistPage> {
    let mut movies = Vec::new();
    let mut has_more = true;
    let mut page = 1;

    while has_more && page <= MAX_PAGES {
        let batch = client.user_movies(opinion, page).await?;
        debug!(page, count = batch.movies.len(), "fetched page");
        has_more = batch.has_more && !batch.movies.is_empty();
        movies = merge_by_id(movies, batch.movies);
        page += 1;
    }

    if has_more {
        warn!(max = MAX_PAGES, "stopped before the last page");
    }

    Ok(WatchlistPage { movies, has_more })
}

// =============================================================================
// Platforms Command
// =============================================================================

pub async fn platforms_cmd(_cmd: PlatformsCmd, settings: &Settings, output: &Output) -> ExitCode {
    let platforms: Vec<PlatformInfo> = Platform::ALL
        .iter()
        .map(|p| PlatformInfo {
            name: p.wire_name().to_string(),
            slug: p.slug().to_string(),
            default: settings.platforms.contains(*p),
        })
        .collect();

    let lines: Vec<String> = platforms
        .iter()
        .map(|p| {
            let mark = if p.default { "*" } else { " " };
            format!("{} {:<16} {}", mark, p.slug, p.name)
        })
        .collect();

    match output.print_lines(&platforms, &lines) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}
