//! Watchlist pagination state
//!
//! Maintains a growing, deduplicated list of "want to watch" movies across
//! paginated fetches. A fetch is split in two halves so the UI loop can run
//! the network call on a task:
//!
//! - [`WatchlistState::begin`] checks the guard, raises the loading flag and
//!   returns the page to request
//! - [`WatchlistState::apply`] folds the result in and clears the flags
//!
//! A failed fetch never partially applies: the list, page cursor and
//! `has_more` stay exactly as they were.

use anyhow::Result;
use tracing::{debug, error};

use crate::api::BlipClient;
use crate::merge::merge_by_id;
use crate::models::{Movie, WatchlistPage};

/// Page request produced by [`WatchlistState::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Replace the list instead of appending to it
    pub reset: bool,
    /// 1-based page number to fetch
    pub page: u32,
}

/// Watchlist screen state
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistState {
    pub movies: Vec<Movie>,
    /// Next page to request, always >= 1
    pub page: u32,
    pub has_more: bool,
    /// Appending the next page
    pub loading: bool,
    /// Reloading from page 1
    pub refreshing: bool,
}

impl Default for WatchlistState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            page: 1,
            has_more: true,
            loading: false,
            refreshing: false,
        }
    }
}

impl WatchlistState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any fetch is outstanding
    pub fn is_busy(&self) -> bool {
        self.loading || self.refreshing
    }

    /// Start a fetch. Returns `None` when appending past the last page.
    pub fn begin(&mut self, reset: bool) -> Option<PageRequest> {
        if !reset && !self.has_more {
            return None;
        }

        if reset {
            self.refreshing = true;
        } else {
            self.loading = true;
        }

        Some(PageRequest {
            reset,
            page: if reset { 1 } else { self.page },
        })
    }

    /// Fold the outcome of `request` into the state
    pub fn apply(&mut self, request: PageRequest, result: Result<WatchlistPage>) {
        match result {
            Ok(WatchlistPage { movies, has_more }) => {
                debug!(
                    page = request.page,
                    reset = request.reset,
                    count = movies.len(),
                    has_more,
                    "watchlist page loaded"
                );

                if request.reset {
                    self.movies = movies;
                    self.page = 1;
                } else if !movies.is_empty() {
                    let existing = std::mem::take(&mut self.movies);
                    self.movies = merge_by_id(existing, movies);
                    self.page += 1;
                }
                self.has_more = has_more;
            }
            Err(e) => {
                error!(page = request.page, "Could not fetch watchlist: {:#}", e);
            }
        }

        self.loading = false;
        self.refreshing = false;
    }

    /// Run a complete fetch against the backend
    pub async fn fetch_page(&mut self, client: &BlipClient, reset: bool) {
        let Some(request) = self.begin(reset) else {
            return;
        };
        let result = client.watchlist(request.page).await;
        self.apply(request, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            image: String::new(),
            date: "2021".into(),
            rate: 6.5,
            overview: String::new(),
            trailer_key: None,
            runtime: "90".into(),
            genres: Vec::new(),
            director: None,
            platforms: Vec::new(),
        }
    }

    fn page(ids: &[u64], has_more: bool) -> WatchlistPage {
        WatchlistPage {
            movies: ids.iter().copied().map(movie).collect(),
            has_more,
        }
    }

    fn ids(state: &WatchlistState) -> Vec<u64> {
        state.movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_begin_sets_flags() {
        let mut state = WatchlistState::new();

        let req = state.begin(true).unwrap();
        assert_eq!(req, PageRequest { reset: true, page: 1 });
        assert!(state.refreshing);
        assert!(!state.loading);

        state.apply(req, Ok(page(&[], true)));
        state.page = 4;

        let req = state.begin(false).unwrap();
        assert_eq!(req, PageRequest { reset: false, page: 4 });
        assert!(state.loading);
        assert!(!state.refreshing);
    }

    #[test]
    fn test_append_without_more_is_noop() {
        let mut state = WatchlistState::new();
        state.has_more = false;
        state.movies = vec![movie(1)];
        let before = state.clone();

        assert!(state.begin(false).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_overlapping_page_merges() {
        let mut state = WatchlistState::new();
        state.movies = vec![movie(1), movie(2)];

        let req = state.begin(false).unwrap();
        state.apply(req, Ok(page(&[2, 3], true)));

        assert_eq!(ids(&state), vec![1, 2, 3]);
        assert_eq!(state.page, 2);
        assert!(!state.loading);
    }

    #[test]
    fn test_empty_page_keeps_cursor() {
        let mut state = WatchlistState::new();
        state.movies = vec![movie(1)];
        state.page = 3;

        let req = state.begin(false).unwrap();
        state.apply(req, Ok(page(&[], false)));

        assert_eq!(ids(&state), vec![1]);
        assert_eq!(state.page, 3);
        assert!(!state.has_more);
    }

    #[test]
    fn test_reset_replaces_everything() {
        let mut state = WatchlistState::new();
        state.movies = vec![movie(1), movie(2)];
        state.page = 5;
        state.has_more = false;

        let req = state.begin(true).unwrap();
        assert_eq!(req.page, 1);
        state.apply(req, Ok(page(&[7], true)));

        assert_eq!(ids(&state), vec![7]);
        assert_eq!(state.page, 1);
        assert!(state.has_more);
        assert!(!state.refreshing);
    }

    #[test]
    fn test_failure_leaves_state_untouched() {
        let mut state = WatchlistState::new();
        state.movies = vec![movie(1), movie(2)];
        state.page = 2;

        let req = state.begin(false).unwrap();
        state.apply(req, Err(anyhow::anyhow!("connection refused")));

        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.page, 2);
        assert!(state.has_more);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_sequential_disjoint_pages() {
        let mut state = WatchlistState::new();
        let pages: [&[u64]; 3] = [&[10, 11, 12], &[13, 14], &[15]];

        for (i, p) in pages.iter().enumerate() {
            let req = state.begin(false).unwrap();
            state.apply(req, Ok(page(p, i < 2)));
        }

        assert_eq!(ids(&state), vec![10, 11, 12, 13, 14, 15]);
        assert_eq!(state.page, 4);
        assert!(!state.has_more);
        assert!(state.begin(false).is_none());
    }
}
