//! blip - swipe through movies from your terminal
//!
//! Client for a movie discovery backend: a swipeable deck of candidates
//! filtered by streaming platform, opinions recorded per swipe, and a
//! paginated watchlist.
//!
//! # Modules
//!
//! - `models` - Movie, opinion and platform types, raw record mapping
//! - `api` - Backend REST client
//! - `merge` - Id-keyed list merging
//! - `discovery` - Deck, swipe and platform filter state
//! - `watchlist` - Paginated watchlist state
//! - `app` - Screen state machine and key handling
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod merge;
pub mod models;
pub mod ui;
pub mod watchlist;

// Re-export commonly used types
pub use api::{BlipClient, BlipError};
pub use app::{App, AppState};
pub use discovery::{DiscoveryState, PlatformSet, SwipeDirection};
pub use models::{Movie, Opinion, Platform, WatchlistPage};
pub use watchlist::WatchlistState;
