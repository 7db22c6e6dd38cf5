//! API clients for external services
//!
//! - blip: movie discovery, opinions and watchlist on the blip backend

pub mod blip;

pub use blip::{BlipClient, BlipError, DEFAULT_API_URL};
