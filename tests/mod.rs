//! Integration tests for blip
//!
//! Tests are organized by component:
//! - api_test: backend client (discovery, opinions, user lists, errors)
//! - watchlist_test: pagination against a mock backend
//! - discovery_test: deck, swipe and filter flows through the App
//! - cli_test: argument parsing, JSON output, command exit codes
//! - ui_test: screen rendering into a TestBackend

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
