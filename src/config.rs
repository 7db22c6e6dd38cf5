//! Configuration management for blip
//!
//! Handles config file loading/saving and backend settings resolution.
//! Config is stored at ~/.config/blip/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_URL;
use crate::discovery::PlatformSet;
use crate::models::Platform;

/// Environment variables checked for the backend URL, in order
const API_URL_ENV: &[&str] = &["BLIP_API_URL", "EXPO_PUBLIC_API_URL"];

const USER_ID_ENV: &str = "BLIP_USER_ID";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL
    pub api_url: Option<String>,
    /// User whose opinions are read and written
    pub user_id: Option<u64>,
    /// Default platform filter (slugs or names)
    pub platforms: Option<Vec<String>>,
}

/// Fully resolved settings used to build clients
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub user_id: u64,
    pub platforms: PlatformSet,
}

impl Config {
    /// Get config file path (~/.config/blip/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("blip").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from a specific file; missing or invalid files give defaults
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Backend URL with fallback chain:
    /// 1. Explicit override (command line)
    /// 2. BLIP_API_URL, then EXPO_PUBLIC_API_URL
    /// 3. Config file
    /// 4. Local default
    pub fn api_url(&self, cli_override: Option<&str>) -> String {
        if let Some(url) = cli_override {
            return url.to_string();
        }

        for var in API_URL_ENV {
            if let Ok(url) = std::env::var(var) {
                if !url.trim().is_empty() {
                    return url;
                }
            }
        }

        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// User id: override, then BLIP_USER_ID, then config, then 1
    pub fn user_id(&self, cli_override: Option<u64>) -> u64 {
        cli_override
            .or_else(|| {
                std::env::var(USER_ID_ENV)
                    .ok()
                    .and_then(|v| v.trim().parse().ok())
            })
            .or(self.user_id)
            .unwrap_or(1)
    }

    /// Default platform filter; unknown names are ignored
    pub fn platforms(&self) -> PlatformSet {
        match &self.platforms {
            Some(names) => names.iter().filter_map(|n| Platform::from_name(n)).collect(),
            None => PlatformSet::default_selection(),
        }
    }

    /// Resolve everything needed to talk to the backend
    pub fn resolve(&self, api_url: Option<&str>, user_id: Option<u64>) -> Settings {
        Settings {
            api_url: self.api_url(api_url),
            user_id: self.user_id(user_id),
            platforms: self.platforms(),
        }
    }
}
