// File: novel-site/src/config.rs
// Purpose: Configuration parsing from site.toml

use anyhow::{Context, Result};
use novel_router::HistoryMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouterConfig {
    /// `hash` (default) or `web`
    #[serde(default)]
    pub history: HistoryMode,

    /// Base path the site is served under (default: "/")
    #[serde(default = "default_base")]
    pub base: String,

    /// Whether static segments match case-insensitively (default: true)
    #[serde(default = "default_true")]
    pub case_insensitive: bool,

    /// Reset the scroll position after every navigation (default: true)
    #[serde(default = "default_true")]
    pub scroll_to_top: bool,

    /// Render the not-found view for unmatched URLs instead of failing
    #[serde(default = "default_true")]
    pub not_found_fallback: bool,
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

// Default values
fn default_base() -> String {
    "/".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".novel").join("local_storage.json")
}

fn default_true() -> bool {
    true
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: HistoryMode::default(),
            base: default_base(),
            case_insensitive: true,
            scroll_to_top: true,
            not_found_fallback: true,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing or empty file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SiteConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./site.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("site.toml")
    }
}
