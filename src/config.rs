//! Global configuration management
//!
//! Config is stored at `~/.openmedicaid/config.toml`. A missing or unreadable
//! file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::feed::DEFAULT_SITE_URL;
use crate::paths;
use crate::watchlist::DEFAULT_LIMIT;

/// Default port for `openmedicaid serve`
pub const DEFAULT_PORT: u16 = 8787;

/// Global configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fixture directory (`./data` when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Public site address used by the feed and sitemap
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// Watchlist rows shown per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Local server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Local server settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

const fn default_page_size() -> usize {
    DEFAULT_LIMIT
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            site_url: default_site_url(),
            page_size: default_page_size(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load config from the default location
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, or defaults if it is missing or malformed
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path).map(|content| toml::from_str(&content)) {
            Ok(Ok(config)) => config,
            Ok(Err(e)) => {
                log::warn!("Ignoring malformed config {}: {e}", path.display());
                Self::default()
            },
            Err(e) => {
                log::warn!("Cannot read config {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the fixture directory.
    ///
    /// Precedence: explicit flag, `OPENMEDICAID_DATA`, config file, `./data`.
    #[must_use]
    pub fn resolve_data_dir(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(dir) = flag {
            return dir.to_path_buf();
        }
        if let Ok(dir) = std::env::var(paths::DATA_DIR_ENV)
            && !dir.trim().is_empty()
        {
            return PathBuf::from(dir);
        }
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(paths::DEFAULT_DATA_DIR))
    }
}
