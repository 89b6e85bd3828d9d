//! Configuration management for searchdocs.
//!
//! Configuration is stored in TOML and is entirely optional: a missing file
//! yields [`Config::default`]. The cache root is part of the configuration
//! value rather than process-wide state, so tests and embedders can point the
//! whole pipeline at a temporary directory.
//!
//! ## Resolution Order
//!
//! 1. `$SEARCHDOCS_CONFIG_DIR/config.toml`, else the platform config dir
//!    (`~/.config/searchdocs/config.toml` on Linux)
//! 2. `SEARCHDOCS_CACHE_DIR` overrides `paths.cache_root`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [defaults]
//! docs_url = "https://docs.python.org/3/"
//! threshold = 50
//! normalize = false
//!
//! [http]
//! timeout_secs = 30
//!
//! [paths]
//! cache_root = "/home/user/.cache/searchdocs"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Documentation set searched when nothing else is configured.
pub const DEFAULT_DOCS_URL: &str = "https://docs.python.org/3/";

/// Minimum similarity score (0-100) a candidate needs to be suggested.
pub const DEFAULT_THRESHOLD: u8 = 50;

const APP_NAME: &str = "searchdocs";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "SEARCHDOCS_CONFIG_DIR";
const CACHE_DIR_ENV: &str = "SEARCHDOCS_CACHE_DIR";

/// Global configuration for searchdocs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Lookup defaults
    pub defaults: DefaultsConfig,
    /// HTTP transport settings
    pub http: HttpConfig,
    /// File system locations
    pub paths: PathsConfig,
}

/// Defaults applied to every lookup unless the caller overrides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Base URL of the documentation set to search.
    pub docs_url: String,

    /// Minimum similarity score (inclusive) for a candidate to match.
    pub threshold: u8,

    /// Lowercase and strip punctuation from both sides before scoring.
    ///
    /// Off by default: scoring is case-sensitive on the raw strings.
    pub normalize: bool,
}

/// Settings for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

/// File system paths configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory holding one cache partition per documentation URL.
    ///
    /// Default locations:
    /// - Linux: `~/.cache/searchdocs`
    /// - macOS: `~/Library/Caches/org.searchdocs.searchdocs`
    /// - Windows: `%LOCALAPPDATA%\searchdocs\searchdocs\cache`
    pub cache_root: PathBuf,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    ///
    /// `SEARCHDOCS_CACHE_DIR` is applied on top of whatever was loaded.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit file path.
    ///
    /// A missing file yields defaults; an unreadable or malformed file is an
    /// [`Error::Config`].
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to an explicit file path, creating parents.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Config("Invalid config path".into()))?;
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Path of the configuration file, honoring `SEARCHDOCS_CONFIG_DIR`.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed).join(CONFIG_FILE));
            }
        }

        let project_dirs = directories::ProjectDirs::from("org", APP_NAME, APP_NAME)
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join(CONFIG_FILE))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                self.paths.cache_root = PathBuf::from(trimmed);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.defaults.threshold > 100 {
            return Err(Error::Config(format!(
                "threshold must be between 0 and 100, got {}",
                self.defaults.threshold
            )));
        }
        Ok(())
    }
}

impl HttpConfig {
    /// Request timeout, or `None` when disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            docs_url: DEFAULT_DOCS_URL.to_string(),
            threshold: DEFAULT_THRESHOLD,
            normalize: false,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("searchdocs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cache_root: directories::ProjectDirs::from("org", APP_NAME, APP_NAME).map_or_else(
                || {
                    directories::BaseDirs::new().map_or_else(
                        || PathBuf::from(".cache").join(APP_NAME),
                        |base| base.cache_dir().join(APP_NAME),
                    )
                },
                |dirs| dirs.cache_dir().to_path_buf(),
            ),
        }
    }
}
