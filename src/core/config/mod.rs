//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. `BASE_URL` environment variable
//! 4. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$KSEO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/keystone-seo/config.toml`
//! 3. `~/.keystone-seo/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use keystone_seo::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Store: {}", config.store_path().unwrap().display());
//! if let Some(url) = config.base_url() {
//!     println!("Base URL: {}", url);
//! }
//! ```

pub mod schema;

pub use schema::{FileConfig, StoreConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "KSEO_CONFIG";

/// Environment variable carrying the site base URL.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Effective configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File configuration
    pub file: FileConfig,
    /// Base URL from the environment, if set
    env_base_url: Option<String>,
    /// Path the file configuration was loaded from
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed, or if
    /// any value is invalid. Missing config files are not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::find_config_file();
        let env_base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty());
        Self::load_from(path.as_deref(), env_base_url)
    }

    /// Load configuration from an explicit file (if any) and base URL override.
    pub fn load_from(path: Option<&Path>, env_base_url: Option<String>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Self::read_config(path)?,
            None => FileConfig::default(),
        };
        file.validate()?;
        if let Some(url) = &env_base_url {
            schema::validate_base_url(url)?;
        }

        Ok(Self {
            file,
            env_base_url,
            loaded_from: path.map(Path::to_path_buf),
        })
    }

    /// Locate the config file, first match wins.
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("keystone-seo/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".keystone-seo/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the base URL.
    ///
    /// The environment wins over the config file. Returns `None` if neither
    /// sets one.
    pub fn base_url(&self) -> Option<&str> {
        self.env_base_url
            .as_deref()
            .or(self.file.base_url.as_deref())
    }

    /// Get the record store directory.
    ///
    /// Defaults to `~/.keystone-seo/store`.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = self.file.store.as_ref().and_then(|s| s.path.clone()) {
            return Ok(path);
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".keystone-seo/store"))
    }

    /// Get the path the file configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
