//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$KSEO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/keystone-seo/config.toml`
//! 3. `~/.keystone-seo/config.toml`
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., the base URL must be
//! absolute).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// File configuration.
///
/// # Example
///
/// ```toml
/// base_url = "https://example.com"
///
/// [store]
/// path = "/var/lib/keystone-seo"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Site base URL canonical links are derived from
    pub base_url: Option<String>,

    /// Record store settings
    pub store: Option<StoreConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url {
            validate_base_url(url)?;
        }
        if let Some(store) = &self.store {
            store.validate()?;
        }
        Ok(())
    }
}

/// Record store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding the metadata records
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "store.path cannot be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Check that a base URL is absolute (`http://` or `https://` plus a host).
///
/// # Example
///
/// ```
/// use keystone_seo::core::config::schema::validate_base_url;
///
/// assert!(validate_base_url("https://example.com").is_ok());
/// assert!(validate_base_url("https://example.com/").is_ok());
/// assert!(validate_base_url("example.com").is_err());
/// assert!(validate_base_url("https://").is_err());
/// ```
pub fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| {
            ConfigError::InvalidValue(format!(
                "base_url '{url}' must start with http:// or https://"
            ))
        })?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue(format!(
            "base_url '{url}' has no valid host"
        )));
    }
    Ok(())
}
