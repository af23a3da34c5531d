//! Application configuration.
//!
//! Settings are layered: built-in defaults, then
//! `<config_dir>/playdeck/config.toml`, then `PLAYDECK_*` environment
//! variables. `PLAYDECK_ALLOWED_ORIGINS` takes a comma-separated list.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::Locale;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use crate::{error::ConfigError, format::resolve_locale};

/// Directory under the platform config/data/cache roots.
pub const APP_DIR: &str = "playdeck";
/// Configuration file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PLAYDECK";

/// Runtime settings shared by the batch sources and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `output_<epoch>.json` snapshots.
    pub output_dir: PathBuf,
    /// Origins the dashboard API is served from; the first one is queried.
    pub allowed_origins: Vec<String>,
    /// POSIX locale name used for month names and timestamps.
    pub locale: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Directory for log files.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("output"),
            allowed_origins: vec!["http://localhost:8080".to_string()],
            locale: "en_US".to_string(),
            request_timeout_secs: 30,
            log_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("logs"),
        }
    }
}

impl AppConfig {
    /// Load from the default config file plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    /// Load from `path` (which may be absent) plus environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Resolved display locale.
    pub fn locale(&self) -> Locale {
        resolve_locale(&self.locale)
    }

    /// Timeout applied to HTTP requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Location of the user's configuration file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Write the default configuration file if none exists.
///
/// Returns the file's path and whether it was just created, so callers can
/// report the write once logging is set up.
pub fn ensure_default_config() -> Result<(PathBuf, bool), ConfigError> {
    let path = config_path()?;
    let created = write_default_config(&path)?;
    Ok((path, created))
}

/// Write defaults to `path` unless it already exists. Returns whether a file was written.
pub fn write_default_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let serialized = toml::to_string_pretty(&AppConfig::default())?;
    fs::write(path, serialized).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}
