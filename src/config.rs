//! Application configuration loaded from `config.toml` under the app root.
//!
//! The file is optional and hand-edited; a missing file means defaults. The
//! only setting today is an override for the model bundle location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Aggregate application settings loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelSettings,
}

/// Model artifact preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Optional override for the model bundle path; relative paths resolve
    /// against the working directory.
    #[serde(default)]
    pub bundle_path: Option<PathBuf>,
}

/// Errors that may occur while loading app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app root could not be resolved or created.
    #[error(transparent)]
    Dir(#[from] app_dirs::AppDirError),
    /// The config file exists but could not be read.
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML for this version.
    #[error("Config file {path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Resolve the configuration file path, ensuring the app root exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    match std::fs::read_to_string(&path) {
        Ok(text) => parse(&path, &text),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Read { path, source }),
    }
}

fn parse(path: &Path, text: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
