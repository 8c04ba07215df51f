//! Application directory helpers anchored to a single `.churnscope` folder.
//!
//! The config file, the model bundle, and log files all live under one root
//! in the OS config directory (e.g., `%APPDATA%` on Windows). Setting
//! `CHURNSCOPE_CONFIG_HOME` relocates the root for tests or portable setups.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Directory name created under the OS config root.
pub const APP_DIR_NAME: &str = ".churnscope";

/// Environment variable that overrides the config base directory.
pub const CONFIG_HOME_ENV: &str = "CHURNSCOPE_CONFIG_HOME";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors raised while resolving or creating application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No base directory could be resolved on this platform.
    #[error("No base directory available for application files")]
    NoBaseDir,
    /// An application directory could not be created.
    #[error("Could not create application directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.churnscope` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(base.join(APP_DIR_NAME))
}

/// Return the models directory inside the `.churnscope` root, creating it if needed.
pub fn models_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("models"))
}

/// Return the logs directory inside the `.churnscope` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("logs"))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn config_base_dir() -> Option<PathBuf> {
    let overridden = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|slot| slot.clone());
    overridden
        .or_else(|| std::env::var_os(CONFIG_HOME_ENV).map(PathBuf::from))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
}

#[cfg(test)]
static OVERRIDE_SERIAL: Mutex<()> = Mutex::new(());

/// Test-only guard that scopes the config base override to its lifetime.
///
/// The override is process-global, so the guard also serializes tests that
/// rely on it.
#[cfg(test)]
pub struct ConfigBaseGuard {
    _serial: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ConfigBaseGuard {
    /// Point the config base at `path` until the guard drops.
    pub fn set(path: PathBuf) -> Self {
        let serial = OVERRIDE_SERIAL
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut slot = CONFIG_BASE_OVERRIDE
            .lock()
            .expect("config base override mutex poisoned");
        *slot = Some(path);
        drop(slot);
        Self { _serial: serial }
    }
}

#[cfg(test)]
impl Drop for ConfigBaseGuard {
    fn drop(&mut self) {
        let mut slot = CONFIG_BASE_OVERRIDE
            .lock()
            .expect("config base override mutex poisoned");
        *slot = None;
    }
}
