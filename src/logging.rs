//! Tracing setup: stdout plus a per-launch log file.
//!
//! Every launch opens its own timestamped file under the app logs directory
//! and the directory is trimmed so only the most recent launches survive.
//! Failures are reported to the caller instead of aborting startup.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use thiserror::Error;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

const LOG_FILE_PREFIX: &str = "churnscope";
/// How many launch log files to keep around.
const KEEP_LOG_FILES: usize = 8;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The logs directory could not be resolved or created.
    #[error(transparent)]
    Dir(#[from] app_dirs::AppDirError),
    /// The per-launch log file could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    OpenLog {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Existing log files could not be listed for trimming.
    #[error("Failed to list log directory {dir}: {source}")]
    ListLogs {
        dir: PathBuf,
        source: std::io::Error,
    },
    /// An expired log file could not be deleted.
    #[error("Failed to delete old log file {path}: {source}")]
    DropLog {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The launch timestamp could not be rendered.
    #[error("Failed to format log timestamp: {0}")]
    Stamp(#[from] time::error::Format),
    /// A global tracing subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global tracing subscriber. Calling it again is a no-op.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let dir = app_dirs::logs_dir()?;
    let file_name = log_file_name(now())?;
    let path = dir.join(&file_name);
    touch(&path)?;
    trim_old_logs(&dir, KEEP_LOG_FILES)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&dir, file_name));
    let timer = local_timer();
    let subscriber = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(path = %path.display(), "Logging started");
    Ok(())
}

fn log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    const STAMP_FORMAT: &[FormatItem<'_>] =
        format_description!("[year][month][day]-[hour][minute][second]");
    Ok(format!("{LOG_FILE_PREFIX}-{}.log", now.format(STAMP_FORMAT)?))
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn touch(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenLog {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}

fn trim_old_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let listing = fs::read_dir(dir).map_err(|source| LoggingError::ListLogs {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut logs: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in listing {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("log") || !path.is_file() {
            continue;
        }
        let stamp = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        logs.push((stamp, path));
    }
    if logs.len() <= keep {
        return Ok(());
    }

    // Oldest first; everything before the retention window goes.
    logs.sort_by_key(|(stamp, _)| *stamp);
    let excess = logs.len() - keep;
    for (_, path) in logs.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::DropLog { path, source })?;
    }
    Ok(())
}

fn local_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn launch_log_name_is_prefixed_and_stamped() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let name = log_file_name(fixed).unwrap();
        assert_eq!(name, "churnscope-20231114-221320.log");
    }

    #[test]
    fn trim_drops_everything_past_the_retention_window() {
        let dir = tempdir().unwrap();
        for idx in 0..11 {
            touch(&dir.path().join(format!("churnscope-{idx}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }

        trim_old_logs(dir.path(), KEEP_LOG_FILES).unwrap();
        assert_eq!(count_logs(dir.path()), KEEP_LOG_FILES);
    }

    #[test]
    fn trim_leaves_small_directories_alone() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("churnscope-only.log")).unwrap();
        touch(&dir.path().join("notes.txt")).unwrap();

        trim_old_logs(dir.path(), KEEP_LOG_FILES).unwrap();
        assert_eq!(count_logs(dir.path()), 1);
        assert!(dir.path().join("notes.txt").exists());
    }

    fn count_logs(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.path().extension().and_then(|ext| ext.to_str()) == Some("log")
            })
            .count()
    }
}
