//! File logging. The terminal belongs to the bar while it is presented, so
//! nothing is written to stdout or stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

pub const LOG_ENV: &str = "QAB_LOG";

/// Flushes buffered log lines when dropped; keep it alive until exit.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    pub path: PathBuf,
}

/// Installs the global subscriber. Returns `None` when no log location can
/// be resolved.
pub fn init(config: &LogConfig) -> AppResult<Option<LoggingGuard>> {
    let Some(path) = config.path.clone().or_else(default_log_path) else {
        return Ok(None);
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| {
            AppError::io_with_context(
                source,
                format!("failed to create log directory: {}", dir.display()),
            )
        })?;
    }
    let file = open_log_file(&path)?;
    let (writer, file_guard) = tracing_appender::non_blocking(file);

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| {
            AppError::invalid_argument(format!("logging already initialized: {err}"))
        })?;

    tracing::debug!(path = %path.display(), "logging initialized");
    Ok(Some(LoggingGuard {
        _file_guard: file_guard,
        path,
    }))
}

fn open_log_file(path: &Path) -> AppResult<fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| {
            let context = format!("failed to open log file: {}", path.display());
            AppError::io_with_context(source, context)
        })
}

pub fn default_log_path() -> Option<PathBuf> {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME")
        && !state.is_empty()
    {
        return Some(PathBuf::from(state).join("qab").join("qab.log"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("qab")
                .join("qab.log"),
        );
    }
    if let Some(local) = std::env::var_os("LOCALAPPDATA")
        && !local.is_empty()
    {
        return Some(PathBuf::from(local).join("qab").join("qab.log"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::open_log_file;

    #[test]
    fn open_log_file_reports_missing_directory() {
        let path = PathBuf::from("/nonexistent-qab-dir/nested/qab.log");
        let err = open_log_file(&path).expect_err("missing directory should fail");
        assert!(err.to_string().contains("failed to open log file"));
    }
}
