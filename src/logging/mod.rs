//! Tracing subscriber initialization.
//!
//! Diagnostics go to a log file rather than the renderer surface, so a
//! scroll session can be followed with `tail -f` from another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create the log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Log path has no usable filename component
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// A global subscriber is already installed
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Default log file location: `<cache_dir>/vfeed/vfeed.log`.
///
/// Falls back to a relative path when the platform cache directory
/// cannot be determined.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("vfeed").join("vfeed.log"))
        .unwrap_or_else(|| PathBuf::from("vfeed.log"))
}

/// Install the global tracing subscriber writing to `log_path`.
///
/// Creates the log directory if missing. Respects `RUST_LOG`, defaulting
/// to the `info` level.
///
/// # Errors
///
/// Returns [`LoggingError`] when the directory cannot be created, the
/// path has no filename, or a subscriber is already set.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // log files get no ANSI escapes
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
