//! Error types for Appix
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::IgnoreError;

/// Result type alias for Appix operations
pub type AppixResult<T> = Result<T, AppixError>;

/// Main error type for Appix operations
#[derive(Error, Debug)]
pub enum AppixError {
    /// The watched path does not exist or is not a directory
    #[error("app folder not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The watched path could not be made absolute
    #[error("cannot resolve absolute path for {path}: {source}")]
    UnresolvablePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The filesystem event source could not start watching
    #[error("cannot watch {path}: {message}")]
    WatchFailed { path: PathBuf, message: String },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Invalid `.appixignore`
    #[error(transparent)]
    Ignore(#[from] IgnoreError),

    /// The live-reload server could not be started
    #[error("live reload server failed to start on port {port}: {source}")]
    LiveReload {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
