//! Push Pipeline Port
//!
//! Abstracts one build-and-upload of the watched app. The watch session only
//! needs to know that a push ran to completion; success and failure are
//! reported for logging and never change how the session proceeds.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Parameters of a single push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    /// Absolute path of the app folder
    pub app_path: PathBuf,
    /// Open the pushed app in a browser when done
    pub open_browser: bool,
    /// Log request/response details
    pub verbose: bool,
    /// Give up when the bundling progress does not change for this long
    pub idle_timeout: Duration,
    /// Timeout of each individual HTTP request
    pub request_timeout: Duration,
    /// Upload to the local frontend instead of the configured remote one
    pub use_local_frontend: bool,
}

/// Summary of a successful push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Number of files packaged
    pub files: usize,
    /// Size of the uploaded package in bytes
    pub bytes: u64,
    /// Where the pushed app can be viewed, if the frontend reported it
    pub app_url: Option<String>,
}

/// Push pipeline failures. Never fatal to a watch session.
#[derive(Debug, Error)]
pub enum PushError {
    /// Packaging the app folder failed
    #[error("packaging failed: {0}")]
    Package(String),

    /// The HTTP request could not be performed
    #[error("request to {uri} failed: {message}")]
    Request { uri: String, message: String },

    /// The frontend answered the upload with a non-200 status
    #[error("uploading failed, the frontend returned status code {status}")]
    UploadStatus { status: u16 },

    /// The frontend answered without a usable progress link
    #[error("uploading failed, the frontend did not return a valid response: {0}")]
    InvalidUploadResponse(String),

    /// The frontend reported that bundling failed
    #[error("bundling failed: {0}")]
    BundlingFailed(String),

    /// Bundling progress did not change within the idle timeout
    #[error("no progress reported for {}s, giving up", .0.as_secs())]
    IdleTimeout(Duration),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for push pipelines.
///
/// Implementations block until the push has finished; callers that must not
/// block run them on their own thread.
pub trait PushPipeline: Send + Sync {
    fn push(&self, request: &PushRequest) -> Result<PushReport, PushError>;
}
