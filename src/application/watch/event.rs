//! Watch event types and options

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::entities::{ChangeKind, PushRun, PushRunId, PushTrigger};
use crate::domain::ports::PushRequest;
use crate::error::{AppixError, AppixResult};

/// Default time the push pipeline waits for build progress before giving up
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(180);

/// Default timeout for a single HTTP request made by the push pipeline
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Absolute path of the watched app folder
    pub app_path: PathBuf,
    /// Suppress the browser on the initial push
    pub no_browser: bool,
    /// Forward build progress messages at info level
    pub verbose: bool,
    /// Push to the local frontend instead of the configured one
    pub use_local_frontend: bool,
    /// Give up on a push after this long without progress
    pub idle_timeout: Duration,
    /// Timeout for each HTTP request
    pub request_timeout: Duration,
}

impl WatchOptions {
    /// Create new watch options with minimal required fields
    pub fn new(app_path: PathBuf) -> Self {
        Self {
            app_path,
            no_browser: false,
            verbose: false,
            use_local_frontend: false,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set whether the initial push opens a browser
    pub fn with_no_browser(mut self, no_browser: bool) -> Self {
        self.no_browser = no_browser;
        self
    }

    /// Set verbose progress output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Target the local frontend
    pub fn with_local_frontend(mut self, local: bool) -> Self {
        self.use_local_frontend = local;
        self
    }

    /// Set the idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// The startup push run (always run id 0)
    pub fn initial_run(&self) -> PushRun {
        PushRun::initial(PushRunId::new(0), self.no_browser)
    }

    /// Build the pipeline request for a run
    pub fn to_push_request(&self, run: &PushRun) -> PushRequest {
        PushRequest {
            app_path: self.app_path.clone(),
            open_browser: run.open_browser,
            verbose: self.verbose,
            idle_timeout: self.idle_timeout,
            request_timeout: self.request_timeout,
            use_local_frontend: self.use_local_frontend,
        }
    }
}

/// Resolve the watched folder to an absolute, existing directory.
pub fn resolve_app_path(path: &Path) -> AppixResult<PathBuf> {
    if !path.exists() {
        return Err(AppixError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    let resolved = path
        .canonicalize()
        .map_err(|source| AppixError::UnresolvablePath {
            path: path.to_path_buf(),
            source,
        })?;
    if !resolved.is_dir() {
        return Err(AppixError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(resolved)
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted { app: String },
    /// A relevant file changed
    FileChanged { path: String, kind: ChangeKind },
    /// Push started
    PushStarted { run: PushRunId, trigger: PushTrigger },
    /// Push completed
    PushComplete {
        run: PushRunId,
        trigger: PushTrigger,
        files: usize,
        bytes: u64,
        elapsed_ms: u64,
    },
    /// Push failed; the session keeps watching
    PushFailed {
        run: PushRunId,
        trigger: PushTrigger,
        message: String,
    },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
