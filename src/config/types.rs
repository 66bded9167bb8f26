//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppixResult;
use crate::infrastructure::livereload::DEFAULT_LIVERELOAD_PORT;
use crate::infrastructure::push::{FrontendEndpoints, DEFAULT_LOCAL_FRONTEND_URL};

use super::loader::{self, ConfigWarning};

/// Push configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushConfig {
    /// Give up on a push when bundling reports no progress for this long
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Timeout of each HTTP request (`--timeout` overrides)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay between progress polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl PushConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

fn default_idle_timeout_secs() -> u64 {
    180
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// Live reload configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveReloadConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_livereload_port")]
    pub port: u16,
}

impl Default for LiveReloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: DEFAULT_LIVERELOAD_PORT,
        }
    }
}

fn default_livereload_port() -> u16 {
    DEFAULT_LIVERELOAD_PORT
}

fn default_true() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Upload URI of the frontend
    #[serde(default)]
    pub frontend_url: Option<String>,

    /// Upload URI used with `--local`
    #[serde(default = "default_local_frontend_url")]
    pub local_frontend_url: String,

    #[serde(default)]
    pub push: PushConfig,

    #[serde(default)]
    pub livereload: LiveReloadConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frontend_url: None,
            local_frontend_url: default_local_frontend_url(),
            push: PushConfig::default(),
            livereload: LiveReloadConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_local_frontend_url() -> String {
    DEFAULT_LOCAL_FRONTEND_URL.to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> AppixResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> AppixResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load user and project config files, merged, without env overrides.
    pub fn load_layered(app_root: &Path) -> AppixResult<(Self, Vec<ConfigWarning>)> {
        let user = loader::user_config_path();
        loader::load_layered(user.as_deref(), Some(&app_root.join(loader::PROJECT_CONFIG_FILE)))
    }

    /// Apply environment variable overrides (APPIX_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Upload endpoints for the push pipeline
    pub fn endpoints(&self) -> FrontendEndpoints {
        FrontendEndpoints {
            frontend_url: self.frontend_url.clone(),
            local_frontend_url: self.local_frontend_url.clone(),
        }
    }
}
