//! Configuration module for Appix
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (APPIX_*)
//! 3. Project config (<app>/appix.toml)
//! 4. User config (~/.config/appix/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{
    load_layered, user_config_path, with_env_overrides, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{ColorMode, Config, LiveReloadConfig, OutputConfig, PushConfig};
