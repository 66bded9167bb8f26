//! Appix - watch an app folder and push it whenever changes settle
//!
//! Every burst of file changes results in exactly one push (package, upload,
//! wait for bundling). Changes that arrive while a push runs queue exactly one
//! follow-up push. Connected browser pages are reloaded over LiveReload.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{WatchEvent, WatchOptions, WatchUseCase};
pub use config::Config;
pub use error::{AppixError, AppixResult};
