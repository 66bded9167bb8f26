//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod ignore_patterns;
mod watcher_state;

pub use ignore_patterns::{IgnoreError, IgnorePatterns, IGNORE_FILE_NAME};
pub use watcher_state::WatcherState;
