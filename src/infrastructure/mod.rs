//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Filesystem event source (`notify`)
//! - `push/` - HTTP push pipeline (packaging, upload, progress polling)
//! - `livereload/` - LiveReload WebSocket server

pub mod fs;
pub mod livereload;
pub mod push;

// Re-export for convenience
pub use fs::NotifyEventSource;
pub use livereload::LiveReloadServer;
pub use push::{FrontendEndpoints, HttpPushPipeline};
