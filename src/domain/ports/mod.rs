//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod push_pipeline;
pub mod reload_notifier;

pub use push_pipeline::{PushError, PushPipeline, PushReport, PushRequest};
pub use reload_notifier::{NoopReloadNotifier, ReloadNotifier};
