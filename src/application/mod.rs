//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `WatchUseCase` - Runs the initial push, then the coalescing control loop

pub mod watch;

pub use watch::{
    resolve_app_path, DebounceTimer, PushCompletion, PushInvoker, WatchEvent, WatchOptions,
    WatchUseCase, DEBOUNCE_DELAY,
};
