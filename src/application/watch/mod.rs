//! Watch Use Case
//!
//! Watches an app folder and pushes it whenever changes settle.
//! It orchestrates:
//! - One synchronous push at startup
//! - Relevance filtering of change notifications
//! - Debouncing (100ms, fixed)
//! - Coalescing of changes that arrive while a push runs
//!
//! ## Architecture
//!
//! - `WatchUseCase` - Control loop; sole owner of the `Coalescer`
//! - `DebounceTimer` - One-shot timer delivering "debounce expired"
//! - `PushInvoker` - Runs pushes off the loop and reports completion
//! - `WatchEvent` - Events emitted during the watch session
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(options, filter, pipeline, notifier);
//! use_case.start(changes_rx, shutdown_rx, |event| { ... });
//! ```

mod debounce;
mod event;
mod invoker;
mod use_case;


pub use debounce::{DebounceTimer, DEBOUNCE_DELAY};
pub use event::{resolve_app_path, WatchEvent, WatchOptions};
pub use invoker::{PushCompletion, PushInvoker};
pub use use_case::WatchUseCase;
