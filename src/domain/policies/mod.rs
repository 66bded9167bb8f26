//! Domain Policies
//!
//! Business rules and policies that govern behavior.
//! These are pure functions that operate on domain values.

mod event_filter;

pub use event_filter::{is_builtin_ignored, EventFilter};
