//! File system integration
//!
//! - `NotifyEventSource` - Recursive change notifications via `notify`

mod notify_source;

pub use notify_source::{change_kind, NotifyEventSource};
