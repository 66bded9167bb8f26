//! Domain Entities
//!
//! - `ChangeEvent` - A single filesystem change notification
//! - `PushRun` - One execution of the push pipeline

mod change_event;
mod push_run;

pub use change_event::{ChangeEvent, ChangeKind};
pub use push_run::{PushRun, PushRunId, PushTrigger};
