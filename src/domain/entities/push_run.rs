//! Push run entity - one execution of the push pipeline

use serde::Serialize;

/// Identity of a push run. Monotonically increasing within a watch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PushRunId(u64);

impl PushRunId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for PushRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What caused a push run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PushTrigger {
    /// The synchronous push performed once at startup
    Initial,
    /// A push started by the coalescing state machine
    Change,
}

/// A single push run request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushRun {
    pub id: PushRunId,
    pub trigger: PushTrigger,
    pub open_browser: bool,
}

impl PushRun {
    /// The startup push. Opens the browser unless suppressed.
    pub fn initial(id: PushRunId, no_browser: bool) -> Self {
        Self {
            id,
            trigger: PushTrigger::Initial,
            open_browser: !no_browser,
        }
    }

    /// A change-triggered push. Never opens the browser.
    pub fn on_change(id: PushRunId) -> Self {
        Self {
            id,
            trigger: PushTrigger::Change,
            open_browser: false,
        }
    }

    /// Connected pages are reloaded after every change-triggered run, whether
    /// the push succeeded or not. The startup push never reloads.
    pub fn sends_reload(&self) -> bool {
        self.trigger == PushTrigger::Change
    }
}
