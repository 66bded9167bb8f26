//! Watcher state value object
//!
//! ```text
//!                              file change event
//! initial state                     received
//!   -------------> WAITING ------------------------> INITIAL_DELAY
//!                     ^                                    |
//!                     |                                    | 100ms passed, start push
//!                     |          push completed            v
//!                      -------------------------------- PUSHING
//!                                                        ^   |
//!                                         push completed |   | file change event received
//!                                     start another push |   v
//!                                                 PUSHING_AND_GOT_EVENT
//! ```

use serde::Serialize;

/// Coalescing state of a watch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WatcherState {
    /// Idle; no timer armed, no push running
    #[default]
    Waiting,
    /// A debounce timer is armed
    InitialDelay,
    /// A push is running and nothing changed since it started
    Pushing,
    /// A push is running and at least one change arrived since it started
    PushingAndGotEvent,
}

impl WatcherState {
    /// True while a push run is in flight.
    pub fn is_pushing(&self) -> bool {
        matches!(self, WatcherState::Pushing | WatcherState::PushingAndGotEvent)
    }

    /// True while the debounce timer is armed.
    pub fn is_debouncing(&self) -> bool {
        matches!(self, WatcherState::InitialDelay)
    }
}

impl std::fmt::Display for WatcherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatcherState::Waiting => write!(f, "waiting"),
            WatcherState::InitialDelay => write!(f, "initial_delay"),
            WatcherState::Pushing => write!(f, "pushing"),
            WatcherState::PushingAndGotEvent => write!(f, "pushing_and_got_event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_waiting() {
        assert_eq!(WatcherState::default(), WatcherState::Waiting);
    }

    #[test]
    fn pushing_states() {
        assert!(!WatcherState::Waiting.is_pushing());
        assert!(!WatcherState::InitialDelay.is_pushing());
        assert!(WatcherState::Pushing.is_pushing());
        assert!(WatcherState::PushingAndGotEvent.is_pushing());
    }

    #[test]
    fn only_initial_delay_is_debouncing() {
        assert!(WatcherState::InitialDelay.is_debouncing());
        assert!(!WatcherState::PushingAndGotEvent.is_debouncing());
    }
}
