//! Change-coalescing state machine
//!
//! Decides, for each input of a watch session, whether to arm the debounce
//! timer, start a push, or remember that another push is needed once the
//! running one finishes. It never performs the action itself: every input
//! returns at most one [`Command`] that the control loop executes.
//!
//! Inputs must be fed one at a time, in arrival order, from the single
//! thread that owns the `Coalescer`.

use crate::domain::entities::{PushRun, PushRunId};
use crate::domain::value_objects::WatcherState;

/// Action requested by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Arm the debounce timer; it will deliver one "debounce expired" input
    ArmDebounce,
    /// Start the given push run without waiting for it
    StartPush(PushRun),
}

/// Counters over the life of a session, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoalescerStats {
    /// Relevant change notifications received
    pub changes: u64,
    /// Changes that did not cause a transition
    pub absorbed: u64,
    /// Push runs started by the state machine
    pub pushes_started: u64,
    /// Push runs started back-to-back to cover mid-push changes
    pub rerun_pushes: u64,
}

/// Owner of the [`WatcherState`] of one watch session.
#[derive(Debug)]
pub struct Coalescer {
    state: WatcherState,
    in_flight: Option<PushRunId>,
    next_id: PushRunId,
    stats: CoalescerStats,
}

impl Coalescer {
    /// Create a state machine in `Waiting`. Push runs it starts are numbered
    /// from `first_id`.
    pub fn new(first_id: PushRunId) -> Self {
        Self {
            state: WatcherState::Waiting,
            in_flight: None,
            next_id: first_id,
            stats: CoalescerStats::default(),
        }
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// The push run currently executing, if any.
    pub fn in_flight(&self) -> Option<PushRunId> {
        self.in_flight
    }

    pub fn stats(&self) -> CoalescerStats {
        self.stats
    }

    /// A relevant change notification arrived.
    #[must_use]
    pub fn on_change(&mut self) -> Option<Command> {
        self.stats.changes += 1;
        match self.state {
            WatcherState::Waiting => {
                self.state = WatcherState::InitialDelay;
                Some(Command::ArmDebounce)
            }
            WatcherState::Pushing => {
                self.state = WatcherState::PushingAndGotEvent;
                None
            }
            WatcherState::InitialDelay | WatcherState::PushingAndGotEvent => {
                self.stats.absorbed += 1;
                None
            }
        }
    }

    /// The debounce timer armed from `InitialDelay` fired.
    #[must_use]
    pub fn on_debounce_expired(&mut self) -> Option<Command> {
        if self.state != WatcherState::InitialDelay {
            self.invariant_violation("debounce expired");
            return None;
        }
        Some(self.start_push())
    }

    /// The push run `id` finished (successfully or not).
    #[must_use]
    pub fn on_push_completed(&mut self, id: PushRunId) -> Option<Command> {
        if self.in_flight != Some(id) {
            self.invariant_violation("push completed");
            return None;
        }

        match self.state {
            WatcherState::PushingAndGotEvent => {
                self.stats.rerun_pushes += 1;
                Some(self.start_push())
            }
            WatcherState::Pushing => {
                self.state = WatcherState::Waiting;
                self.in_flight = None;
                None
            }
            WatcherState::Waiting | WatcherState::InitialDelay => {
                self.invariant_violation("push completed");
                None
            }
        }
    }

    fn start_push(&mut self) -> Command {
        let run = PushRun::on_change(self.next_id);
        self.next_id = self.next_id.next();
        self.state = WatcherState::Pushing;
        self.in_flight = Some(run.id);
        self.stats.pushes_started += 1;
        Command::StartPush(run)
    }

    fn invariant_violation(&self, input: &str) {
        if cfg!(debug_assertions) {
            panic!(
                "[BUG] {input} while {} (in flight: {:?})",
                self.state, self.in_flight
            );
        }
        log::error!(
            "[BUG] {input} while {} (in flight: {:?}); input ignored",
            self.state,
            self.in_flight
        );
    }
}
