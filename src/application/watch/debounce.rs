//! One-shot debounce timer

use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Delay between the first change after idle and the push it triggers.
///
/// Long enough to fold the duplicate notifications that event sources and
/// editors emit for a single save into one push.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(100);

/// Fires a callback once, on its own thread, after a fixed delay.
///
/// There is no cancellation. The caller must not arm it again before the
/// previous callback ran; the watch loop guarantees this through
/// `WatcherState::InitialDelay`.
#[derive(Debug, Clone, Copy)]
pub struct DebounceTimer {
    delay: Duration,
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self {
            delay: DEBOUNCE_DELAY,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer. `on_expire` runs exactly once after the delay.
    ///
    /// If no timer thread can be started, `on_expire` runs immediately on the
    /// calling thread instead, so an armed timer always expires.
    pub fn arm<F>(&self, on_expire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.arm_with(on_expire, |job| {
            thread::Builder::new()
                .name("appix-debounce".to_string())
                .spawn(job)
                .map(drop)
        });
    }

    fn arm_with<F, S>(&self, on_expire: F, spawn: S)
    where
        F: FnOnce() + Send + 'static,
        S: FnOnce(Box<dyn FnOnce() + Send>) -> io::Result<()>,
    {
        let delay = self.delay;
        let slot = Arc::new(Mutex::new(Some(on_expire)));
        let timer_slot = Arc::clone(&slot);

        let job = Box::new(move || {
            thread::sleep(delay);
            if let Some(on_expire) = take(&timer_slot) {
                on_expire();
            }
        });

        if let Err(e) = spawn(job) {
            log::error!("failed to spawn debounce timer thread, expiring now: {e}");
            if let Some(on_expire) = take(&slot) {
                on_expire();
            }
        }
    }
}

fn take<F>(slot: &Mutex<Option<F>>) -> Option<F> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}
