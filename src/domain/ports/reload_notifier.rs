//! Reload Notifier Port
//!
//! Side-channel that tells connected browser pages to reload after a push.

use crate::error::AppixResult;

/// Trait for live-reload side-channels.
pub trait ReloadNotifier: Send + Sync {
    /// Start serving clients. Calling it more than once is a no-op.
    fn start(&self) -> AppixResult<()>;

    /// Ask every connected client to reload. Fire-and-forget.
    fn send_reload(&self);
}

/// Reload notifier that does nothing (live reload disabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReloadNotifier;

impl ReloadNotifier for NoopReloadNotifier {
    fn start(&self) -> AppixResult<()> {
        Ok(())
    }

    fn send_reload(&self) {}
}
