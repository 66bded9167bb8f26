//! Filesystem event source backed by `notify`

use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::entities::{ChangeEvent, ChangeKind};
use crate::error::{AppixError, AppixResult};

/// Recursive watch on an app folder.
///
/// Notifications are forwarded as [`ChangeEvent`]s with absolute paths; the
/// watch stops when this value is dropped.
pub struct NotifyEventSource {
    root: PathBuf,
    _watcher: RecommendedWatcher,
}

impl NotifyEventSource {
    /// Start watching `root` recursively. `root` must be absolute.
    pub fn start(root: &Path, sink: Sender<ChangeEvent>) -> AppixResult<Self> {
        let watch_failed = |e: notify::Error| AppixError::WatchFailed {
            path: root.to_path_buf(),
            message: e.to_string(),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    let Some(kind) = change_kind(&event.kind) else {
                        return;
                    };
                    for path in event.paths {
                        // The receiver is gone once the watch loop returned
                        let _ = sink.send(ChangeEvent::new(path, kind));
                    }
                }
                Err(e) => log::warn!("watch error: {e}"),
            },
            Config::default(),
        )
        .map_err(watch_failed)?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(watch_failed)?;

        log::debug!("watching {} recursively", root.display());
        Ok(Self {
            root: root.to_path_buf(),
            _watcher: watcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Map a notify event kind to a [`ChangeKind`].
///
/// Access events are dropped: packaging the app reads every file, and those
/// reads must not look like changes.
pub fn change_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Access(_) => None,
        EventKind::Create(_) => Some(ChangeKind::Create),
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Rename),
        EventKind::Modify(_) => Some(ChangeKind::Modify),
        EventKind::Remove(_) => Some(ChangeKind::Remove),
        EventKind::Any | EventKind::Other => Some(ChangeKind::Other),
    }
}
