//! Change event entity - one notification from the filesystem event source

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Kind of filesystem change.
///
/// Informational only: the coalescing state machine reacts to the presence of
/// a notification, never to its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Modify,
    Remove,
    Rename,
    Other,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Create => write!(f, "create"),
            ChangeKind::Modify => write!(f, "modify"),
            ChangeKind::Remove => write!(f, "remove"),
            ChangeKind::Rename => write!(f, "rename"),
            ChangeKind::Other => write!(f, "other"),
        }
    }
}

/// A filesystem change notification (absolute path as delivered by the source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    path: PathBuf,
    kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Path relative to the watched root.
    ///
    /// Returns `None` when the notification is not under `root`; the caller
    /// logs and discards such events.
    pub fn relative_to(&self, root: &Path) -> Option<&Path> {
        self.path.strip_prefix(root).ok()
    }
}
