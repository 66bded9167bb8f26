//! Event Filter Policy
//!
//! Decides whether a change notification is relevant to the watch session.
//! Pure predicate over the path relative to the watched root; unknown paths
//! are always relevant.

use std::path::{Component, Path};

use crate::domain::value_objects::IgnorePatterns;

/// Version-control metadata directories.
const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn", ".bzr", "_darcs", "CVS"];

/// Build and dependency output directories.
const OUTPUT_DIRS: &[&str] = &["node_modules", "dist", "build", "target", ".appix"];

/// Exact file names written by editors and file managers.
const TEMP_FILE_NAMES: &[&str] = &["4913", ".DS_Store", "Thumbs.db"];

/// File suffixes of editor swap/backup files and packaged apps.
const IGNORED_SUFFIXES: &[&str] = &[".swp", ".swo", ".swx", ".tmp", "~", ".zap"];

/// Relevance filter combining the built-in rules with `.appixignore` patterns.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    patterns: IgnorePatterns,
}

impl EventFilter {
    pub fn new(patterns: IgnorePatterns) -> Self {
        Self { patterns }
    }

    /// Filter with built-in rules only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// True when a change at `rel_path` must not trigger a push.
    pub fn should_ignore(&self, rel_path: &Path) -> bool {
        is_builtin_ignored(rel_path) || self.patterns.is_ignored(rel_path, false)
    }

    pub fn patterns(&self) -> &IgnorePatterns {
        &self.patterns
    }
}

/// Built-in ignore rules: VCS metadata, build output, editor temp files.
pub fn is_builtin_ignored(rel_path: &Path) -> bool {
    let mut components = rel_path.components().peekable();
    while let Some(component) = components.next() {
        let Component::Normal(name) = component else {
            continue;
        };
        let Some(name) = name.to_str() else {
            continue;
        };

        if VCS_DIRS.contains(&name) || OUTPUT_DIRS.contains(&name) {
            return true;
        }

        // Only the last component is a file name
        if components.peek().is_none() && is_temp_file_name(name) {
            return true;
        }
    }
    false
}

fn is_temp_file_name(name: &str) -> bool {
    if TEMP_FILE_NAMES.contains(&name) {
        return true;
    }
    if IGNORED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return true;
    }
    // emacs lock files and autosaves
    name.starts_with(".#") || (name.len() > 1 && name.starts_with('#') && name.ends_with('#'))
}
