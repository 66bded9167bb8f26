//! Ignore patterns value object
//!
//! Handles loading and matching `.appixignore` patterns using gitignore semantics.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the per-app ignore file
pub const IGNORE_FILE_NAME: &str = ".appixignore";

/// Maximum file size for `.appixignore` (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Patterns loaded from a `.appixignore` file.
///
/// Uses the `ignore` crate for gitignore-compatible pattern matching.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Load patterns from `.appixignore` in the given app directory.
    ///
    /// Returns `Ok(empty)` if the file doesn't exist.
    /// Returns `Err` if the file is too large, has too many patterns, or contains invalid syntax.
    pub fn load(app_root: &Path) -> Result<Self, IgnoreError> {
        let ignore_path = app_root.join(IGNORE_FILE_NAME);

        if !ignore_path.exists() {
            return Ok(Self::empty());
        }

        let metadata = fs::metadata(&ignore_path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(IgnoreError::FileTooLarge {
                path: ignore_path,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(&ignore_path)?;
        Self::from_content(app_root, &ignore_path, &content)
    }

    /// Parse patterns from string content.
    pub fn from_content(
        root: &Path,
        source_path: &Path,
        content: &str,
    ) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    path: source_path.to_path_buf(),
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            if let Err(e) = builder.add_line(Some(source_path.to_path_buf()), line) {
                return Err(IgnoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: line_num + 1,
                    pattern: line.to_string(),
                    message: e.to_string(),
                });
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check if a path (relative to the app root) is ignored.
    ///
    /// `is_dir` should be true if the path is a directory.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        if self.is_empty() || rel_path.as_os_str().is_empty() || rel_path.has_root() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check if this is an empty pattern set.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors that can occur when loading ignore patterns.
#[derive(Debug, Error)]
pub enum IgnoreError {
    /// The `.appixignore` file exceeds the size limit.
    #[error(".appixignore exceeds {}KB limit ({size} bytes): {}", .limit / 1024, .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Too many patterns in the file.
    #[error(".appixignore has {count} patterns, exceeds {limit} limit: {}", .path.display())]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    /// A pattern has invalid syntax.
    #[error("invalid pattern at {}:{line}: '{pattern}' - {message}", .path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    /// Failed to build the gitignore matcher.
    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(String),

    /// IO error reading the file.
    #[error("IO error reading .appixignore: {0}")]
    Io(#[from] std::io::Error),
}
