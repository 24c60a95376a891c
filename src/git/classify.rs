// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Failure markers in git's text output.
//!
//! Git reports some failures (a refused checkout, an unreachable remote) only
//! as text. The classifier turns such text into [`GitError::ToolFailure`].
//!
//! ```text
//! match_at_start = true       "  fatal: bad object"  --> flagged
//!   (per line, leading ws     "warning: fatal stuff" --> ok
//!    ignored)
//! match_at_start = false      "warning: fatal stuff" --> flagged
//! ```
//!
//! Only stderr of mutating commands is classified. Log and branch payloads
//! are data and are never scanned.

use std::collections::BTreeSet;

use crate::config::types::GitConfig;
use crate::error::GitError;

/// Scans captured text for failure markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    markers: BTreeSet<String>,
    trim: bool,
    match_at_start: bool,
}

impl Classifier {
    /// Create a classifier that trims its output and matches at line starts.
    ///
    /// Blank markers are ignored.
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.trim().is_empty())
                .collect(),
            trim: true,
            match_at_start: true,
        }
    }

    #[must_use]
    pub fn from_config(config: &GitConfig) -> Self {
        Self::new(config.error_markers.iter().cloned())
    }

    /// Whether accepted text is returned whitespace-trimmed.
    #[must_use]
    pub const fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Match markers as line prefixes instead of anywhere in the text.
    #[must_use]
    pub const fn match_at_start(mut self, match_at_start: bool) -> Self {
        self.match_at_start = match_at_start;
        self
    }

    #[must_use]
    pub const fn markers(&self) -> &BTreeSet<String> {
        &self.markers
    }

    /// Return the first marker found in `text`, if any.
    #[must_use]
    pub fn find_marker(&self, text: &str) -> Option<&str> {
        if self.match_at_start {
            text.lines().find_map(|line| {
                let line = line.trim_start();
                self.markers
                    .iter()
                    .find(|m| line.starts_with(m.as_str()))
                    .map(String::as_str)
            })
        } else {
            self.markers
                .iter()
                .find(|m| text.contains(m.as_str()))
                .map(String::as_str)
        }
    }

    /// Pass `text` through, or fail if it carries a marker.
    ///
    /// # Errors
    ///
    /// Returns `GitError::ToolFailure` with the (trimmed) text when a marker
    /// is found.
    pub fn classify(&self, command: &str, text: &str) -> Result<String, GitError> {
        if self.find_marker(text).is_some() {
            return Err(GitError::ToolFailure {
                command: command.to_string(),
                output: text.trim().to_string(),
            });
        }
        Ok(if self.trim {
            text.trim().to_string()
        } else {
            text.to_string()
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&GitConfig::default())
    }
}
