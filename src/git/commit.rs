// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit records and the text formats git produces them from.
//!
//! ```text
//! git log --pretty=format:%H%x1f%s%x1f%an
//!   <hash> US <subject> US <author>      (US = 0x1f)
//!            |
//!            v  parse_log()
//!   Commit { hash, message, author }     newest first
//!
//! git for-each-ref --format=%(refname) refs/heads/ refs/remotes/<remote>/
//!   refs/heads/main
//!   refs/remotes/origin/HEAD     --> dropped
//!   refs/remotes/origin/main     --> "main" (already listed)
//!   refs/remotes/origin/topic    --> "topic"
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::error::GitError;

/// Field separator in log output (ASCII unit separator).
pub const FIELD_SEPARATOR: char = '\x1f';

/// `--pretty` argument producing one [`Commit`] per line.
pub const LOG_FORMAT: &str = "--pretty=format:%H%x1f%s%x1f%an";

/// One entry of the commit history. Identity is the hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Commit {
    hash: String,
    message: String,
    author: String,
}

impl Commit {
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            author: author.into(),
        }
    }

    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Subject line of the commit message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }
}

/// `<hash> - <author> <message>`
impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {}", self.hash, self.author, self.message)
    }
}

/// Parse `git log` output written with [`LOG_FORMAT`].
///
/// Blank lines are skipped. A subject may be empty; a line without both
/// separators is rejected.
///
/// # Errors
///
/// Returns `GitError::MalformedLog` with the 1-based line number.
pub fn parse_log(raw: &str) -> Result<Vec<Commit>, GitError> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let mut fields = line.splitn(3, FIELD_SEPARATOR);
            match (fields.next(), fields.next(), fields.next()) {
                (Some(hash), Some(message), Some(author)) if !hash.trim().is_empty() => Ok(
                    Commit::new(hash.trim(), message.trim(), author.trim()),
                ),
                _ => Err(GitError::MalformedLog {
                    line: idx + 1,
                    content: line.to_string(),
                }),
            }
        })
        .collect()
}

/// Turn full ref names into branch names for the given remote.
///
/// Input order is kept and the first ref of each name wins, so a local branch
/// and its remote-tracking twin appear once. `HEAD`, blank lines and refs
/// outside `refs/heads/` and `refs/remotes/<remote>/` are dropped.
#[must_use]
pub fn parse_branches(raw: &str, remote: &str) -> Vec<String> {
    let remote_prefix = format!("refs/remotes/{remote}/");
    let mut seen = BTreeSet::new();
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|refname| {
            refname
                .strip_prefix("refs/heads/")
                .or_else(|| refname.strip_prefix(remote_prefix.as_str()))
        })
        .filter(|name| *name != "HEAD")
        .filter(|name| seen.insert(name.to_string()))
        .map(String::from)
        .collect()
}
