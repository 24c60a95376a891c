// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Position lookups in a newest-first commit list.
//!
//! ```text
//! index:    0        1        2
//!          [C3]  -- [C2] --  [C1]
//!         newest             oldest
//!           ^  newer  |  older  v
//!         "last"              "first"
//! ```

use crate::git::commit::Commit;

/// Cached commit list, newest first, as `git log` returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitHistory {
    commits: Vec<Commit>,
}

impl CommitHistory {
    #[must_use]
    pub const fn new(commits: Vec<Commit>) -> Self {
        Self { commits }
    }

    /// Replace the whole list.
    pub fn replace(&mut self, commits: Vec<Commit>) {
        self.commits = commits;
    }

    pub fn clear(&mut self) {
        self.commits.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Commit] {
        &self.commits
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Commit> {
        self.commits.iter()
    }

    /// Index of the commit whose hash equals `hash` exactly.
    #[must_use]
    pub fn position(&self, hash: &str) -> Option<usize> {
        self.commits.iter().position(|c| c.hash() == hash)
    }

    #[must_use]
    pub fn get(&self, hash: &str) -> Option<&Commit> {
        self.position(hash).map(|i| &self.commits[i])
    }

    /// Neighbour one step toward the newest commit.
    #[must_use]
    pub fn newer_than(&self, hash: &str) -> Option<&Commit> {
        let index = self.position(hash)?;
        index.checked_sub(1).and_then(|i| self.commits.get(i))
    }

    /// Neighbour one step toward the oldest commit.
    #[must_use]
    pub fn older_than(&self, hash: &str) -> Option<&Commit> {
        let index = self.position(hash)?;
        self.commits.get(index + 1)
    }

    #[must_use]
    pub fn newest(&self) -> Option<&Commit> {
        self.commits.first()
    }

    #[must_use]
    pub fn oldest(&self) -> Option<&Commit> {
        self.commits.last()
    }
}

impl<'a> IntoIterator for &'a CommitHistory {
    type Item = &'a Commit;
    type IntoIter = std::slice::Iter<'a, Commit>;

    fn into_iter(self) -> Self::IntoIter {
        self.commits.iter()
    }
}
