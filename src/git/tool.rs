// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations used by the session.
//!
//! ```text
//! query     --> runner --> exit code --> stdout (trimmed)
//! mutation  --> runner --> exit code --> Classifier(stderr) --> ()
//! payload   --> runner --> exit code --> parse_log / parse_branches
//! config    --> runner --> exit 1 = unset
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use super::backend::GitRunner;
use super::classify::Classifier;
use super::commit::{self, Commit, LOG_FORMAT};
use crate::error::{BrowseError, BrowseResult, FsError, ProcessError};

/// Git commands over a [`GitRunner`].
#[derive(Debug, Clone)]
pub struct GitTool<R> {
    runner: R,
    classifier: Classifier,
}

impl<R: GitRunner> GitTool<R> {
    pub const fn new(runner: R, classifier: Classifier) -> Self {
        Self { runner, classifier }
    }

    pub const fn runner(&self) -> &R {
        &self.runner
    }

    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    async fn query(&self, args: &[&str], cwd: &Path) -> BrowseResult<String> {
        let output = self.runner.git(args, Some(cwd)).await?;
        Ok(output.stdout().trim().to_string())
    }

    async fn mutate(&self, command: &str, args: &[&str], cwd: Option<&Path>) -> BrowseResult<()> {
        let output = self.runner.git(args, cwd).await?;
        let stderr = self.classifier.classify(command, output.stderr())?;
        if !stderr.is_empty() {
            debug!(command, stderr = %stderr, "git reported");
        }
        Ok(())
    }

    /// Root of the work tree containing `cwd`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if `cwd` is not inside a work tree.
    pub async fn toplevel(&self, cwd: &Path) -> BrowseResult<PathBuf> {
        let root = self.query(&["rev-parse", "--show-toplevel"], cwd).await?;
        Ok(PathBuf::from(root))
    }

    /// URL configured for `remote`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the remote does not exist.
    pub async fn remote_url(&self, repo: &Path, remote: &str) -> BrowseResult<String> {
        self.query(&["remote", "get-url", remote], repo).await
    }

    /// Full hash of the checked-out commit.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if HEAD does not resolve (e.g. no commits yet).
    pub async fn head_hash(&self, repo: &Path) -> BrowseResult<String> {
        self.query(&["rev-parse", "HEAD"], repo).await
    }

    /// Short name of the checked-out branch, `HEAD` when detached.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if HEAD does not resolve.
    pub async fn head_branch(&self, repo: &Path) -> BrowseResult<String> {
        self.query(&["rev-parse", "--abbrev-ref", "HEAD"], repo).await
    }

    /// Clone `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` or `GitError::ToolFailure` if the clone fails.
    pub async fn clone_into(&self, url: &str, dest: &Path) -> BrowseResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| FsError::IoError {
            path: dest.display().to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path is not valid UTF-8",
            ),
        })?;
        self.mutate("clone", &["clone", "--verbose", url, dest_str], None)
            .await
    }

    /// Fetch all refs of the default remote.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` or `GitError::ToolFailure` if the fetch fails.
    pub async fn fetch(&self, repo: &Path) -> BrowseResult<()> {
        self.mutate("fetch", &["fetch", "--prune"], Some(repo)).await
    }

    /// Fast-forward the checked-out branch from its upstream.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` or `GitError::ToolFailure` if the pull fails.
    pub async fn pull(&self, repo: &Path) -> BrowseResult<()> {
        self.mutate("pull", &["pull", "--ff-only"], Some(repo)).await
    }

    /// Check out a commit or branch.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` or `GitError::ToolFailure` if the checkout fails.
    pub async fn checkout(&self, repo: &Path, what: &str) -> BrowseResult<()> {
        self.mutate(
            "checkout",
            &["-c", "advice.detachedHead=false", "checkout", what],
            Some(repo),
        )
        .await
    }

    /// History reachable from `rev`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git fails or `GitError::MalformedLog` if
    /// a line cannot be parsed.
    pub async fn log(&self, repo: &Path, rev: &str) -> BrowseResult<Vec<Commit>> {
        let output = self
            .runner
            .git(&["log", LOG_FORMAT, rev, "--"], Some(repo))
            .await?;
        Ok(commit::parse_log(output.stdout())?)
    }

    /// Value of a repository config key, `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git fails for any other reason.
    pub async fn config_get(&self, repo: &Path, key: &str) -> BrowseResult<Option<String>> {
        match self.query(&["config", "--get", key], repo).await {
            Ok(value) => Ok(Some(value)),
            // `git config --get` exits 1 for a missing key
            Err(BrowseError::Process(err))
                if matches!(*err, ProcessError::NonZeroExit { code: 1, .. }) =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Write a repository config key.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` or `GitError::ToolFailure` if git refuses.
    pub async fn config_set(&self, repo: &Path, key: &str, value: &str) -> BrowseResult<()> {
        self.mutate("config", &["config", key, value], Some(repo))
            .await
    }

    /// Local and remote-tracking branches, oldest commit date first.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git fails.
    pub async fn branches(&self, repo: &Path, remote: &str) -> BrowseResult<Vec<String>> {
        let remote_refs = format!("refs/remotes/{remote}/");
        let output = self
            .runner
            .git(
                &[
                    "for-each-ref",
                    "--sort=committerdate",
                    "--format=%(refname)",
                    "refs/heads/",
                    &remote_refs,
                ],
                Some(repo),
            )
            .await?;
        Ok(commit::parse_branches(output.stdout(), remote))
    }
}
