// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository session: the sandbox, the cached lists and the current position.
//!
//! ```text
//!  open()  --> repo root, remote URL, original HEAD/branch
//!    |
//!    v
//!  materialize_sandbox(force)
//!    <root>/<dir>/.git missing --> mkdir + clone
//!    force                      --> rm -rf + mkdir + clone
//!    fetch --> current hash, browsed branch, commits, branches
//!    |
//!    v
//!  move_to(hash) <-- next / prev / first / last
//!  switch_branch(name) --> checkout + pull --> record branch --> refresh
//!    |
//!    v
//!  clean() --> rm -rf sandbox, caches cleared, position reset
//! ```
//!
//! The caller's own work tree is only ever read. Every checkout happens
//! inside the sandbox clone.
//!
//! The commit list is read from the browsed branch, recorded in the sandbox's
//! git config, so a detached HEAD left by an earlier run still sees the
//! commits newer than itself.

pub mod history;


use std::path::{Path, PathBuf};

use bon::Builder;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{BrowseError, BrowseResult, FsError, GitError};
use crate::git::backend::GitRunner;
use crate::git::commit::Commit;
use crate::git::tool::GitTool;

use history::CommitHistory;

/// Marker whose presence means the sandbox holds a clone.
const SANDBOX_MARKER: &str = ".git";

/// Sandbox config key naming the branch whose history is browsed.
pub const BROWSED_BRANCH_KEY: &str = "browse.branch";

/// Where a session starts and what it clones.
#[derive(Debug, Clone, Builder)]
pub struct SessionOptions {
    /// Any directory inside the caller's repository.
    #[builder(into)]
    cwd: PathBuf,
    /// Remote whose URL is cloned into the sandbox.
    #[builder(into, default = "origin".to_string())]
    remote: String,
    /// Sandbox directory name under the repository root.
    #[builder(into, default = ".sandbox".to_string())]
    sandbox_dir: String,
}

impl SessionOptions {
    #[must_use]
    pub fn from_config(config: &Config, cwd: impl Into<PathBuf>) -> Self {
        Self::builder()
            .cwd(cwd)
            .remote(config.git.remote.clone())
            .sandbox_dir(config.sandbox.dir_name.clone())
            .build()
    }
}

/// One browsing session over a sandboxed clone of the caller's repository.
#[derive(Debug)]
pub struct Session<R> {
    git: GitTool<R>,
    repo_root: PathBuf,
    sandbox_root: PathBuf,
    remote: String,
    remote_url: String,
    original_hash: String,
    original_branch: String,
    current_hash: String,
    browsed_branch: Option<String>,
    commits: CommitHistory,
    branches: Vec<String>,
}

impl<R: GitRunner> Session<R> {
    /// Read the caller's repository metadata.
    ///
    /// Nothing is cloned yet; see [`Session::materialize_sandbox`].
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepository` if `cwd` is outside a work tree,
    /// or the underlying git error if the remote or HEAD cannot be read.
    pub async fn open(git: GitTool<R>, options: SessionOptions) -> BrowseResult<Self> {
        let repo_root = git
            .toplevel(&options.cwd)
            .await
            .map_err(|e| GitError::NotARepository {
                path: options.cwd.display().to_string(),
                source: Box::new(e),
            })?;
        let remote_url = git.remote_url(&repo_root, &options.remote).await?;
        let original_hash = git.head_hash(&repo_root).await?;
        let original_branch = git.head_branch(&repo_root).await?;
        let sandbox_root = repo_root.join(&options.sandbox_dir);

        debug!(
            repo = %repo_root.display(),
            remote = %remote_url,
            branch = %original_branch,
            commit = %original_hash,
            "session opened"
        );

        Ok(Self {
            git,
            repo_root,
            sandbox_root,
            remote: options.remote,
            remote_url,
            current_hash: original_hash.clone(),
            original_hash,
            original_branch,
            browsed_branch: None,
            commits: CommitHistory::default(),
            branches: Vec::new(),
        })
    }

    // --- Accessors ---

    pub const fn git(&self) -> &GitTool<R> {
        &self.git
    }

    #[must_use]
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    #[must_use]
    pub fn sandbox_root(&self) -> &Path {
        &self.sandbox_root
    }

    #[must_use]
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    #[must_use]
    pub fn original_hash(&self) -> &str {
        &self.original_hash
    }

    #[must_use]
    pub fn original_branch(&self) -> &str {
        &self.original_branch
    }

    /// Hash checked out in the sandbox after the last successful operation.
    #[must_use]
    pub fn current_hash(&self) -> &str {
        &self.current_hash
    }

    /// Branch the commit list is read from; `None` means from HEAD.
    #[must_use]
    pub fn browsed_branch(&self) -> Option<&str> {
        self.browsed_branch.as_deref()
    }

    /// Cached entry for the current hash, if it is in the commit list.
    #[must_use]
    pub fn current_commit(&self) -> Option<&Commit> {
        self.commits.get(&self.current_hash)
    }

    #[must_use]
    pub const fn commits(&self) -> &CommitHistory {
        &self.commits
    }

    #[must_use]
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    /// Whether the sandbox holds a clone.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.sandbox_root.join(SANDBOX_MARKER).exists()
    }

    // --- Sandbox lifecycle ---

    /// Make sure the sandbox holds an up-to-date clone, then reload all caches.
    ///
    /// An existing clone is reused unless `force` is set, in which case the
    /// directory is removed and cloned again.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Sandbox` if the directory cannot be prepared or the
    /// clone fails, the git error if the fetch fails, and `GitError::Refresh`
    /// if a listing fails.
    pub async fn materialize_sandbox(&mut self, force: bool) -> BrowseResult<()> {
        if force && self.sandbox_root.exists() {
            info!(path = %self.sandbox_root.display(), "removing sandbox");
            std::fs::remove_dir_all(&self.sandbox_root)
                .map_err(|e| self.sandbox_error("cannot remove directory", e.into()))?;
        }

        if self.is_materialized() {
            debug!(path = %self.sandbox_root.display(), "reusing sandbox");
        } else {
            std::fs::create_dir_all(&self.sandbox_root)
                .map_err(|e| self.sandbox_error("cannot create directory", e.into()))?;
            info!(url = %self.remote_url, path = %self.sandbox_root.display(), "cloning");
            self.git
                .clone_into(&self.remote_url, &self.sandbox_root)
                .await
                .map_err(|e| self.sandbox_error("clone failed", e))?;
            info!(path = %self.sandbox_root.display(), "cloned");
        }

        self.git.fetch(&self.sandbox_root).await?;
        self.reload_current_hash().await?;
        self.load_browsed_branch().await?;
        self.refresh().await
    }

    /// Reload the commit list of the browsed branch from the sandbox.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Refresh` if `git log` fails or cannot be parsed.
    pub async fn refresh_commit_list(&mut self) -> BrowseResult<()> {
        let rev = self
            .browsed_branch
            .as_ref()
            .map_or_else(|| "HEAD".to_string(), |name| format!("refs/heads/{name}"));
        let commits = self
            .git
            .log(&self.sandbox_root, &rev)
            .await
            .map_err(|e| refresh_error("commit list", e))?;
        debug!(count = commits.len(), "commit list refreshed");
        self.commits.replace(commits);
        Ok(())
    }

    /// Reload the branch list from the sandbox.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Refresh` if `git for-each-ref` fails.
    pub async fn refresh_branch_list(&mut self) -> BrowseResult<()> {
        let branches = self
            .git
            .branches(&self.sandbox_root, &self.remote)
            .await
            .map_err(|e| refresh_error("branch list", e))?;
        debug!(count = branches.len(), "branch list refreshed");
        self.branches = branches;
        Ok(())
    }

    /// Reload both lists together.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Refresh` if either listing fails.
    pub async fn refresh(&mut self) -> BrowseResult<()> {
        self.refresh_commit_list().await?;
        self.refresh_branch_list().await
    }

    /// Remove the sandbox and forget everything read from it.
    ///
    /// The caller's repository was never checked out by the session, so it
    /// is still on [`Session::original_branch`]. Calling this twice is fine.
    ///
    /// # Errors
    ///
    /// Returns `FsError::IoError` if the directory exists but cannot be removed.
    pub fn clean(&mut self) -> BrowseResult<()> {
        if self.sandbox_root.exists() {
            std::fs::remove_dir_all(&self.sandbox_root).map_err(|e| FsError::IoError {
                path: self.sandbox_root.display().to_string(),
                source: e,
            })?;
            info!(path = %self.sandbox_root.display(), "sandbox removed");
        }
        self.commits.clear();
        self.branches.clear();
        self.browsed_branch = None;
        self.current_hash.clone_from(&self.original_hash);
        info!(
            branch = %self.original_branch,
            commit = %self.original_hash,
            "repository left on original position"
        );
        Ok(())
    }

    // --- Navigation ---

    /// Check out `hash` in the sandbox and record where HEAD ended up.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Sandbox` without a clone, `GitError::CheckoutFailed`
    /// if git refuses, and `GitError::Refresh` if HEAD cannot be read back.
    pub async fn move_to(&mut self, hash: &str) -> BrowseResult<()> {
        self.ensure_sandbox()?;
        self.git
            .checkout(&self.sandbox_root, hash)
            .await
            .map_err(|e| GitError::CheckoutFailed {
                what: hash.to_string(),
                source: Box::new(e),
            })?;
        let previous = self.current_hash.clone();
        self.reload_current_hash().await?;
        info!(from = %previous, to = %self.current_hash, "moved");
        Ok(())
    }

    /// Check out branch `name`, bring it up to date and reload both lists.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` or `GitError::PullFailed` for the
    /// respective step, `GitError::Refresh` if a reload fails.
    pub async fn switch_branch(&mut self, name: &str) -> BrowseResult<()> {
        self.ensure_sandbox()?;
        self.git
            .checkout(&self.sandbox_root, name)
            .await
            .map_err(|e| GitError::CheckoutFailed {
                what: name.to_string(),
                source: Box::new(e),
            })?;
        self.git
            .pull(&self.sandbox_root)
            .await
            .map_err(|e| GitError::PullFailed {
                path: self.sandbox_root.display().to_string(),
                source: Box::new(e),
            })?;
        self.reload_current_hash().await?;
        self.record_browsed_branch().await?;
        self.refresh().await?;
        info!(branch = name, commit = %self.current_hash, "switched branch");
        Ok(())
    }

    /// Step one commit toward the newest. Returns whether HEAD moved.
    ///
    /// # Errors
    ///
    /// See [`Session::move_to`].
    pub async fn next(&mut self) -> BrowseResult<bool> {
        self.step(CommitHistory::newer_than).await
    }

    /// Step one commit toward the oldest. Returns whether HEAD moved.
    ///
    /// # Errors
    ///
    /// See [`Session::move_to`].
    pub async fn prev(&mut self) -> BrowseResult<bool> {
        self.step(CommitHistory::older_than).await
    }

    /// Move to the oldest cached commit.
    ///
    /// # Errors
    ///
    /// Returns `GitError::EmptyHistory` when no commits are cached, otherwise
    /// see [`Session::move_to`].
    pub async fn first(&mut self) -> BrowseResult<()> {
        let target = self.commits.oldest().ok_or(GitError::EmptyHistory)?;
        let hash = target.hash().to_string();
        self.move_to(&hash).await
    }

    /// Move to the newest cached commit.
    ///
    /// # Errors
    ///
    /// Returns `GitError::EmptyHistory` when no commits are cached, otherwise
    /// see [`Session::move_to`].
    pub async fn last(&mut self) -> BrowseResult<()> {
        let target = self.commits.newest().ok_or(GitError::EmptyHistory)?;
        let hash = target.hash().to_string();
        self.move_to(&hash).await
    }

    async fn step(
        &mut self,
        neighbour: for<'a> fn(&'a CommitHistory, &str) -> Option<&'a Commit>,
    ) -> BrowseResult<bool> {
        self.ensure_sandbox()?;
        self.reload_current_hash().await?;
        let Some(target) = neighbour(&self.commits, &self.current_hash) else {
            debug!(commit = %self.current_hash, "no neighbour; staying put");
            return Ok(false);
        };
        let hash = target.hash().to_string();
        self.move_to(&hash).await?;
        Ok(true)
    }

    // --- Helpers ---

    async fn reload_current_hash(&mut self) -> BrowseResult<()> {
        self.current_hash = self
            .git
            .head_hash(&self.sandbox_root)
            .await
            .map_err(|e| refresh_error("current commit", e))?;
        Ok(())
    }

    /// Use the recorded branch, or record the checked-out one.
    async fn load_browsed_branch(&mut self) -> BrowseResult<()> {
        let recorded = self
            .git
            .config_get(&self.sandbox_root, BROWSED_BRANCH_KEY)
            .await
            .map_err(|e| refresh_error("browsed branch", e))?;
        match recorded {
            Some(name) if !name.is_empty() => {
                debug!(branch = %name, "browsing recorded branch");
                self.browsed_branch = Some(name);
                Ok(())
            }
            _ => self.record_browsed_branch().await,
        }
    }

    /// Remember the checked-out branch in the sandbox config.
    ///
    /// A detached HEAD records nothing and the list falls back to HEAD.
    async fn record_browsed_branch(&mut self) -> BrowseResult<()> {
        let head = self
            .git
            .head_branch(&self.sandbox_root)
            .await
            .map_err(|e| refresh_error("browsed branch", e))?;
        if head == "HEAD" {
            self.browsed_branch = None;
            return Ok(());
        }
        self.git
            .config_set(&self.sandbox_root, BROWSED_BRANCH_KEY, &head)
            .await
            .map_err(|e| refresh_error("browsed branch", e))?;
        self.browsed_branch = Some(head);
        Ok(())
    }

    fn ensure_sandbox(&self) -> BrowseResult<()> {
        if self.is_materialized() {
            Ok(())
        } else {
            Err(GitError::Sandbox {
                path: self.sandbox_root.display().to_string(),
                message: "no clone present; run 'clone' first".to_string(),
                source: None,
            }
            .into())
        }
    }

    fn sandbox_error(&self, message: &str, source: BrowseError) -> GitError {
        GitError::Sandbox {
            path: self.sandbox_root.display().to_string(),
            message: message.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

fn refresh_error(what: &'static str, source: BrowseError) -> GitError {
    GitError::Refresh {
        what,
        source: Box::new(source),
    }
}
