// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git runner abstraction.
//!
//! ```text
//! GitRunner::git(args, cwd) --> ProcessOutput
//!        |
//!        +-- ShellRunner: git CLI through ProcessBuilder
//!        +-- (tests): scripted responses
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::types::GitConfig;
use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
use crate::error::{BrowseResult, ProcessError};

/// Runs one git command and hands back its captured output.
///
/// Implementations return `Ok` only for a zero exit status. A non-zero
/// exit surfaces as [`ProcessError::NonZeroExit`] carrying git's stderr.
#[allow(async_fn_in_trait)]
pub trait GitRunner {
    /// Run `git <args>` in `cwd`, or in the process's working directory when `None`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git cannot be spawned, times out, or exits
    /// non-zero.
    async fn git(&self, args: &[&str], cwd: Option<&Path>) -> BrowseResult<ProcessOutput>;
}

// --- ShellRunner Implementation (Git CLI) ---

/// Git CLI runner.
///
/// Every command runs with `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`
/// so credential prompts fail instead of blocking the session.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ShellRunner {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Build a runner from the `[git]` section, resolving bare program names
    /// through PATH.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if the program is a bare
    /// name that is not in PATH.
    pub fn from_config(config: &GitConfig) -> BrowseResult<Self> {
        let program = Path::new(&config.program);
        let resolved = if program.components().count() > 1 || program.is_absolute() {
            program.to_path_buf()
        } else {
            ProcessBuilder::find(&config.program).ok_or_else(|| {
                ProcessError::ExecutableNotFound {
                    name: config.program.clone(),
                }
            })?
        };
        Ok(Self::new(resolved).with_timeout(config.timeout()))
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }
}

impl GitRunner for ShellRunner {
    async fn git(&self, args: &[&str], cwd: Option<&Path>) -> BrowseResult<ProcessOutput> {
        let mut builder = ProcessBuilder::new(&self.program)
            .name("git")
            .args(args)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .capture_output()
            .timeout(self.timeout);
        if let Some(dir) = cwd {
            builder = builder.cwd(dir);
        }
        builder.run().await
    }
}
