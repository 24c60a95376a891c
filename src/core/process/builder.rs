// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process description and its captured result.
//!
//! ```text
//! ProcessBuilder
//!  • new(program) / find(name) via PATH
//!  • args / cwd / env / name / timeout
//!  • capture_output
//!
//! StreamFlags: FORWARD_TO_LOG (default), KEEP_IN_STRING
//! ```

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};
use std::time::Duration;

/// Executables already resolved through PATH.
static RESOLVED: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

fn resolved() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    RESOLVED.get_or_init(|| RwLock::new(BTreeMap::new()))
}

bitflags! {
    /// What happens to each line a child writes to stdout or stderr.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamFlags: u32 {
        /// Emit the line as a `trace!` event
        const FORWARD_TO_LOG = 0x01;
        /// Collect the line into [`ProcessOutput`]
        const KEEP_IN_STRING = 0x02;
    }
}

impl Default for StreamFlags {
    fn default() -> Self {
        Self::FORWARD_TO_LOG
    }
}

/// Exit code and kept output of a finished child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Exit code 0 with the given stdout and nothing on stderr.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout.into(), String::new())
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Kept stdout lines joined by `\n`; empty unless captured.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Kept stderr lines joined by `\n`; empty unless captured.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

/// One child process to run.
///
/// Any exit code other than 0 is reported as `ProcessError::NonZeroExit`.
#[derive(Debug)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    /// Added on top of the inherited environment
    env: Vec<(String, String)>,
    stdout: StreamFlags,
    stderr: StreamFlags,
    /// Shown in logs and errors instead of the program's file stem
    name: Option<String>,
    timeout: Option<Duration>,
}

impl ProcessBuilder {
    /// Run `program`, which may be a path or a bare name left to the OS.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            stdout: StreamFlags::default(),
            stderr: StreamFlags::default(),
            name: None,
            timeout: None,
        }
    }

    /// Full path of `program` on PATH, or `None`.
    ///
    /// Lookups are cached for the life of the process.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        if let Some(path) = resolved()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(program)
        {
            return Some(path.clone());
        }

        let path = which::which(program).ok()?;
        resolved()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(program.to_string(), path.clone());
        Some(path)
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|arg| arg.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Working directory of the child. An empty path keeps the parent's.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() {
            self.cwd = Some(dir.to_path_buf());
        }
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Keep stdout and stderr in the [`ProcessOutput`] as well as logging them.
    #[must_use]
    pub const fn capture_output(mut self) -> Self {
        let keep = StreamFlags::KEEP_IN_STRING.union(StreamFlags::FORWARD_TO_LOG);
        self.stdout = keep;
        self.stderr = keep;
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Kill the child once `duration` has passed. `None` waits forever.
    #[must_use]
    pub const fn timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout = duration;
        self
    }

    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    pub(super) fn args_slice(&self) -> &[String] {
        &self.args
    }

    pub(super) const fn working_dir(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    pub(super) fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    pub(super) const fn stdout_config(&self) -> StreamFlags {
        self.stdout
    }

    pub(super) const fn stderr_config(&self) -> StreamFlags {
        self.stderr
    }

    pub(super) fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(super) const fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }
}
