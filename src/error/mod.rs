// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!           BrowseError (~16 bytes)
//!                  |
//!   +-------+------+------+------+-----+
//!   |       |      |      |      |     |
//!   v       v      v      v      v     v
//! Process  Git  Command Config   Fs    Io
//!   Box    Box    Box    Box    Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout
//!   Git      ToolFailure, NotARepository, Sandbox, Refresh,
//!            CheckoutFailed, PullFailed, EmptyHistory, MalformedLog
//!   Command  InvalidArguments, UnknownCommand, OptionLikeArgument,
//!            EmptyCommand
//!   Config   ParseError, InvalidValue
//!   Fs       IoError
//! ```
//!
//! Only [`CommandError::UnknownCommand`] is recoverable inside the shell;
//! everything else ends the session.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BrowseError`].
pub type BrowseResult<T> = std::result::Result<T, BrowseError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// External process could not run or exited non-zero.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Git reported a failure or a session operation on top of git failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// A shell or command-line verb was rejected.
    #[error("command error: {0}")]
    Command(#[from] Box<CommandError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl BrowseError {
    /// The command error the shell may report before reading the next line.
    #[must_use]
    pub fn as_recoverable(&self) -> Option<&CommandError> {
        match self {
            Self::Command(err) if matches!(**err, CommandError::UnknownCommand(_)) => Some(&**err),
            _ => None,
        }
    }

    /// Whether the shell may report this error and keep reading input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.as_recoverable().is_some()
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BrowseError {
                fn from(err: $error) -> Self {
                    BrowseError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ProcessError => Process,
    GitError => Git,
    CommandError => Command,
    ConfigError => Config,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a status outside its success set.
    #[error("process '{command}' exited with code {code}{}", format_stderr(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Process timed out and was killed.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Failed to wait on the process or collect its output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

// --- Git Errors ---

/// Git and session errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git exited cleanly but its output carried a failure marker.
    #[error("git {command} reported a failure: {output}")]
    ToolFailure { command: String, output: String },

    /// The working directory is not inside a git work tree.
    #[error("not a git repository: {path}")]
    NotARepository {
        path: String,
        #[source]
        source: Box<BrowseError>,
    },

    /// The sandbox could not be created, cloned or found.
    #[error("sandbox error at {path}: {message}")]
    Sandbox {
        path: String,
        message: String,
        #[source]
        source: Option<Box<BrowseError>>,
    },

    /// Reloading the commit or branch list failed.
    #[error("failed to refresh {what}")]
    Refresh {
        what: &'static str,
        #[source]
        source: Box<BrowseError>,
    },

    /// Checkout of a commit or branch failed.
    #[error("failed to checkout {what}")]
    CheckoutFailed {
        what: String,
        #[source]
        source: Box<BrowseError>,
    },

    /// Pull before a branch switch failed.
    #[error("failed to pull in {path}")]
    PullFailed {
        path: String,
        #[source]
        source: Box<BrowseError>,
    },

    /// Navigation needs at least one commit.
    #[error("no commits to browse")]
    EmptyHistory,

    /// A log line did not have the expected fields.
    #[error("malformed log line {line}: {content:?}")]
    MalformedLog { line: usize, content: String },
}

// --- Command Errors ---

/// Dispatcher errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Verb received the wrong number of arguments.
    #[error("invalid arguments for '{verb}': expected {expected}, got {got}")]
    InvalidArguments {
        verb: String,
        expected: usize,
        got: usize,
    },

    /// Verb is not in the command table.
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    /// Argument would be read by git as an option.
    #[error("invalid argument for '{verb}': '{argument}' looks like an option")]
    OptionLikeArgument { verb: String, argument: String },

    /// Nothing to dispatch.
    #[error("no command given")]
    EmptyCommand,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
