// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for git-browse.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, GitConfig, SandboxConfig, ShellConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level (0-6).
    pub output_log_level: LogLevel,
    /// File log level (0-6).
    pub file_log_level: LogLevel,
    /// Log file path. Empty disables the log file.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::INFO,
            log_file: PathBuf::new(),
        }
    }
}

impl GlobalConfig {
    /// Log file path, if one is configured.
    #[must_use]
    pub fn log_file(&self) -> Option<&PathBuf> {
        (!self.log_file.as_os_str().is_empty()).then_some(&self.log_file)
    }
}

/// How git is invoked and how its output is judged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable, resolved through PATH when not absolute.
    pub program: String,
    /// Remote whose URL the sandbox is cloned from.
    pub remote: String,
    /// Per-command timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,
    /// Line prefixes in git's stderr that mark a failure.
    pub error_markers: Vec<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            remote: "origin".to_string(),
            timeout_secs: 0,
            error_markers: ["error", "Error", "ERROR", "fatal", "Fatal", "FATAL"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl GitConfig {
    /// Timeout for a single git command, if enabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(invalid("git", "program", "must not be empty"));
        }
        if self.remote.trim().is_empty() {
            return Err(invalid("git", "remote", "must not be empty"));
        }
        if self.error_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(invalid(
                "git",
                "error_markers",
                "must contain at least one non-empty marker",
            ));
        }
        Ok(())
    }
}

/// Where the sandboxed working copy lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// Directory name nested directly under the repository root.
    pub dir_name: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            dir_name: ".sandbox".to_string(),
        }
    }
}

impl SandboxConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let name = self.dir_name.trim();
        if name.is_empty() {
            return Err(invalid("sandbox", "dir_name", "must not be empty"));
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(invalid(
                "sandbox",
                "dir_name",
                &format!("'{name}' must be a plain directory name"),
            ));
        }
        if name == ".git" {
            return Err(invalid(
                "sandbox",
                "dir_name",
                "must not be the repository's own .git directory",
            ));
        }
        Ok(())
    }
}

/// Interactive shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Prompt printed before each line is read.
    pub prompt: String,
    /// Lowercase keywords that end the shell when a line starts with them.
    pub exit_keywords: Vec<String>,
    /// Remove the sandbox when the shell ends.
    pub clean_on_exit: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            exit_keywords: vec!["quit".to_string(), "exit".to_string()],
            clean_on_exit: true,
        }
    }
}

impl ShellConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.exit_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(invalid(
                "shell",
                "exit_keywords",
                "must contain at least one keyword",
            ));
        }
        Ok(())
    }
}

/// Validate every section.
pub(super) fn validate_all(
    git: &GitConfig,
    sandbox: &SandboxConfig,
    shell: &ShellConfig,
) -> Result<(), ConfigError> {
    git.validate()?;
    sandbox.validate()?;
    shell.validate()
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
