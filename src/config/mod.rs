// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for git-browse.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. .git-browse.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. GIT_BROWSE_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GIT_BROWSE_GIT__REMOTE=upstream    → git.remote = "upstream"
//! GIT_BROWSE_SANDBOX__DIR_NAME=.sb   → sandbox.dir_name = ".sb"
//! GIT_BROWSE_GIT__TIMEOUT_SECS=60    → git.timeout_secs = 60
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig, SandboxConfig, ShellConfig};

/// Default per-directory configuration file.
pub const DEFAULT_CONFIG_FILE: &str = ".git-browse.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GIT_BROWSE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git invocation.
    pub git: GitConfig,
    /// Sandbox location.
    pub sandbox: SandboxConfig,
    /// Interactive shell.
    pub shell: ShellConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use git_browse::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional(".git-browse.toml")
    ///     .with_env_prefix("GIT_BROWSE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        types::validate_all(&self.git, &self.sandbox, &self.shell)
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global.log_file.display().to_string(),
        );
        options.insert("git.program", self.git.program.clone());
        options.insert("git.remote", self.git.remote.clone());
        options.insert("git.timeout_secs", self.git.timeout_secs.to_string());
        options.insert("git.error_markers", self.git.error_markers.join(", "));
        options.insert("sandbox.dir_name", self.sandbox.dir_name.clone());
        options.insert("shell.prompt", format!("{:?}", self.shell.prompt));
        options.insert("shell.exit_keywords", self.shell.exit_keywords.join(", "));
        options.insert("shell.clean_on_exit", self.shell.clean_on_exit.to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
