// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE      ← Additional config files (can repeat)
//! --log-level N      ← Console verbosity (0-6)
//! --file-log-level   ← File verbosity (falls back to --log-level)
//! --log-file FILE    ← global.log_file
//! --remote NAME      ← git.remote
//! --sandbox-dir NAME ← sandbox.dir_name
//! --timeout SECS     ← git.timeout_secs
//! --set KEY=VAL      ← Direct config override
//!
//! Precedence: CLI flags > --set > env > --config > .git-browse.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::config::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::{ConfigError, Result};

/// Global options.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Disables loading `.git-browse.toml` from the current directory.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Remote whose URL is cloned into the sandbox.
    #[arg(long = "remote", value_name = "NAME")]
    pub remote: Option<String>,

    /// Sandbox directory name under the repository root.
    #[arg(long = "sandbox-dir", value_name = "NAME")]
    pub sandbox_dir: Option<String>,

    /// Kills a git command after this many seconds (0 disables).
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u32>,

    /// Sets an option, such as 'shell.prompt=$ ' or 'git.program=/usr/bin/git'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Builds the configuration loader for these options.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--set` option is not of the form `key=value`.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new();
        if !self.no_default_config {
            loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
        }
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix(ENV_PREFIX);

        for option in &self.options {
            let (key, value) = option.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
                section: "cli".to_string(),
                key: option.clone(),
                message: "expected KEY=VALUE".to_string(),
            })?;
            loader = loader.set(key.trim(), value)?;
        }

        if let Some(level) = self.log_level {
            loader = loader.set("global.output_log_level", i64::from(level))?;
        }
        if let Some(level) = self.file_log_level.or(self.log_level) {
            loader = loader.set("global.file_log_level", i64::from(level))?;
        }
        if let Some(ref path) = self.log_file {
            loader = loader.set("global.log_file", path.display().to_string())?;
        }
        if let Some(ref remote) = self.remote {
            loader = loader.set("git.remote", remote.as_str())?;
        }
        if let Some(ref dir) = self.sandbox_dir {
            loader = loader.set("sandbox.dir_name", dir.as_str())?;
        }
        if let Some(secs) = self.timeout {
            loader = loader.set("git.timeout_secs", i64::from(secs))?;
        }
        Ok(loader)
    }
}
