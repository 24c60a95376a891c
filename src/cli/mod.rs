// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! git-browse [global options] <command> [argument]
//! git-browse [global options] -i | --interactive
//! git-browse [global options] --options
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use clap::Parser;

/// Sandboxed commit browser.
///
/// Clones the current repository's remote into a sandbox directory and walks
/// its history there, leaving the working tree untouched.
#[derive(Debug, Parser)]
#[command(
    name = "git-browse",
    author,
    version,
    about = "Browse a repository's history in a sandboxed clone",
    long_about = "git-browse Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Clones the remote of the current repository into a sandbox\n\
                  directory under the repository root and checks out commits and\n\
                  branches there. Run one command per invocation, or start a shell\n\
                  with -i. Installed on PATH it also runs as `git browse`.",
    after_help = "COMMANDS:\n\n  \
                  list              list commits, newest first\n  \
                  first | last      check out the oldest | newest commit\n  \
                  next | prev       step toward newer | older commits\n  \
                  move <hash>       check out a commit\n  \
                  branch <name>     switch to a branch and update it\n  \
                  branch-list       list branches\n  \
                  status, refresh   show position, reload lists\n  \
                  clone, clean      re-create, remove the sandbox\n  \
                  help              show the command table\n\n\
                  CONFIG FILES:\n\n\
                  `.git-browse.toml` in the current directory is loaded unless\n\
                  --no-default-config is given. Files passed with --config are\n\
                  loaded after it, then GIT_BROWSE_<SECTION>__<KEY> environment\n\
                  variables, then --set options and the dedicated flags."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Starts an interactive shell reading one command per line.
    #[arg(short = 'i', long, conflicts_with = "command")]
    pub interactive: bool,

    /// Lists all options and their values, then exits.
    #[arg(long = "options", conflicts_with_all = ["interactive", "command"])]
    pub show_options: bool,

    /// Command to run, followed by its argument if it takes one.
    #[arg(
        value_name = "COMMAND",
        num_args = 1..=2,
        required_unless_present_any = ["interactive", "show_options"]
    )]
    pub command: Vec<String>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
