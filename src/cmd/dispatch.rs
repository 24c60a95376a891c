// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command dispatcher: verb table and handlers.
//!
//! ```text
//! tokens --> Invocation::parse --> Verb (case-insensitive) + arity check
//!                                    |
//!                                    v
//!                 dispatch(session, invocation, out)
//!    first last next prev move branch      --> navigation
//!    list branch-list status help          --> print
//!    clone refresh clean                   --> sandbox lifecycle
//! ```

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use tracing::debug;

use crate::error::{BrowseResult, CommandError};
use crate::git::backend::GitRunner;
use crate::session::Session;

/// A dispatchable verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    First,
    Last,
    List,
    Next,
    Prev,
    Move,
    Branch,
    BranchList,
    Refresh,
    Status,
    Clean,
    Clone,
    Help,
}

impl Verb {
    /// Every verb, in help order.
    pub const ALL: [Self; 13] = [
        Self::List,
        Self::First,
        Self::Last,
        Self::Next,
        Self::Prev,
        Self::Move,
        Self::Branch,
        Self::BranchList,
        Self::Status,
        Self::Refresh,
        Self::Clone,
        Self::Clean,
        Self::Help,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::List => "list",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Move => "move",
            Self::Branch => "branch",
            Self::BranchList => "branch-list",
            Self::Refresh => "refresh",
            Self::Status => "status",
            Self::Clean => "clean",
            Self::Clone => "clone",
            Self::Help => "help",
        }
    }

    /// Number of arguments the verb takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Move | Self::Branch => 1,
            _ => 0,
        }
    }

    /// Whether the verb works on the sandbox clone.
    ///
    /// `clone` builds the sandbox itself; `clean`, `status` and `help` work
    /// without one.
    #[must_use]
    pub const fn needs_sandbox(self) -> bool {
        !matches!(self, Self::Clone | Self::Clean | Self::Status | Self::Help)
    }

    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Move => "move <hash>",
            Self::Branch => "branch <name>",
            other => other.name(),
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::First => "check out the oldest commit",
            Self::Last => "check out the newest commit",
            Self::List => "list commits, newest first; '*' marks the current one",
            Self::Next => "check out the next newer commit",
            Self::Prev => "check out the next older commit",
            Self::Move => "check out the given commit",
            Self::Branch => "switch to a branch and update it",
            Self::BranchList => "list branches",
            Self::Refresh => "reload the commit and branch lists",
            Self::Status => "show the original and current position",
            Self::Clean => "remove the sandbox",
            Self::Clone => "re-create the sandbox from the remote",
            Self::Help => "show this help",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Verb {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CommandError::UnknownCommand(s.to_string()))
    }
}

/// A verb with its validated argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    verb: Verb,
    argument: Option<String>,
}

impl Invocation {
    /// Parse `<verb> [argument]` tokens.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::EmptyCommand` for no tokens,
    /// `CommandError::UnknownCommand` for an unknown verb and
    /// `CommandError::InvalidArguments` when the argument count is wrong.
    /// An argument starting with `-` is refused with
    /// `CommandError::OptionLikeArgument` since git would parse it as a flag.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, CommandError> {
        let (verb, args) = tokens.split_first().ok_or(CommandError::EmptyCommand)?;
        let verb: Verb = verb.as_ref().parse()?;
        if args.len() != verb.arity() {
            return Err(CommandError::InvalidArguments {
                verb: verb.name().to_string(),
                expected: verb.arity(),
                got: args.len(),
            });
        }
        let argument = args.first().map(|a| a.as_ref().to_string());
        if let Some(arg) = &argument
            && arg.starts_with('-')
        {
            return Err(CommandError::OptionLikeArgument {
                verb: verb.name().to_string(),
                argument: arg.clone(),
            });
        }
        Ok(Self { verb, argument })
    }

    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }
}

/// Write the verb table.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    let width = Verb::ALL
        .iter()
        .map(|v| v.usage().len())
        .max()
        .unwrap_or(0);
    writeln!(out, "commands:")?;
    for verb in Verb::ALL {
        writeln!(out, "  {:<width$}  {}", verb.usage(), verb.description())?;
    }
    Ok(())
}

/// Parse `tokens` and run the result.
///
/// # Errors
///
/// See [`Invocation::parse`] and [`dispatch`].
pub async fn dispatch_tokens<R, W, S>(
    session: &mut Session<R>,
    tokens: &[S],
    out: &mut W,
) -> BrowseResult<()>
where
    R: GitRunner,
    W: Write,
    S: AsRef<str>,
{
    let invocation = Invocation::parse(tokens)?;
    dispatch(session, &invocation, out).await
}

/// Run one invocation against the session, writing results to `out`.
///
/// # Errors
///
/// Returns the session error of the operation, or an I/O error if writing
/// to `out` fails.
pub async fn dispatch<R: GitRunner, W: Write>(
    session: &mut Session<R>,
    invocation: &Invocation,
    out: &mut W,
) -> BrowseResult<()> {
    let verb = invocation.verb();
    let argument = invocation.argument().unwrap_or_default();
    debug!(%verb, argument, "dispatch");

    match verb {
        Verb::First => {
            session.first().await?;
            write_position(session, out)?;
        }
        Verb::Last => {
            session.last().await?;
            write_position(session, out)?;
        }
        Verb::Next => {
            if session.next().await? {
                write_position(session, out)?;
            } else {
                writeln!(out, "no newer commit")?;
            }
        }
        Verb::Prev => {
            if session.prev().await? {
                write_position(session, out)?;
            } else {
                writeln!(out, "no older commit")?;
            }
        }
        Verb::Move => {
            session.move_to(argument).await?;
            write_position(session, out)?;
        }
        Verb::Branch => {
            session.switch_branch(argument).await?;
            writeln!(out, "on branch {argument}")?;
            write_position(session, out)?;
        }
        Verb::List => write_list(session, out)?,
        Verb::BranchList => {
            for branch in session.branches() {
                writeln!(out, "{branch}")?;
            }
        }
        Verb::Refresh => {
            session.refresh().await?;
            writeln!(
                out,
                "{} commits, {} branches",
                session.commits().len(),
                session.branches().len()
            )?;
        }
        Verb::Status => write_status(session, out)?,
        Verb::Clean => {
            session.clean()?;
            writeln!(
                out,
                "sandbox removed; repository is still on {} ({})",
                session.original_branch(),
                session.original_hash()
            )?;
        }
        Verb::Clone => {
            session.materialize_sandbox(true).await?;
            writeln!(
                out,
                "sandbox ready at {} ({} commits)",
                session.sandbox_root().display(),
                session.commits().len()
            )?;
        }
        Verb::Help => write_help(out)?,
    }
    Ok(())
}

fn write_position<R: GitRunner, W: Write>(
    session: &Session<R>,
    out: &mut W,
) -> std::io::Result<()> {
    match session.current_commit() {
        Some(commit) => writeln!(out, "now at {commit}"),
        None => writeln!(out, "now at {}", session.current_hash()),
    }
}

fn write_list<R: GitRunner, W: Write>(session: &Session<R>, out: &mut W) -> std::io::Result<()> {
    for commit in session.commits() {
        let marker = if commit.hash() == session.current_hash() {
            '*'
        } else {
            ' '
        };
        writeln!(out, "{marker} {commit}")?;
    }
    Ok(())
}

fn write_status<R: GitRunner, W: Write>(
    session: &Session<R>,
    out: &mut W,
) -> std::io::Result<()> {
    let sandbox_state = if session.is_materialized() {
        "present"
    } else {
        "absent"
    };
    writeln!(out, "repository: {}", session.repo_root().display())?;
    writeln!(out, "remote:     {}", session.remote_url())?;
    writeln!(
        out,
        "sandbox:    {} ({sandbox_state})",
        session.sandbox_root().display()
    )?;
    writeln!(
        out,
        "original:   {} ({})",
        session.original_branch(),
        session.original_hash()
    )?;
    writeln!(out, "current:    {}", session.current_hash())?;
    if let Some(branch) = session.browsed_branch() {
        writeln!(out, "browsing:   {branch}")?;
    }
    writeln!(
        out,
        "cached:     {} commits, {} branches",
        session.commits().len(),
        session.branches().len()
    )
}
