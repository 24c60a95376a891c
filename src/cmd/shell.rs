// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive read-dispatch-print loop.
//!
//! ```text
//! loop:
//!   prompt --> read line
//!     EOF / exit keyword  --> clean (if configured) --> done
//!     blank               --> next line
//!     tokens --> dispatch
//!       Ok                        --> next line
//!       Err(UnknownCommand)       --> print, next line
//!       Err(anything else)        --> return Err
//! ```

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use super::dispatch::dispatch_tokens;
use crate::config::types::ShellConfig;
use crate::error::BrowseResult;
use crate::git::backend::GitRunner;
use crate::session::Session;

/// Run the shell until an exit keyword, end of input, or a fatal error.
///
/// # Errors
///
/// Returns the first error that is not recoverable, or an I/O error from
/// reading `input` or writing `out`.
pub async fn run_shell<R, I, W>(
    session: &mut Session<R>,
    config: &ShellConfig,
    input: I,
    out: &mut W,
) -> BrowseResult<()>
where
    R: GitRunner,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "{}", config.prompt)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("end of input");
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit(line, &config.exit_keywords) {
            debug!(line, "exit keyword");
            break;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let Err(err) = dispatch_tokens(session, &tokens, out).await {
            let Some(reported) = err.as_recoverable() else {
                return Err(err);
            };
            writeln!(out, "{reported}")?;
        }
    }

    if config.clean_on_exit
        && let Err(err) = session.clean()
    {
        warn!(error = %err, "cleanup failed");
    }
    Ok(())
}

/// Whether `line` starts with one of the exit keywords, ignoring case.
fn is_exit(line: &str, keywords: &[String]) -> bool {
    let lower = line.to_lowercase();
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .any(|k| lower.starts_with(&k))
}
