// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Session::open
//!   --options      print config sources and options
//!   -i             materialize --> run_shell(stdin)
//!   <verb> [arg]   materialize (if needed) --> dispatch
//! ```

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::debug;

use git_browse::cli::{self, Cli};
use git_browse::cmd::dispatch::{Invocation, Verb, dispatch, write_help};
use git_browse::cmd::shell::run_shell;
use git_browse::config::Config;
use git_browse::error::Result;
use git_browse::git::backend::ShellRunner;
use git_browse::git::classify::Classifier;
use git_browse::git::tool::GitTool;
use git_browse::logging::{LogConfig, init_logging};
use git_browse::session::{Session, SessionOptions};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let (sources, config) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    debug!(?cli, "parsed arguments");

    if cli.show_options {
        for line in sources {
            println!("# {line}");
        }
        for line in config.format_options() {
            println!("{line}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("be sure to clean up with 'git browse clean'");
            ExitCode::FAILURE
        }
    }
}

/// Effective configuration plus the files it was read from.
fn load_config(cli: &Cli) -> Result<(Vec<String>, Config)> {
    let loader = cli.global.config_loader()?;
    let sources = loader.format_loaded_files();
    Ok((sources, loader.build()?))
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file().map(|p| p.display().to_string()))
        .build()
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let invocation = if cli.interactive {
        None
    } else {
        Some(Invocation::parse(cli.command.as_slice())?)
    };

    let mut stdout = std::io::stdout();
    if invocation.as_ref().is_some_and(|i| i.verb() == Verb::Help) {
        write_help(&mut stdout)?;
        return Ok(());
    }

    let runner = ShellRunner::from_config(&config.git)?;
    let git = GitTool::new(runner, Classifier::from_config(&config.git));
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let mut session = Session::open(git, SessionOptions::from_config(config, cwd)).await?;
    debug!(
        repo = %session.repo_root().display(),
        sandbox = %session.sandbox_root().display(),
        original = %session.original_hash(),
        "session state"
    );

    match invocation {
        None => {
            session.materialize_sandbox(false).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            run_shell(&mut session, &config.shell, stdin, &mut stdout).await?;
        }
        Some(invocation) => {
            if invocation.verb().needs_sandbox() {
                session.materialize_sandbox(false).await?;
            }
            dispatch(&mut session, &invocation, &mut stdout).await?;
        }
    }
    stdout.flush()?;
    Ok(())
}
