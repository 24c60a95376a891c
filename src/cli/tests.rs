// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::Cli;
use crate::logging::LogLevel;
use clap::Parser;
use clap::error::ErrorKind;
use std::time::Duration;

#[test]
fn test_parse_verb_with_argument() {
    let cli = Cli::try_parse_from(["git-browse", "move", "abc123"]).unwrap();
    assert_eq!(cli.command, ["move", "abc123"]);
    assert!(!cli.interactive);
}

#[test]
fn test_parse_interactive() {
    let cli = Cli::try_parse_from(["git-browse", "-i"]).unwrap();
    assert!(cli.interactive);
    assert!(cli.command.is_empty());
}

#[test]
fn test_interactive_forbids_positionals() {
    let err = Cli::try_parse_from(["git-browse", "-i", "list"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn test_command_required_without_interactive() {
    let err = Cli::try_parse_from(["git-browse"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_too_many_tokens() {
    assert!(Cli::try_parse_from(["git-browse", "move", "a", "b"]).is_err());
}

#[test]
fn test_options_flag_stands_alone() {
    let cli = Cli::try_parse_from(["git-browse", "--options"]).unwrap();
    assert!(cli.show_options);
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "git-browse",
        "-l",
        "5",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--remote",
        "upstream",
        "--timeout",
        "30",
        "list",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.configs.len(), 2);
    assert_eq!(cli.global.remote.as_deref(), Some("upstream"));
    assert_eq!(cli.global.timeout, Some(30));
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["git-browse", "-l", "7", "list"]).is_err());
}

#[test]
fn test_config_loader_applies_flags() {
    let cli = Cli::try_parse_from([
        "git-browse",
        "--no-default-config",
        "-l",
        "4",
        "--remote",
        "upstream",
        "--sandbox-dir",
        ".browse",
        "--timeout",
        "9",
        "--set",
        "shell.clean_on_exit=false",
        "list",
    ])
    .unwrap();
    let config = cli
        .global
        .config_loader()
        .unwrap()
        .build()
        .expect("valid config");

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.sandbox.dir_name, ".browse");
    assert_eq!(config.git.timeout(), Some(Duration::from_secs(9)));
    assert!(!config.shell.clean_on_exit);
}

#[test]
fn test_flags_win_over_set() {
    let cli = Cli::try_parse_from([
        "git-browse",
        "--no-default-config",
        "--set",
        "git.remote=from-set",
        "--remote",
        "from-flag",
        "list",
    ])
    .unwrap();
    let config = cli.global.config_loader().unwrap().build().unwrap();
    assert_eq!(config.git.remote, "from-flag");
}

#[test]
fn test_set_requires_key_value() {
    let cli = Cli::try_parse_from(["git-browse", "--set", "nonsense", "list"]).unwrap();
    assert!(cli.global.config_loader().is_err());
}
