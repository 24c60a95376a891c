// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `git-browse` binary.
//!
//! Each test builds a caller repository cloned from a bare remote and runs
//! the binary inside it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Bare remote with three commits on `main`, cloned into `caller`.
/// Returns the temp dir, the caller path and the hashes oldest first.
fn caller_repo() -> (TempDir, PathBuf, Vec<String>) {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let seed = temp.path().join("seed");
    fs::create_dir(&seed).unwrap();
    git(&["init", "-q"], &seed);
    git(&["symbolic-ref", "HEAD", "refs/heads/main"], &seed);
    let mut hashes = Vec::new();
    for message in ["one", "two", "three"] {
        fs::write(seed.join("file.txt"), message).unwrap();
        git(&["add", "file.txt"], &seed);
        git(&["commit", "-q", "-m", message], &seed);
        hashes.push(git(&["rev-parse", "HEAD"], &seed));
    }

    let remote = temp.path().join("remote.git");
    git(
        &["clone", "-q", "--bare", seed.to_str().unwrap(), remote.to_str().unwrap()],
        temp.path(),
    );
    let caller = temp.path().join("caller");
    git(
        &["clone", "-q", remote.to_str().unwrap(), caller.to_str().unwrap()],
        temp.path(),
    );
    (temp, caller, hashes)
}

fn browse(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_git-browse"))
        .args(["--no-default-config", "-l", "2"])
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn cli_help_works_outside_repository() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let output = browse(temp.path(), &["help"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("commands:"));
}

#[test]
fn cli_options_lists_configuration() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let output = browse(temp.path(), &["--remote", "upstream", "--options"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.lines().any(|l| l.starts_with("git.remote") && l.ends_with("= upstream")));
}

#[test]
fn cli_options_lists_config_sources() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let file = temp.path().join("browse.toml");
    fs::write(&file, "[git]\nremote = \"mirror\"\n").unwrap();

    let output = browse(temp.path(), &["--config", file.to_str().unwrap(), "--options"]);
    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    let first = text.lines().next().unwrap_or_default();
    assert!(first.starts_with("# 1. [file] ") && first.ends_with("browse.toml"), "{text}");
    assert!(text.lines().any(|l| l.starts_with("git.remote") && l.ends_with("= mirror")));
}

#[test]
fn cli_option_like_argument_is_rejected() {
    let (_temp, caller, _) = caller_repo();
    let output = browse(&caller, &["branch", "--", "-b"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("looks like an option"), "{stderr}");
    assert!(!caller.join(".sandbox").exists());
}

#[test]
fn cli_failure_prints_cleanup_reminder() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let output = browse(temp.path(), &["list"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a git repository"), "{stderr}");
    assert!(stderr.contains("be sure to clean up with 'git browse clean'"), "{stderr}");
}

#[test]
fn cli_invalid_arguments_fail() {
    let (_temp, caller, _) = caller_repo();
    let output = browse(&caller, &["move"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!caller.join(".sandbox").exists(), "arity is checked before cloning");
}

#[test]
fn cli_one_shot_commands_share_the_sandbox() {
    let (_temp, caller, hashes) = caller_repo();

    let output = browse(&caller, &["list"]);
    assert!(output.status.success(), "{output:?}");
    let listed = stdout(&output);
    assert_eq!(listed.lines().count(), 3);
    assert!(listed.starts_with(&format!("* {} - Test three", hashes[2])));
    assert!(caller.join(".sandbox/.git").is_dir());

    let output = browse(&caller, &["move", hashes[0].as_str()]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).starts_with(&format!("now at {} - Test one", hashes[0])));

    let output = browse(&caller, &["next"]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains(&hashes[1]));

    let listed = stdout(&browse(&caller, &["LIST"]));
    let marked: Vec<_> = listed.lines().filter(|l| l.starts_with('*')).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains(&hashes[1]));

    let output = browse(&caller, &["clean"]);
    assert!(output.status.success(), "{output:?}");
    assert!(!caller.join(".sandbox").exists());
    assert_eq!(git(&["rev-parse", "HEAD"], &caller), hashes[2]);
}

#[test]
fn cli_navigation_from_an_older_commit_across_runs() {
    let (_temp, caller, hashes) = caller_repo();
    let now_at = |output: &Output| {
        assert!(output.status.success(), "{output:?}");
        stdout(output)
    };

    assert!(now_at(&browse(&caller, &["move", hashes[1].as_str()])).contains(&hashes[1]));

    let listed = now_at(&browse(&caller, &["list"]));
    assert_eq!(listed.lines().count(), 3, "newer commits stay listed: {listed}");
    assert!(listed.starts_with(&format!("  {}", hashes[2])), "{listed}");
    assert!(listed.contains(&format!("* {}", hashes[1])), "{listed}");

    assert!(now_at(&browse(&caller, &["next"])).starts_with(&format!("now at {}", hashes[2])));
    assert_eq!(now_at(&browse(&caller, &["next"])), "no newer commit\n");

    assert!(now_at(&browse(&caller, &["first"])).starts_with(&format!("now at {}", hashes[0])));
    assert!(now_at(&browse(&caller, &["last"])).starts_with(&format!("now at {}", hashes[2])));
    assert_eq!(
        git(&["config", "--get", "browse.branch"], &caller.join(".sandbox")),
        "main"
    );
}

#[test]
fn cli_interactive_shell() {
    let (_temp, caller, hashes) = caller_repo();

    let mut child = Command::new(env!("CARGO_BIN_EXE_git-browse"))
        .args(["--no-default-config", "-l", "2", "-i"])
        .current_dir(&caller)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should start");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"first\nbogus\nlist\nquit\n")
        .expect("write commands");
    let output = child.wait_with_output().expect("shell should finish");

    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    assert!(text.contains("unknown command 'bogus'"), "{text}");
    assert!(text.contains(&format!("* {} - Test one", hashes[0])), "{text}");
    assert!(!caller.join(".sandbox").exists(), "quit cleans up by default");
}
