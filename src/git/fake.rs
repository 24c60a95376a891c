// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory git for unit tests.
//!
//! Answers the commands [`GitTool`](super::tool::GitTool) issues from a small
//! model of a repository, records every call, and can be told to fail a verb.
//! `clone` creates `<dest>/.git` on disk so sandbox checks see a real marker
//! and starts over on `main` with an empty config. `log HEAD` only reaches
//! HEAD and what is older, like the real command.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::backend::GitRunner;
use super::commit::{Commit, FIELD_SEPARATOR};
use crate::core::process::builder::ProcessOutput;
use crate::error::{BrowseResult, ProcessError};

/// How an injected failure shows up.
#[derive(Debug, Clone)]
pub(crate) enum Failure {
    /// Non-zero exit with this stderr.
    Exit(String),
    /// Exit 0, with this stderr.
    Stderr(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub(crate) args: Vec<String>,
    pub(crate) cwd: Option<PathBuf>,
}

impl Call {
    /// Git verb, skipping leading `-c key=value` pairs.
    pub(crate) fn verb(&self) -> &str {
        let mut args = self.args.iter();
        while let Some(arg) = args.next() {
            if arg == "-c" {
                args.next();
            } else {
                return arg;
            }
        }
        ""
    }
}

#[derive(Debug)]
struct State {
    toplevel: PathBuf,
    remote_url: String,
    /// Branch name to its history, newest first.
    histories: BTreeMap<String, Vec<Commit>>,
    branch: String,
    head: String,
    config: BTreeMap<String, String>,
    failures: BTreeMap<String, Failure>,
}

impl State {
    fn tip(&self, branch: &str) -> String {
        self.histories
            .get(branch)
            .and_then(|h| h.first())
            .map(|c| c.hash().to_string())
            .unwrap_or_default()
    }

    /// Commits reachable from `rev`, newest first; `None` for an unknown ref.
    fn reachable(&self, rev: &str) -> Option<Vec<&Commit>> {
        if let Some(branch) = rev.strip_prefix("refs/heads/") {
            return self.histories.get(branch).map(|h| h.iter().collect());
        }
        if rev != "HEAD" {
            return None;
        }
        let history = self
            .histories
            .get(&self.branch)
            .filter(|h| h.iter().any(|c| c.hash() == self.head))
            .or_else(|| {
                self.histories
                    .values()
                    .find(|h| h.iter().any(|c| c.hash() == self.head))
            });
        Some(
            history
                .into_iter()
                .flatten()
                .skip_while(|c| c.hash() != self.head)
                .collect(),
        )
    }
}

#[derive(Debug)]
pub(crate) struct FakeRunner {
    state: RefCell<State>,
    calls: RefCell<Vec<Call>>,
}

impl FakeRunner {
    /// Repository at `toplevel` whose `main` branch holds `history` (newest first).
    pub(crate) fn new(toplevel: &Path, history: &[&str]) -> Self {
        let mut fake = Self {
            state: RefCell::new(State {
                toplevel: toplevel.to_path_buf(),
                remote_url: "https://example.com/repo.git".to_string(),
                histories: BTreeMap::new(),
                branch: "main".to_string(),
                head: String::new(),
                config: BTreeMap::new(),
                failures: BTreeMap::new(),
            }),
            calls: RefCell::new(Vec::new()),
        };
        fake = fake.with_branch("main", history);
        {
            let mut state = fake.state.borrow_mut();
            state.head = state.tip("main");
        }
        fake
    }

    /// Add a branch whose history is `history` (newest first).
    pub(crate) fn with_branch(self, name: &str, history: &[&str]) -> Self {
        let commits = history
            .iter()
            .map(|hash| Commit::new(*hash, format!("commit {hash}"), "Test User"))
            .collect();
        self.state
            .borrow_mut()
            .histories
            .insert(name.to_string(), commits);
        self
    }

    /// Make every later call of `verb` fail.
    pub(crate) fn fail(&self, verb: &str, failure: Failure) {
        self.state
            .borrow_mut()
            .failures
            .insert(verb.to_string(), failure);
    }

    pub(crate) fn clear_failures(&self) {
        self.state.borrow_mut().failures.clear();
    }

    /// Move HEAD outside the tool, as another process would.
    pub(crate) fn set_head(&self, hash: &str) {
        self.state.borrow_mut().head = hash.to_string();
    }

    /// Value the sandbox config holds for `key`.
    pub(crate) fn config(&self, key: &str) -> Option<String> {
        self.state.borrow().config.get(key).cloned()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, verb: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.verb() == verb).count()
    }

    fn respond(&self, call: &Call) -> BrowseResult<ProcessOutput> {
        let verb = call.verb().to_string();
        let args: Vec<&str> = call
            .args
            .iter()
            .map(String::as_str)
            .skip_while(|a| *a != verb)
            .skip(1)
            .collect();
        let mut state = self.state.borrow_mut();

        if let Some(failure) = state.failures.get(&verb) {
            return match failure {
                Failure::Exit(stderr) => Err(ProcessError::NonZeroExit {
                    command: format!("git {}", call.args.join(" ")),
                    code: 128,
                    stderr: stderr.clone(),
                }
                .into()),
                Failure::Stderr(stderr) => Ok(ProcessOutput::new(0, String::new(), stderr.clone())),
            };
        }

        match (verb.as_str(), args.as_slice()) {
            ("rev-parse", ["--show-toplevel"]) => {
                Ok(ProcessOutput::ok(format!("{}\n", state.toplevel.display())))
            }
            ("rev-parse", ["--abbrev-ref", "HEAD"]) => {
                Ok(ProcessOutput::ok(format!("{}\n", state.branch)))
            }
            ("rev-parse", ["HEAD"]) => Ok(ProcessOutput::ok(format!("{}\n", state.head))),
            ("remote", ["get-url", _]) => Ok(ProcessOutput::ok(format!("{}\n", state.remote_url))),
            ("clone", [.., dest]) => {
                std::fs::create_dir_all(Path::new(dest).join(".git"))?;
                state.branch = "main".to_string();
                state.head = state.tip("main");
                state.config.clear();
                Ok(ProcessOutput::new(
                    0,
                    String::new(),
                    format!("Cloning into '{dest}'...\ndone."),
                ))
            }
            ("fetch" | "pull", _) => Ok(ProcessOutput::ok("")),
            ("config", ["--get", key]) => match state.config.get(*key) {
                Some(value) => Ok(ProcessOutput::ok(format!("{value}\n"))),
                None => Err(ProcessError::NonZeroExit {
                    command: format!("git config --get {key}"),
                    code: 1,
                    stderr: String::new(),
                }
                .into()),
            },
            ("config", [key, value]) => {
                state.config.insert((*key).to_string(), (*value).to_string());
                Ok(ProcessOutput::ok(""))
            }
            ("checkout", [what]) => {
                if state.histories.contains_key(*what) {
                    let tip = state.tip(what);
                    state.branch = (*what).to_string();
                    state.head = tip;
                    return Ok(ProcessOutput::new(
                        0,
                        String::new(),
                        format!("Switched to branch '{what}'"),
                    ));
                }
                let found = state
                    .histories
                    .values()
                    .flatten()
                    .find(|c| c.hash().starts_with(*what))
                    .map(|c| c.hash().to_string());
                match found {
                    Some(hash) => {
                        state.branch = "HEAD".to_string();
                        state.head = hash;
                        Ok(ProcessOutput::new(0, String::new(), "HEAD is now at".to_string()))
                    }
                    None => Err(ProcessError::NonZeroExit {
                        command: "git checkout".to_string(),
                        code: 1,
                        stderr: format!("error: pathspec '{what}' did not match"),
                    }
                    .into()),
                }
            }
            ("log", [_format, rest @ ..]) => {
                let rev = rest.first().copied().unwrap_or("HEAD");
                let Some(commits) = state.reachable(rev) else {
                    return Err(ProcessError::NonZeroExit {
                        command: format!("git log {rev}"),
                        code: 128,
                        stderr: format!("fatal: bad revision '{rev}'"),
                    }
                    .into());
                };
                let lines: Vec<String> = commits
                    .into_iter()
                    .map(|c| {
                        format!(
                            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
                            c.hash(),
                            c.message(),
                            c.author()
                        )
                    })
                    .collect();
                Ok(ProcessOutput::ok(lines.join("\n")))
            }
            ("for-each-ref", _) => {
                let mut refs: Vec<String> = state
                    .histories
                    .keys()
                    .map(|b| format!("refs/remotes/origin/{b}"))
                    .collect();
                refs.insert(0, format!("refs/heads/{}", "main"));
                refs.push("refs/remotes/origin/HEAD".to_string());
                Ok(ProcessOutput::ok(refs.join("\n")))
            }
            _ => Err(ProcessError::NonZeroExit {
                command: format!("git {}", call.args.join(" ")),
                code: 129,
                stderr: "fake: unsupported command".to_string(),
            }
            .into()),
        }
    }
}

impl GitRunner for FakeRunner {
    async fn git(&self, args: &[&str], cwd: Option<&Path>) -> BrowseResult<ProcessOutput> {
        let call = Call {
            args: args.iter().map(ToString::to_string).collect(),
            cwd: cwd.map(Path::to_path_buf),
        };
        self.calls.borrow_mut().push(call.clone());
        self.respond(&call)
    }
}
