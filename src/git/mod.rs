// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          tool.rs (GitTool)
//!   toplevel  remote_url  head_*   <-- queries: exit code only
//!   clone  fetch  pull  checkout   <-- mutations: stderr --> classify.rs
//!   log  branches                  <-- payloads: parsed by commit.rs
//!               |
//!               v
//!      ,-------------------,
//!      | backend::GitRunner |
//!      '---------+---------'
//!                |
//!        +-------+--------+
//!        v                v
//!   ShellRunner       test fakes
//!  (ProcessBuilder)
//! ```

pub mod backend;
pub mod classify;
pub mod commit;
pub mod tool;

#[cfg(test)]
pub(crate) mod fake;
