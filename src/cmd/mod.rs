// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! one-shot:  CLI tokens --> dispatch --> stdout
//! shell:     stdin lines --> run_shell --> dispatch --> stdout
//! ```

pub mod dispatch;
pub mod shell;
