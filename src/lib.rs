// git-browse: Sandboxed Commit Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)       cmd (dispatch, shell)
//!                |                     |
//!                v                     v
//!          ,-----------,        ,-------------,
//!          |  config   |        |   session   |
//!          | TOML, env |        |   history   |
//!          '-----------'        '------+------'
//!                                      v
//!                                ,-----------,
//!                                |    git    |
//!                                | GitRunner |
//!                                | classify  |
//!                                '-----+-----'
//!                                      v
//!   +-----------------------------------------+
//!   |  core   process (tokio ProcessBuilder)  |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod session;
