// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # svcwatch CLI Entry Point
//!
//! Bootstraps the runtime, logging and terminal state, then dispatches to the
//! subcommand modules in `commands/`.
//!
//! ## Exit codes
//!
//! * `0`: the check ran and reported `OK`.
//! * `3`: the check reported `UNKNOWN` (bad parameters, failed query, ...).
//! * `1`: the tool itself failed before a report could be produced, for
//!   example an unreadable parameter file.

mod commands;
mod terminal;

use std::process::ExitCode;

use svcwatch_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, check, query},
    terminal::{print::Print, spinner},
};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    spinner::init_logging(commands.verbosity);

    let cfg = Config::from(&commands);

    let _ = Print::init(&cfg);
    Print::banner();

    let result = match &commands.command {
        Commands::Check {
            params,
            replay,
            platform,
        } => check::check(params, replay.as_deref(), *platform, &cfg).await,
        Commands::Query { params, .. } => query::query(params, &cfg).await,
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}
