// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The `query` subcommand: validate and print the wmic command line.

use std::process::ExitCode;

use colored::*;
use svcwatch_common::config::Config;
use svcwatch_common::error;
use svcwatch_common::utils::redact;
use svcwatch_core::probe::ServiceProbe;

use crate::commands::ParamArgs;
use crate::commands::check::EXIT_UNKNOWN;
use crate::terminal::colors;
use crate::terminal::print::{self, Print};
use crate::tprint;

pub async fn query(params: &ParamArgs, cfg: &Config) -> anyhow::Result<ExitCode> {
    let run = params.resolve()?;
    let probe = ServiceProbe::system(cfg.timeout);

    let prepared = match probe.prepare(&run).await {
        Ok(prepared) => prepared,
        Err(failure) => {
            error!(kind = ?failure.error.kind(), "{failure}");
            return Ok(ExitCode::from(EXIT_UNKNOWN));
        }
    };

    let argv = if cfg.redact {
        redact::command_line(&prepared.argv)
    } else {
        prepared.argv
    };

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&argv)?);
        return Ok(ExitCode::SUCCESS);
    }
    if cfg.quiet > 1 {
        println!("{}", argv.join(" "));
        return Ok(ExitCode::SUCCESS);
    }

    Print::header("wmic command");
    print::aligned_line("Platform", probe.platform().to_string());
    print::aligned_line("Patterns", prepared.patterns.len().to_string());
    tprint!();
    tprint!("{}", argv.join(" ").color(colors::PRIMARY));
    Ok(ExitCode::SUCCESS)
}
