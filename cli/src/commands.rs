// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! This module defines the schema for user input. The execution logic of
//! each subcommand lives in its own submodule; the arguments, flags and help
//! text are centralized here.
//!
//! ## Parameters
//!
//! Monitor parameters can come from flags, from a TOML file (`--params`) keyed
//! by the monitoring framework's names, or both. Flags win over the file.
//! The password may also be taken from `SVCWATCH_PASSWORD` so it does not
//! have to appear in the process list.
//!
//! ## Translation
//!
//! `From<&CommandLine> for Config` decouples the CLI flags from the runtime
//! configuration used by the rest of the application.

pub mod check;
pub mod query;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use svcwatch_common::config::{Config, DEFAULT_QUERY_TIMEOUT};
use svcwatch_common::models::params::{RawParameters, RunParameters};
use svcwatch_common::models::platform::Platform;

#[derive(Parser)]
#[command(name = "svcwatch")]
#[command(about = "Windows service check for local and remote hosts.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the banner
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: no headers, -qq: raw service lines on stdout)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase logging detail (-v: stage logs, -vv: command lines and parsed rows)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Print the monitor output variables as JSON on stdout
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Seconds to wait for wmic before giving up
    #[arg(
        long = "timeout",
        value_name = "SECS",
        default_value_t = DEFAULT_QUERY_TIMEOUT.as_secs(),
        global = true
    )]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query services on a host and report the ones matching the filters
    #[command(alias = "c")]
    Check {
        #[command(flatten)]
        params: ParamArgs,

        /// Parse previously captured wmic output instead of running wmic
        #[arg(long = "replay", value_name = "FILE")]
        replay: Option<PathBuf>,

        /// Station platform the capture was taken on (defaults to this one)
        #[arg(long = "platform", value_enum, requires = "replay")]
        platform: Option<StationPlatform>,
    },

    /// Validate parameters and print the wmic command line without running it
    #[command(alias = "q")]
    Query {
        #[command(flatten)]
        params: ParamArgs,

        /// Print the password in clear text
        #[arg(long = "show-secrets")]
        show_secrets: bool,
    },
}

/// Platforms a captured `wmic` output can come from.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationPlatform {
    Windows,
    Linux,
}

impl From<StationPlatform> for Platform {
    fn from(platform: StationPlatform) -> Self {
        match platform {
            StationPlatform::Windows => Platform::Windows,
            StationPlatform::Linux => Platform::Linux,
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct ParamArgs {
    /// TOML file with monitor parameters (hostname, userName, serviceDisplayName, ...)
    #[arg(long = "params", value_name = "FILE")]
    pub params_file: Option<PathBuf>,

    /// Target host, or "localhost"
    #[arg(short = 'H', long = "hostname", value_name = "HOST")]
    pub hostname: Option<String>,

    /// Windows domain of the user
    #[arg(short = 'd', long = "domain", value_name = "DOMAIN")]
    pub domain_name: Option<String>,

    /// User allowed to query WMI on the target
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub user_name: Option<String>,

    /// Password of the user
    #[arg(
        short = 'p',
        long = "password",
        value_name = "PASSWORD",
        env = "SVCWATCH_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Display name regex, or a comma separated list of them
    #[arg(short = 's', long = "service", value_name = "REGEX")]
    pub service_display_name: Option<String>,

    /// Keep only services whose startup type contains this value
    #[arg(long = "startup-include", value_name = "TYPE")]
    pub startup_type_include: Option<String>,

    /// Drop services whose startup type contains this value
    #[arg(long = "startup-exclude", value_name = "TYPE")]
    pub startup_type_exclude: Option<String>,

    /// Keep only services whose status contains this value
    #[arg(long = "status-include", value_name = "STATUS")]
    pub service_status_include: Option<String>,

    /// Drop services whose status contains this value
    #[arg(long = "status-exclude", value_name = "STATUS")]
    pub service_status_exclude: Option<String>,
}

impl ParamArgs {
    /// Merges the parameter file (if any) with the flags into one snapshot.
    pub fn resolve(&self) -> anyhow::Result<RunParameters> {
        let base = match &self.params_file {
            Some(path) => RawParameters::from_file(path)?,
            None => RawParameters::default(),
        };
        Ok(RunParameters::new(base.overlay(RawParameters::from(self))))
    }
}

impl From<&ParamArgs> for RawParameters {
    fn from(args: &ParamArgs) -> Self {
        Self {
            hostname: args.hostname.clone(),
            domain_name: args.domain_name.clone(),
            user_name: args.user_name.clone(),
            password: args.password.clone(),
            service_display_name: args.service_display_name.clone(),
            startup_type_include: args.startup_type_include.clone(),
            startup_type_exclude: args.startup_type_exclude.clone(),
            service_status_include: args.service_status_include.clone(),
            service_status_exclude: args.service_status_exclude.clone(),
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        let redact = match &cmd.command {
            Commands::Query { show_secrets, .. } => !show_secrets,
            Commands::Check { .. } => true,
        };

        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
            redact,
            json: cmd.json,
            timeout: Duration::from_secs(cmd.timeout),
        }
    }
}
