// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Service Probe
//!
//! Sequences one query-filter-report cycle.
//!
//! The run moves through a fixed list of [`Stage`]s. Each stage either
//! advances or ends the run on the spot; only a run that reaches
//! [`Stage::Report`] yields an `OK` report. Every check except the
//! execute-and-parse stage runs before a process is started.
//!
//! ```text
//! ValidateCredentials → ValidateIncludeExclude → ValidateAndExtractRegexes
//!     → BuildCommand → ExecuteAndParse → Report
//! ```

use std::fmt;
use std::time::Duration;

use svcwatch_common::error::ProbeError;
use svcwatch_common::models::params::RunParameters;
use svcwatch_common::models::platform::Platform;
use svcwatch_common::models::report::ProbeReport;
use svcwatch_common::models::service::ResultSet;
use svcwatch_common::utils::redact;
use svcwatch_common::{debug, error, success};

use crate::command;
use crate::filter::ServiceFilter;
use crate::parser::OutputParser;
use crate::patterns::PatternSet;
use crate::runner::{QueryRunner, ShellToolLocator, ToolLocator, WmicRunner};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateCredentials,
    ValidateIncludeExclude,
    ValidateAndExtractRegexes,
    BuildCommand,
    ExecuteAndParse,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ValidateCredentials => "validate credentials",
            Self::ValidateIncludeExclude => "validate include/exclude",
            Self::ValidateAndExtractRegexes => "validate display name patterns",
            Self::BuildCommand => "build command",
            Self::ExecuteAndParse => "execute and parse",
            Self::Report => "report",
        };
        f.write_str(name)
    }
}

/// A failed run, with the stage it failed in.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: Stage,
    pub error: ProbeError,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.error)
    }
}

impl std::error::Error for StageFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

fn gate<T>(stage: Stage, result: Result<T, ProbeError>) -> Result<T, StageFailure> {
    debug!(verbosity = 1, "Stage: {stage}");
    result.map_err(|error| StageFailure { stage, error })
}

/// Everything the pre-flight stages produce: the command line and the
/// compiled patterns.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    pub argv: Vec<String>,
    pub patterns: PatternSet,
}

pub struct ServiceProbe {
    runner: Box<dyn QueryRunner>,
    locator: Box<dyn ToolLocator>,
    platform: Platform,
    timeout: Duration,
}

impl ServiceProbe {
    pub fn new(
        runner: Box<dyn QueryRunner>,
        locator: Box<dyn ToolLocator>,
        platform: Platform,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            locator,
            platform,
            timeout,
        }
    }

    /// A probe that runs the real `wmic` on the detected platform.
    pub fn system(timeout: Duration) -> Self {
        Self::new(
            Box::new(WmicRunner),
            Box::new(ShellToolLocator),
            Platform::detect(),
            timeout,
        )
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Runs a full cycle and converts the outcome into a report.
    pub async fn run(&self, params: &RunParameters) -> ProbeReport {
        match self.execute(params).await {
            Ok(results) => {
                debug!(verbosity = 1, "Stage: {}", Stage::Report);
                success!("{} service(s) matched", results.len());
                ProbeReport::ok(&results)
            }
            Err(failure) => {
                error!(kind = ?failure.error.kind(), "{failure}");
                ProbeReport::unknown(&failure.error)
            }
        }
    }

    /// Runs every stage up to and including [`Stage::BuildCommand`].
    ///
    /// The tool lookup on Linux stations runs under the same timeout as the query.
    pub async fn prepare(&self, params: &RunParameters) -> Result<PreparedQuery, StageFailure> {
        gate(Stage::ValidateCredentials, validate::check_credentials(params))?;
        gate(Stage::ValidateIncludeExclude, validate::check_exclusivity(params))?;
        let patterns = gate(
            Stage::ValidateAndExtractRegexes,
            PatternSet::compile(params.service_display_name()),
        )?;
        let build = command::build_command(params, &self.platform, self.locator.as_ref());
        let argv = gate(Stage::BuildCommand, self.bounded(build).await)?;

        debug!(
            verbosity = 2,
            "Command line: {}",
            redact::command_line(&argv).join(" ")
        );
        Ok(PreparedQuery { argv, patterns })
    }

    /// Runs the cycle and returns the raw result set.
    pub async fn execute(&self, params: &RunParameters) -> Result<ResultSet, StageFailure> {
        let PreparedQuery { argv, patterns } = self.prepare(params).await?;
        let filter = ServiceFilter::new(params, patterns);

        let outcome = self.bounded(self.query(&argv, &filter)).await;
        gate(Stage::ExecuteAndParse, outcome)
    }

    /// Awaits `work` for at most the configured timeout. Dropping the future
    /// on expiry kills any child process it owns.
    async fn bounded<T, F>(&self, work: F) -> Result<T, ProbeError>
    where
        F: Future<Output = Result<T, ProbeError>>,
    {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        }
    }

    /// Streams the process output through parser and filter.
    ///
    /// Any early return drops the process handle, which kills the child.
    async fn query(&self, argv: &[String], filter: &ServiceFilter) -> Result<ResultSet, ProbeError> {
        let mut process = self.runner.spawn(argv)?;
        let mut parser = OutputParser::new(&self.platform);
        let mut results = ResultSet::new();
        let mut rows = 0usize;

        while let Some(line) = process.next_line().await? {
            if let Some(record) = parser.feed(&line)? {
                rows += 1;
                filter.apply(&record, &mut results);
            }
        }

        let exit_code = process.wait().await?;
        debug!(verbosity = 1, "wmic exited with {exit_code:?} after {rows} service row(s)");

        if !parser.header_found() {
            return Err(ProbeError::AuthenticationFailed);
        }
        Ok(results)
    }
}
