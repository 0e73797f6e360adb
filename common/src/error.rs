// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Probe Failures
//!
//! Every way a probe run can end without a report. The `Display` text of each
//! variant is the message handed back to the monitoring framework, so it is
//! written for the person configuring the monitor rather than for developers.

use std::time::Duration;

use thiserror::Error;

/// Coarse grouping of [`ProbeError`]s, mostly used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user supplied an impossible or incomplete set of parameters.
    Configuration,
    /// The monitoring station cannot run the requested query.
    Platform,
    /// The external tool answered, but not in a shape we understand.
    Protocol,
    /// Launching or talking to the external tool failed.
    Execution,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Please enter the Hostname.")]
    MissingHostName,

    #[error("Please enter the Service Display Name.")]
    MissingServiceDisplayName,

    #[error("Please enter the Password.")]
    MissingPassword,

    #[error("Please enter the User Name.")]
    MissingUserName,

    #[error("Please enter the Domain Name.")]
    MissingDomainName,

    #[error("localhost does not need Domain, User Name, and Password.")]
    LocalhostCredentials,

    #[error("Please select one of Startup Type (Include) & Startup Type (Exclude).")]
    StartupTypeConflict,

    #[error("Please select one of Service Status (Include) & Service Status (Exclude).")]
    ServiceStatusConflict,

    #[error("One or more service display name(s) contains invalid regex syntax.")]
    InvalidPatternList { pattern: String },

    #[error("The service display name has invalid regex syntax.")]
    InvalidPattern { pattern: String },

    #[error("Windows service checks can only run on a Windows / Linux monitoring station (found {os}).")]
    UnsupportedPlatform { os: String },

    #[error("The localhost is Linux OS, Choose remote Windows host.")]
    LocalhostOnLinux,

    #[error("WMIC Client is not installed on the Linux monitoring station.")]
    ToolNotInstalled,

    #[error("Authentication failed, unable to get result from executing wmic command.")]
    AuthenticationFailed,

    #[error("wmic output has an incorrect format: '{line}'")]
    IncorrectFormat { line: String },

    #[error("wmic output has an empty column: '{line}'")]
    EmptyColumn { line: String },

    #[error("Unable to execute wmic command: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Error occurred while reading wmic output: {0}")]
    Io(#[source] std::io::Error),

    #[error("wmic did not finish within {} seconds.", .0.as_secs())]
    Timeout(Duration),
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingHostName
            | Self::MissingServiceDisplayName
            | Self::MissingPassword
            | Self::MissingUserName
            | Self::MissingDomainName
            | Self::LocalhostCredentials
            | Self::StartupTypeConflict
            | Self::ServiceStatusConflict
            | Self::InvalidPatternList { .. }
            | Self::InvalidPattern { .. } => ErrorKind::Configuration,
            Self::UnsupportedPlatform { .. } | Self::LocalhostOnLinux | Self::ToolNotInstalled => {
                ErrorKind::Platform
            }
            Self::AuthenticationFailed | Self::IncorrectFormat { .. } | Self::EmptyColumn { .. } => {
                ErrorKind::Protocol
            }
            Self::Spawn(_) | Self::Io(_) | Self::Timeout(_) => ErrorKind::Execution,
        }
    }
}
