// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! What a probe run hands back to the monitoring framework.

use std::fmt;

use serde::Serialize;

use crate::error::ProbeError;
use crate::models::service::ResultSet;

pub const SUCCESS_MESSAGE: &str = "Monitor ran successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MonitorState {
    Ok,
    Unknown,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Outcome plus output variables of a single probe run.
///
/// A report in the `UNKNOWN` state never carries matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub state: MonitorState,
    pub message: String,
    pub matched_services: String,
    pub number_of_matches: usize,
    /// The matches themselves, for callers that render them differently.
    #[serde(skip)]
    pub services: ResultSet,
}

impl ProbeReport {
    pub fn ok(results: &ResultSet) -> Self {
        Self {
            state: MonitorState::Ok,
            message: SUCCESS_MESSAGE.to_string(),
            matched_services: results.to_listing(),
            number_of_matches: results.len(),
            services: results.clone(),
        }
    }

    pub fn unknown(err: &ProbeError) -> Self {
        Self {
            state: MonitorState::Unknown,
            message: err.to_string(),
            matched_services: String::new(),
            number_of_matches: 0,
            services: ResultSet::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.state == MonitorState::Ok
    }
}
