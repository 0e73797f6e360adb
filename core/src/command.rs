// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # WMIC Command Builder
//!
//! Turns run parameters into the exact argument vector for `wmic`.
//!
//! Two very different clients answer to that name:
//!
//! * **Windows** ships `wmic.exe`, which takes `/node:`, `/user:` and
//!   `/password:` selectors followed by an alias query (`Service GET ...`).
//! * **Linux** stations use the Samba based client, which takes the credentials
//!   as `-U [domain/]user%password`, the target as `//host`, and a WQL query.
//!
//! Both are asked for the same four columns in the same order, and both are
//! told to separate fields with a comma.

use svcwatch_common::error::ProbeError;
use svcwatch_common::models::params::RunParameters;
use svcwatch_common::models::platform::Platform;
use svcwatch_common::{debug, info};

use crate::runner::ToolLocator;

pub const WMIC: &str = "wmic";

/// Caption (display name), Name (short name), StartMode (startup type), State (status).
pub const SERVICE_COLUMNS: &str = "Caption,Name,StartMode,State";

const WINDOWS_CSV_FORMAT: &str = "/format:csv";
const LINUX_DELIMITER: &str = "--delimiter=,";

/// WQL query for the Samba client, selecting the same columns as on Windows.
pub fn linux_service_query() -> String {
    format!("select {SERVICE_COLUMNS} from Win32_Service")
}

/// Builds the `wmic` argument vector for the given platform.
///
/// On Linux the tool is looked up through `locator` before anything is
/// built, since a missing client would otherwise surface as a confusing
/// spawn error.
pub async fn build_command(
    params: &RunParameters,
    platform: &Platform,
    locator: &dyn ToolLocator,
) -> Result<Vec<String>, ProbeError> {
    match platform {
        Platform::Windows => Ok(windows_command(params)),
        Platform::Linux => {
            if params.is_localhost() {
                return Err(ProbeError::LocalhostOnLinux);
            }
            if !locator.is_installed(WMIC).await {
                return Err(ProbeError::ToolNotInstalled);
            }
            debug!(verbosity = 1, "Found {WMIC} client on the monitoring station");
            Ok(linux_command(params))
        }
        Platform::Unsupported(os) => Err(ProbeError::UnsupportedPlatform { os: os.clone() }),
    }
}

fn windows_command(params: &RunParameters) -> Vec<String> {
    let mut args = vec![
        WMIC.to_string(),
        format!("/node:\"{}\"", params.host_name()),
    ];

    if !params.is_localhost() {
        let user = params.user_name().unwrap_or_default();
        let user = match params.domain_name().filter(|d| !d.is_empty()) {
            Some(domain) => format!("{domain}\\{user}"),
            None => user.to_string(),
        };
        args.push(format!("/user:{user}"));
        args.push(format!("/password:{}", params.password().unwrap_or_default()));
    } else {
        info!(verbosity = 1, "Querying local services");
    }

    args.extend([
        "Service".to_string(),
        "GET".to_string(),
        SERVICE_COLUMNS.to_string(),
        WINDOWS_CSV_FORMAT.to_string(),
    ]);
    args
}

fn linux_command(params: &RunParameters) -> Vec<String> {
    let user = params.user_name().unwrap_or_default();
    let password = params.password().unwrap_or_default();
    let credentials = match params.domain_name().filter(|d| !d.is_empty()) {
        Some(domain) => format!("{domain}/{user}%{password}"),
        None => format!("{user}%{password}"),
    };

    vec![
        WMIC.to_string(),
        "-U".to_string(),
        credentials,
        format!("//{}", params.host_name()),
        linux_service_query(),
        LINUX_DELIMITER.to_string(),
    ]
}
