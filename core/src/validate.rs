// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Parameter gates that run before any process is started.

use svcwatch_common::debug;
use svcwatch_common::error::ProbeError;
use svcwatch_common::models::params::RunParameters;

/// Checks that the credentials fit the host mode.
///
/// A host and a display name pattern are required in every mode.
/// Remote hosts need a password, a user name and a domain, checked in that
/// order; only the first missing one is reported. `localhost` must come
/// without any of them.
pub fn check_credentials(params: &RunParameters) -> Result<(), ProbeError> {
    if params.host_name().is_empty() {
        return Err(ProbeError::MissingHostName);
    }
    if params.service_display_name().trim().is_empty() {
        return Err(ProbeError::MissingServiceDisplayName);
    }

    if params.is_localhost() {
        if params.has_domain_name() || params.has_user_name() || params.has_password() {
            return Err(ProbeError::LocalhostCredentials);
        }
        debug!(verbosity = 1, "Querying localhost, no credentials needed");
        return Ok(());
    }

    if !params.has_password() {
        return Err(ProbeError::MissingPassword);
    }
    if !params.has_user_name() {
        return Err(ProbeError::MissingUserName);
    }
    if !params.has_domain_name() {
        return Err(ProbeError::MissingDomainName);
    }

    Ok(())
}

/// Include and exclude are mutually exclusive, for startup type and for status.
pub fn check_exclusivity(params: &RunParameters) -> Result<(), ProbeError> {
    if params.is_startup_include_selected() && params.is_startup_exclude_selected() {
        return Err(ProbeError::StartupTypeConflict);
    }
    if params.is_status_include_selected() && params.is_status_exclude_selected() {
        return Err(ProbeError::ServiceStatusConflict);
    }
    Ok(())
}
