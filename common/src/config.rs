// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::Duration;

/// How long a single `wmic` query may run before it is killed.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Global configuration options for one probe execution.
///
/// This struct controls how the probe presents itself and how long it is
/// willing to wait on the remote host. It says nothing about *what* is
/// queried; that lives in [`RunParameters`](crate::models::params::RunParameters).
#[derive(Debug, Clone)]
pub struct Config {
    /// Toggles the display of the startup banner line.
    pub no_banner: bool,

    /// Controls the visual density of the terminal output.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, headers, colors and the spinner.
    /// * **1**: Reduced styling, no headers.
    /// * **2**: Raw mode. Only the matched service lines are printed, suitable for piping.
    pub quiet: u8,

    /// Masks the password wherever a command line is printed or logged.
    ///
    /// Enabled by default; the `query` subcommand can turn it off with
    /// `--show-secrets`.
    pub redact: bool,

    /// Prints the monitor output variables as a JSON object instead of
    /// the human readable report.
    pub json: bool,

    /// Upper bound for running the external query and consuming its output.
    ///
    /// When it elapses the child process is killed and the run ends in the
    /// `UNKNOWN` state.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            redact: true,
            json: false,
            timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}
