// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Utilities for keeping credentials out of terminal output and logs.
//!
//! The `wmic` command line carries the password in clear text, either as a
//! `/password:` selector (Windows) or inside the `-U user%password` value
//! (Linux). Anything that prints or logs a command line runs it through
//! [`command_line`] first.

const MASK: &str = "XXXXX";
const PASSWORD_SELECTOR: &str = "/password:";
const CREDENTIALS_FLAG: &str = "-U";

/// Masks the password positions of a `wmic` argument vector.
///
/// Only the value of the `/password:` selector and the part after the first
/// `%` of the argument following `-U` are replaced. Everything else is left
/// as is, whatever the password looks like.
///
/// # Examples
/// ```
/// use svcwatch_common::utils::redact;
///
/// let argv = vec!["wmic".to_string(), "-U".to_string(), "CORP/admin%hunter2".to_string()];
/// assert_eq!(redact::command_line(&argv), vec!["wmic", "-U", "CORP/admin%XXXXX"]);
/// ```
pub fn command_line(argv: &[String]) -> Vec<String> {
    let mut masked = Vec::with_capacity(argv.len());
    let mut credentials_next = false;

    for arg in argv {
        let redacted = if credentials_next {
            match arg.split_once('%') {
                Some((user, _)) => format!("{user}%{MASK}"),
                None => arg.clone(),
            }
        } else if let Some(value) = arg.strip_prefix(PASSWORD_SELECTOR) {
            if value.is_empty() {
                arg.clone()
            } else {
                format!("{PASSWORD_SELECTOR}{MASK}")
            }
        } else {
            arg.clone()
        };

        credentials_next = arg == CREDENTIALS_FLAG;
        masked.push(redacted);
    }
    masked
}
