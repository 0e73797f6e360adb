// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The operating system of the monitoring station.
//!
//! The probe never branches on `cfg!(windows)` directly. Instead the detected
//! [`Platform`] is handed to the command builder and the output parser, which
//! keeps both testable from any host.

use std::fmt;

/// Number of logical columns requested from `wmic`.
pub const SERVICE_COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Native `wmic.exe`; CSV output carries a leading `Node` column.
    Windows,
    /// The Samba based `wmic` client; output starts with the first requested column.
    Linux,
    /// Anything else, named as reported by the OS.
    Unsupported(String),
}

impl Platform {
    /// Detects the platform of the machine the probe is running on.
    pub fn detect() -> Self {
        let os_type = sys_info::os_type().unwrap_or_else(|_| std::env::consts::OS.to_string());
        Self::from_os_type(&os_type)
    }

    /// Maps an OS name (as reported by `sys_info::os_type` or `std::env::consts::OS`).
    pub fn from_os_type(os_type: &str) -> Self {
        match os_type.to_ascii_lowercase().as_str() {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            _ => Self::Unsupported(os_type.to_string()),
        }
    }

    /// Number of comma separated tokens in a well-formed data line.
    pub fn expected_columns(&self) -> usize {
        match self {
            Self::Windows => SERVICE_COLUMNS + 1,
            Self::Linux | Self::Unsupported(_) => SERVICE_COLUMNS,
        }
    }

    /// Index of the first service column in a tokenized data line.
    pub fn first_content_column(&self) -> usize {
        self.expected_columns() - SERVICE_COLUMNS
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::Linux => write!(f, "Linux"),
            Self::Unsupported(os) => write!(f, "{os}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_has_node_column() {
        assert_eq!(Platform::Windows.expected_columns(), 5);
        assert_eq!(Platform::Windows.first_content_column(), 1);
    }

    #[test]
    fn linux_has_no_node_column() {
        assert_eq!(Platform::Linux.expected_columns(), 4);
        assert_eq!(Platform::Linux.first_content_column(), 0);
    }

    #[test]
    fn os_names_are_case_insensitive() {
        assert_eq!(Platform::from_os_type("Linux"), Platform::Linux);
        assert_eq!(Platform::from_os_type("windows"), Platform::Windows);
        assert_eq!(
            Platform::from_os_type("Darwin"),
            Platform::Unsupported("Darwin".into())
        );
    }
}
