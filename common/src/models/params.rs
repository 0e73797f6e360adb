// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Run Parameter Model
//!
//! The resolved user configuration for one probe run.
//!
//! Parameters arrive in two steps:
//! 1.  [`RawParameters`]: exactly what the monitoring framework (or the CLI, or a
//!     TOML file) handed us. Every field is optional and nothing is checked.
//! 2.  [`RunParameters`]: an immutable snapshot built from the raw values, with
//!     the startup type vocabulary normalized to what `wmic` prints.
//!
//! Construction never fails. Whether the combination makes sense is decided by
//! the validation stage of the probe.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Host name that switches the probe into localhost mode.
pub const LOCALHOST: &str = "localhost";

/// Startup type as offered to users, and the abbreviation `wmic` uses for it.
const AUTOMATIC: &str = "Automatic";
const AUTO: &str = "Auto";

/// Unvalidated input, keyed by the monitoring framework's parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RawParameters {
    pub hostname: Option<String>,
    pub domain_name: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub service_display_name: Option<String>,
    pub startup_type_include: Option<String>,
    pub startup_type_exclude: Option<String>,
    pub service_status_include: Option<String>,
    pub service_status_exclude: Option<String>,
}

impl RawParameters {
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        toml::from_str(input).context("invalid parameter file")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read parameter file '{}'", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Layers `other` on top of `self`. Values present in `other` win.
    pub fn overlay(self, other: RawParameters) -> Self {
        Self {
            hostname: other.hostname.or(self.hostname),
            domain_name: other.domain_name.or(self.domain_name),
            user_name: other.user_name.or(self.user_name),
            password: other.password.or(self.password),
            service_display_name: other.service_display_name.or(self.service_display_name),
            startup_type_include: other.startup_type_include.or(self.startup_type_include),
            startup_type_exclude: other.startup_type_exclude.or(self.startup_type_exclude),
            service_status_include: other.service_status_include.or(self.service_status_include),
            service_status_exclude: other.service_status_exclude.or(self.service_status_exclude),
        }
    }
}

/// Immutable configuration of a single probe run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunParameters {
    host_name: String,
    domain_name: Option<String>,
    user_name: Option<String>,
    password: Option<String>,
    service_display_name: String,
    startup_type_include: Option<String>,
    startup_type_exclude: Option<String>,
    service_status_include: Option<String>,
    service_status_exclude: Option<String>,
}

impl From<RawParameters> for RunParameters {
    fn from(raw: RawParameters) -> Self {
        Self {
            host_name: raw.hostname.unwrap_or_default(),
            domain_name: raw.domain_name,
            user_name: raw.user_name,
            password: raw.password,
            service_display_name: raw.service_display_name.unwrap_or_default(),
            startup_type_include: raw.startup_type_include.map(normalize_startup_type),
            startup_type_exclude: raw.startup_type_exclude.map(normalize_startup_type),
            service_status_include: raw.service_status_include,
            service_status_exclude: raw.service_status_exclude,
        }
    }
}

/// `wmic` reports automatic services as "Auto".
fn normalize_startup_type(value: String) -> String {
    if value == AUTOMATIC {
        AUTO.to_string()
    } else {
        value
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl RunParameters {
    pub fn new(raw: RawParameters) -> Self {
        Self::from(raw)
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn service_display_name(&self) -> &str {
        &self.service_display_name
    }

    pub fn startup_type_include(&self) -> Option<&str> {
        self.startup_type_include.as_deref()
    }

    pub fn startup_type_exclude(&self) -> Option<&str> {
        self.startup_type_exclude.as_deref()
    }

    pub fn service_status_include(&self) -> Option<&str> {
        self.service_status_include.as_deref()
    }

    pub fn service_status_exclude(&self) -> Option<&str> {
        self.service_status_exclude.as_deref()
    }

    pub fn is_localhost(&self) -> bool {
        self.host_name == LOCALHOST
    }

    pub fn has_domain_name(&self) -> bool {
        is_set(&self.domain_name)
    }

    pub fn has_user_name(&self) -> bool {
        is_set(&self.user_name)
    }

    pub fn has_password(&self) -> bool {
        is_set(&self.password)
    }

    pub fn is_startup_include_selected(&self) -> bool {
        is_set(&self.startup_type_include)
    }

    pub fn is_startup_exclude_selected(&self) -> bool {
        is_set(&self.startup_type_exclude)
    }

    pub fn is_status_include_selected(&self) -> bool {
        is_set(&self.service_status_include)
    }

    pub fn is_status_exclude_selected(&self) -> bool {
        is_set(&self.service_status_exclude)
    }

    /// Returns a copy with host, domain, user name and password cleared.
    pub fn without_credentials(self) -> Self {
        Self {
            host_name: String::new(),
            domain_name: None,
            user_name: None,
            password: None,
            ..self
        }
    }

    /// Returns a copy with every startup type and service status selection cleared.
    pub fn without_filters(self) -> Self {
        Self {
            startup_type_include: None,
            startup_type_exclude: None,
            service_status_include: None,
            service_status_exclude: None,
            ..self
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║                   TESTS                    ║
// ╚════════════════════════════════════════════╝
