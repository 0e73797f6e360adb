// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Service Filter Engine
//!
//! Decides, record by record, what ends up in the [`ResultSet`].
//!
//! Filtering happens in two passes per record:
//!
//! 1.  **Name and startup type**: for every pattern that matches the display
//!     name, the record is stored if its startup type passes the startup
//!     selection. Storing overwrites whatever was kept under that name before.
//! 2.  **Status**: if a status selection exists and something is stored under
//!     the display name, the *stored* status is checked and the entry is
//!     dropped if it fails.
//!
//! All comparisons on startup type and status are substring checks, since
//! `wmic` may decorate values (e.g. "Auto (Delayed Start)").

use svcwatch_common::models::params::RunParameters;
use svcwatch_common::models::service::{ResultSet, ServiceRecord};
use svcwatch_common::trace;

use crate::patterns::PatternSet;

/// An include/exclude pair, collapsed to the single selection in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Include(String),
    Exclude(String),
    Any,
}

impl Selection {
    /// Include wins if both are given; the validation stage rejects that anyway.
    pub fn from_pair(include: Option<&str>, exclude: Option<&str>) -> Self {
        match (
            include.filter(|v| !v.is_empty()),
            exclude.filter(|v| !v.is_empty()),
        ) {
            (Some(value), _) => Self::Include(value.to_string()),
            (None, Some(value)) => Self::Exclude(value.to_string()),
            (None, None) => Self::Any,
        }
    }

    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::Include(wanted) => value.contains(wanted.as_str()),
            Self::Exclude(unwanted) => !value.contains(unwanted.as_str()),
            Self::Any => true,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

#[derive(Debug, Clone)]
pub struct ServiceFilter {
    patterns: PatternSet,
    startup: Selection,
    status: Selection,
}

impl ServiceFilter {
    pub fn new(params: &RunParameters, patterns: PatternSet) -> Self {
        Self {
            patterns,
            startup: Selection::from_pair(params.startup_type_include(), params.startup_type_exclude()),
            status: Selection::from_pair(
                params.service_status_include(),
                params.service_status_exclude(),
            ),
        }
    }

    /// Runs both passes for one record against the accumulated results.
    pub fn apply(&self, record: &ServiceRecord, results: &mut ResultSet) {
        for pattern in self.patterns.iter() {
            if pattern.is_match(&record.display_name) && self.startup.admits(&record.startup_type) {
                trace!("'{}' matched '{}'", record.display_name, pattern.as_str());
                results.insert(record);
            }
        }

        if self.status.is_any() {
            return;
        }

        let rejected = results
            .get(&record.display_name)
            .is_some_and(|stored| !self.status.admits(&stored.status));
        if rejected {
            results.remove(&record.display_name);
        }
    }
}
