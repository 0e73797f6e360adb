// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Windows Service Model
//!
//! [`ServiceRecord`] is one parsed line of `wmic` output. It only lives long
//! enough to be offered to the filter, which copies what it keeps into a
//! [`ResultSet`].

use std::collections::BTreeMap;

/// A single service as reported by `wmic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    /// Human readable name (`Caption`). May contain commas.
    pub display_name: String,
    /// Internal service identifier (`Name`). Parsed, never filtered on.
    pub short_name: String,
    /// `StartMode`, e.g. "Auto", "Manual", "Disabled".
    pub startup_type: String,
    /// `State`, e.g. "Running", "Stopped".
    pub status: String,
}

impl ServiceRecord {
    pub fn new(
        display_name: impl Into<String>,
        short_name: impl Into<String>,
        startup_type: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            short_name: short_name.into(),
            startup_type: startup_type.into(),
            status: status.into(),
        }
    }
}

/// The part of a record that is kept once it passed the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceState {
    pub startup_type: String,
    pub status: String,
}

impl From<&ServiceRecord> for ServiceState {
    fn from(record: &ServiceRecord) -> Self {
        Self {
            startup_type: record.startup_type.clone(),
            status: record.status.clone(),
        }
    }
}

/// Matched services keyed by display name.
///
/// Inserting an existing display name replaces the stored state. Iteration is
/// ordered by display name so reports are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    services: BTreeMap<String, ServiceState>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: &ServiceRecord) {
        self.services
            .insert(record.display_name.clone(), ServiceState::from(record));
    }

    pub fn get(&self, display_name: &str) -> Option<&ServiceState> {
        self.services.get(display_name)
    }

    pub fn remove(&mut self, display_name: &str) -> Option<ServiceState> {
        self.services.remove(display_name)
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.services.contains_key(display_name)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ServiceState)> {
        self.services.iter()
    }

    /// One `<name> / Startup Type : <type> / Status : <status>` line per service.
    pub fn to_listing(&self) -> String {
        self.services
            .iter()
            .map(|(name, state)| {
                format!(
                    "{name} / Startup Type : {} / Status : {}",
                    state.startup_type, state.status
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_overwrites() {
        let mut set = ResultSet::new();
        set.insert(&ServiceRecord::new("Spooler", "Spooler", "Auto", "Running"));
        set.insert(&ServiceRecord::new("Spooler", "Spooler", "Manual", "Stopped"));

        assert_eq!(set.len(), 1);
        let state = set.get("Spooler").unwrap();
        assert_eq!(state.startup_type, "Manual");
        assert_eq!(state.status, "Stopped");
    }

    #[test]
    fn listing_format() {
        let mut set = ResultSet::new();
        set.insert(&ServiceRecord::new("Windows Update", "wuauserv", "Manual", "Stopped"));
        set.insert(&ServiceRecord::new("DHCP Client", "Dhcp", "Auto", "Running"));

        assert_eq!(
            set.to_listing(),
            "DHCP Client / Startup Type : Auto / Status : Running\n\
             Windows Update / Startup Type : Manual / Status : Stopped"
        );
    }

    #[test]
    fn empty_listing_is_empty_string() {
        assert_eq!(ResultSet::new().to_listing(), "");
    }

    #[test]
    fn remove_returns_state() {
        let mut set = ResultSet::new();
        set.insert(&ServiceRecord::new("Fax", "Fax", "Disabled", "Stopped"));
        assert!(set.remove("Fax").is_some());
        assert!(!set.contains("Fax"));
        assert!(set.is_empty());
    }
}
