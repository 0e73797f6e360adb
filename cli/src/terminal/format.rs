// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use svcwatch_common::models::report::MonitorState;
use svcwatch_common::models::service::ServiceState;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn status_color(status: &str) -> Color {
    if status.contains("Running") {
        colors::RUNNING
    } else if status.contains("Stopped") {
        colors::STOPPED
    } else {
        colors::PENDING
    }
}

pub fn startup_color(startup_type: &str) -> Color {
    if startup_type.contains("Disabled") {
        colors::DISABLED
    } else {
        colors::STARTUP
    }
}

pub fn service_to_detail(state: &ServiceState) -> Vec<Detail> {
    vec![
        (
            String::from("Startup"),
            state.startup_type.color(startup_color(&state.startup_type)),
        ),
        (
            String::from("Status"),
            state.status.color(status_color(&state.status)),
        ),
    ]
}

pub fn monitor_state(state: MonitorState) -> ColoredString {
    match state {
        MonitorState::Ok => state.to_string().green().bold(),
        MonitorState::Unknown => state.to_string().yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_states_get_their_own_color() {
        assert_eq!(status_color("Running"), colors::RUNNING);
        assert_eq!(status_color("Stopped"), colors::STOPPED);
        assert_eq!(status_color("Start Pending"), colors::PENDING);
    }

    #[test]
    fn detail_order_is_startup_then_status() {
        let details = service_to_detail(&ServiceState {
            startup_type: "Disabled".into(),
            status: "Stopped".into(),
        });
        let keys: Vec<&str> = details.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Startup", "Status"]);
    }
}
