// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use svcwatch_common::error::ProbeError;
use svcwatch_common::models::params::RawParameters;
use svcwatch_common::models::platform::Platform;
use svcwatch_common::models::report::{MonitorState, SUCCESS_MESSAGE};

use crate::utils::{local, remote, replay_probe, run_params};

const WINDOWS_CSV: &str = "\r
Node,Caption,Name,StartMode,State\r
WINBOX01,Print Spooler,Spooler,Auto,Running\r
WINBOX01,Windows Update,wuauserv,Manual,Stopped\r
WINBOX01,Windows Search,WSearch,Auto,Running\r
WINBOX01,Windows Defender Firewall,mpssvc,Auto,Running\r
WINBOX01,Remote Registry,RemoteRegistry,Disabled,Stopped\r
";

#[tokio::test]
async fn test_localhost_lists_matching_services() {
    let probe = replay_probe(Platform::Windows, WINDOWS_CSV);
    let report = probe.run(&run_params(local("Windows.*"))).await;

    assert_eq!(report.state, MonitorState::Ok);
    assert_eq!(report.message, SUCCESS_MESSAGE);
    assert_eq!(report.number_of_matches, 3);
    assert_eq!(
        report.matched_services,
        "Windows Defender Firewall / Startup Type : Auto / Status : Running\n\
         Windows Search / Startup Type : Auto / Status : Running\n\
         Windows Update / Startup Type : Manual / Status : Stopped"
    );
}

#[tokio::test]
async fn test_startup_and_status_filters_combine() {
    let probe = replay_probe(Platform::Windows, WINDOWS_CSV);
    let raw = RawParameters {
        startup_type_include: Some("Automatic".into()),
        service_status_exclude: Some("Stopped".into()),
        ..remote(".*")
    };
    let report = probe.run(&run_params(raw)).await;

    assert!(report.is_ok(), "{}", report.message);
    assert_eq!(report.number_of_matches, 3);
    assert!(report.services.contains("Print Spooler"));
    assert!(!report.services.contains("Windows Update"));
    assert!(!report.services.contains("Remote Registry"));
}

#[tokio::test]
async fn test_pattern_must_match_whole_name() {
    let probe = replay_probe(Platform::Windows, WINDOWS_CSV);
    let report = probe.run(&run_params(remote("Spooler"))).await;

    assert!(report.is_ok());
    assert_eq!(report.number_of_matches, 0);
    assert!(report.matched_services.is_empty());
}

#[tokio::test]
async fn test_no_header_means_authentication_failure() {
    let probe = replay_probe(Platform::Windows, "ERROR:\r\nDescription = Access is denied.\r\n");
    let report = probe.run(&run_params(remote(".*"))).await;

    assert_eq!(report.state, MonitorState::Unknown);
    assert_eq!(report.message, ProbeError::AuthenticationFailed.to_string());
    assert_eq!(report.number_of_matches, 0);
}

#[tokio::test]
async fn test_truncated_row_aborts_run() {
    let output = format!("{WINDOWS_CSV}WINBOX01,Broken,Row\r\n");
    let probe = replay_probe(Platform::Windows, &output);
    let report = probe.run(&run_params(local(".*"))).await;

    assert_eq!(report.state, MonitorState::Unknown);
    assert!(report.message.contains("incorrect format"), "{}", report.message);
    assert!(report.services.is_empty());
}

#[tokio::test]
async fn test_localhost_with_credentials_is_rejected() {
    let probe = replay_probe(Platform::Windows, WINDOWS_CSV);
    let raw = RawParameters {
        user_name: Some("admin".into()),
        ..local(".*")
    };
    let report = probe.run(&run_params(raw)).await;

    assert_eq!(report.state, MonitorState::Unknown);
    assert_eq!(report.message, ProbeError::LocalhostCredentials.to_string());
}

#[tokio::test]
async fn test_prepared_command_for_remote_windows() {
    let probe = replay_probe(Platform::Windows, "");
    let prepared = probe
        .prepare(&run_params(remote("Print.*,Windows.*")))
        .await
        .expect("remote parameters are complete");

    assert_eq!(
        prepared.argv,
        vec![
            "wmic",
            "/node:\"winbox01\"",
            "/user:CORP\\monitor",
            "/password:s3cret",
            "Service",
            "GET",
            "Caption,Name,StartMode,State",
            "/format:csv",
        ]
    );
    assert_eq!(prepared.patterns.len(), 2);
}

#[tokio::test]
async fn test_missing_display_name_is_not_reported_healthy() {
    let probe = replay_probe(Platform::Windows, WINDOWS_CSV);
    let raw = RawParameters {
        service_display_name: None,
        ..remote(".*")
    };
    let report = probe.run(&run_params(raw)).await;

    assert_eq!(report.state, MonitorState::Unknown);
    assert_eq!(
        report.message,
        ProbeError::MissingServiceDisplayName.to_string()
    );
    assert_eq!(report.number_of_matches, 0);
}
