// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::time::Duration;

use svcwatch_common::error::ProbeError;
use svcwatch_common::models::params::RawParameters;
use svcwatch_common::models::platform::Platform;
use svcwatch_common::models::report::MonitorState;
use svcwatch_core::probe::{ServiceProbe, Stage};
use svcwatch_core::runner::ReplayRunner;

use crate::utils::{FakeLocator, local, remote, replay_probe, run_params};

const SAMBA_OUTPUT: &str = "\
dcerpc_pipe_connect ncacn_np:winbox01 - NT_STATUS_OK
CLASS: Win32_Service
Caption,Name,StartMode,State
Print Spooler,Spooler,Auto,Running
Windows Update,wuauserv,Manual,Stopped

CLASS: Win32_TerminalService
Caption,Name,StartMode,State
Remote Desktop Services,TermService,Manual,Running
Contoso Backup, Agent,ContosoBackup,Auto,Stopped
";

#[tokio::test]
async fn test_samba_noise_is_skipped() {
    let probe = replay_probe(Platform::Linux, SAMBA_OUTPUT);
    let report = probe.run(&run_params(remote(".*"))).await;

    assert!(report.is_ok(), "{}", report.message);
    assert_eq!(report.number_of_matches, 4);
    assert!(report.services.contains("Remote Desktop Services"));
}

#[tokio::test]
async fn test_display_name_with_comma_is_rebuilt() {
    let probe = replay_probe(Platform::Linux, SAMBA_OUTPUT);
    let report = probe.run(&run_params(remote("Contoso.*"))).await;

    assert_eq!(report.number_of_matches, 1);
    assert_eq!(
        report.matched_services,
        "Contoso Backup, Agent / Startup Type : Auto / Status : Stopped"
    );
}

#[tokio::test]
async fn test_status_include_filters_rows() {
    let probe = replay_probe(Platform::Linux, SAMBA_OUTPUT);
    let raw = RawParameters {
        service_status_include: Some("Running".into()),
        ..remote(".*")
    };
    let report = probe.run(&run_params(raw)).await;

    assert_eq!(report.number_of_matches, 2);
    assert!(report.services.contains("Print Spooler"));
    assert!(report.services.contains("Remote Desktop Services"));
}

#[tokio::test]
async fn test_localhost_is_not_supported_on_linux() {
    let probe = replay_probe(Platform::Linux, SAMBA_OUTPUT);
    let failure = probe
        .execute(&run_params(local(".*")))
        .await
        .expect_err("localhost cannot be queried from linux");

    assert_eq!(failure.stage, Stage::BuildCommand);
    assert!(matches!(failure.error, ProbeError::LocalhostOnLinux));
}

#[tokio::test]
async fn test_missing_wmic_is_reported() {
    let probe = ServiceProbe::new(
        Box::new(ReplayRunner::from_text(SAMBA_OUTPUT)),
        Box::new(FakeLocator(false)),
        Platform::Linux,
        Duration::from_secs(5),
    );
    let report = probe.run(&run_params(remote(".*"))).await;

    assert_eq!(report.state, MonitorState::Unknown);
    assert_eq!(report.message, ProbeError::ToolNotInstalled.to_string());
}

#[tokio::test]
async fn test_conflicting_status_filters_stop_early() {
    let probe = replay_probe(Platform::Linux, SAMBA_OUTPUT);
    let raw = RawParameters {
        service_status_include: Some("Running".into()),
        service_status_exclude: Some("Stopped".into()),
        ..remote(".*")
    };
    let failure = probe
        .execute(&run_params(raw))
        .await
        .expect_err("include and exclude are exclusive");

    assert_eq!(failure.stage, Stage::ValidateIncludeExclude);
    assert!(matches!(failure.error, ProbeError::ServiceStatusConflict));
}

#[tokio::test]
async fn test_prepared_command_for_remote_linux() {
    let probe = replay_probe(Platform::Linux, "");
    let prepared = probe
        .prepare(&run_params(remote(".*")))
        .await
        .expect("remote parameters are complete");

    assert_eq!(
        prepared.argv,
        vec![
            "wmic",
            "-U",
            "CORP/monitor%s3cret",
            "//winbox01",
            "select Caption,Name,StartMode,State from Win32_Service",
            "--delimiter=,",
        ]
    );
}
