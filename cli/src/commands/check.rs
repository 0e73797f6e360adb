// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The `check` subcommand: one full probe run against a host.

use std::path::Path;
use std::process::ExitCode;

use anyhow::bail;
use colored::*;
use svcwatch_common::config::Config;
use svcwatch_common::info;
use svcwatch_common::models::params::RunParameters;
use svcwatch_common::models::platform::Platform;
use svcwatch_common::models::report::ProbeReport;
use svcwatch_core::probe::ServiceProbe;
use svcwatch_core::runner::{ReplayLocator, ReplayRunner};
use tracing::info_span;

use crate::commands::{ParamArgs, StationPlatform};
use crate::terminal::print::Print;
use crate::terminal::{colors, spinner::SpinnerGuard};

/// Exit status the monitoring framework reads as `UNKNOWN`.
pub const EXIT_UNKNOWN: u8 = 3;

pub async fn check(
    params: &ParamArgs,
    replay: Option<&Path>,
    platform: Option<StationPlatform>,
    cfg: &Config,
) -> anyhow::Result<ExitCode> {
    let run = params.resolve()?;
    let probe = build_probe(replay, platform, cfg)?;

    let report: ProbeReport = {
        let _guard = show_spinner(&run, cfg);
        probe.run(&run).await
    };

    Print::report(&report, run.host_name(), probe.platform())?;
    Ok(exit_code(&report))
}

fn build_probe(
    replay: Option<&Path>,
    platform: Option<StationPlatform>,
    cfg: &Config,
) -> anyhow::Result<ServiceProbe> {
    let Some(path) = replay else {
        return Ok(ServiceProbe::system(cfg.timeout));
    };

    let platform = match platform.map(Platform::from) {
        Some(platform) => platform,
        None => match Platform::detect() {
            Platform::Unsupported(os) => {
                bail!("cannot tell how to parse a capture on {os}, pass --platform windows|linux")
            }
            detected => detected,
        },
    };

    info!("Replaying captured {platform} output from {}", path.display());
    Ok(ServiceProbe::new(
        Box::new(ReplayRunner::from_file(path)?),
        Box::new(ReplayLocator),
        platform,
        cfg.timeout,
    ))
}

fn show_spinner(run: &RunParameters, cfg: &Config) -> Option<SpinnerGuard> {
    if cfg.quiet > 0 || Print::is_plain() {
        return None;
    }

    let span = info_span!("check", indicatif.pb_show = true);
    let _enter = span.enter();

    let host = run.host_name().to_string();
    Some(SpinnerGuard::with_status(span.clone(), move |elapsed| {
        let secs = format!("{}s", elapsed.as_secs()).yellow().bold();
        format!("Querying services on {}... {}", host, secs)
            .color(colors::TEXT_DEFAULT)
            .italic()
    }))
}

pub fn exit_code(report: &ProbeReport) -> ExitCode {
    if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use svcwatch_common::models::params::RawParameters;
    use svcwatch_common::models::report::MonitorState;

    const WINDOWS_CAPTURE: &str = "\r
Node,Caption,Name,StartMode,State\r
WINBOX01,Print Spooler,Spooler,Auto,Running\r
";
    const SAMBA_CAPTURE: &str = "\
CLASS: Win32_Service
Caption,Name,StartMode,State
Print Spooler,Spooler,Auto,Running
";

    fn capture(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("svcwatch-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn remote() -> RunParameters {
        RunParameters::new(RawParameters {
            hostname: Some("winbox01".into()),
            domain_name: Some("CORP".into()),
            user_name: Some("monitor".into()),
            password: Some("s3cret".into()),
            service_display_name: Some("Print.*".into()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn replay_parses_windows_capture_on_any_station() {
        let path = capture("windows.csv", WINDOWS_CAPTURE);
        let probe =
            build_probe(Some(&path), Some(StationPlatform::Windows), &Config::default()).unwrap();
        let report = probe.run(&remote()).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(probe.platform(), &Platform::Windows);
        assert_eq!(report.state, MonitorState::Ok, "{}", report.message);
        assert_eq!(report.number_of_matches, 1);
    }

    #[tokio::test]
    async fn replay_does_not_need_wmic_installed() {
        let path = capture("samba.txt", SAMBA_CAPTURE);
        let probe =
            build_probe(Some(&path), Some(StationPlatform::Linux), &Config::default()).unwrap();
        let report = probe.run(&remote()).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(report.state, MonitorState::Ok, "{}", report.message);
        assert_eq!(
            report.matched_services,
            "Print Spooler / Startup Type : Auto / Status : Running"
        );
    }

    #[test]
    fn missing_capture_is_an_error() {
        let path = std::env::temp_dir().join("svcwatch-no-such-capture.csv");
        assert!(build_probe(Some(&path), Some(StationPlatform::Linux), &Config::default()).is_err());
    }
}
