// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod scenarios;

pub mod utils {
    use std::time::Duration;

    use async_trait::async_trait;

    use svcwatch_common::models::params::{RawParameters, RunParameters};
    use svcwatch_common::models::platform::Platform;
    use svcwatch_core::probe::ServiceProbe;
    use svcwatch_core::runner::{ReplayRunner, ToolLocator};

    /// Pretends `wmic` is (or is not) installed on the station.
    pub struct FakeLocator(pub bool);

    #[async_trait]
    impl ToolLocator for FakeLocator {
        async fn is_installed(&self, _tool: &str) -> bool {
            self.0
        }
    }

    /// A probe replaying `output` as if `wmic` had printed it.
    pub fn replay_probe(platform: Platform, output: &str) -> ServiceProbe {
        ServiceProbe::new(
            Box::new(ReplayRunner::from_text(output)),
            Box::new(FakeLocator(true)),
            platform,
            Duration::from_secs(5),
        )
    }

    pub fn remote(service: &str) -> RawParameters {
        RawParameters {
            hostname: Some("winbox01".into()),
            domain_name: Some("CORP".into()),
            user_name: Some("monitor".into()),
            password: Some("s3cret".into()),
            service_display_name: Some(service.into()),
            ..Default::default()
        }
    }

    pub fn local(service: &str) -> RawParameters {
        RawParameters {
            hostname: Some("localhost".into()),
            service_display_name: Some(service.into()),
            ..Default::default()
        }
    }

    pub fn run_params(raw: RawParameters) -> RunParameters {
        RunParameters::new(raw)
    }
}
