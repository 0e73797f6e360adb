// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # WMIC Output Parser
//!
//! `wmic` output is comma separated, but far from clean:
//!
//! * The Samba client prints connection noise before anything useful, and
//!   repeats a `CLASS: Win32_Service` banner (or `CLASS: Win32_TerminalService`)
//!   followed by the column header during the listing.
//! * Windows CSV output starts with a blank line and prefixes every row with
//!   the node name.
//! * Display names may contain commas themselves.
//!
//! The parser is fed one line at a time. Everything before the first column
//! header is dropped. After that, blank lines, repeated headers and class
//! banners are skipped and everything else must be a service row.

use svcwatch_common::error::ProbeError;
use svcwatch_common::models::platform::{Platform, SERVICE_COLUMNS};
use svcwatch_common::models::service::ServiceRecord;
use svcwatch_common::trace;

use crate::command::SERVICE_COLUMNS as HEADER;

/// Banner lines the Samba client repeats throughout its output.
const CLASS_BANNERS: [&str; 2] = ["CLASS: Win32_Service", "CLASS: Win32_TerminalService"];

const DELIMITER: char = ',';

#[derive(Debug, Clone)]
pub struct OutputParser {
    platform: Platform,
    header_found: bool,
}

impl OutputParser {
    pub fn new(platform: &Platform) -> Self {
        Self {
            platform: platform.clone(),
            header_found: false,
        }
    }

    /// Whether the column header has been seen. A run that never sees it did
    /// not get past authentication.
    pub fn header_found(&self) -> bool {
        self.header_found
    }

    /// Consumes one line of output.
    ///
    /// Returns `Ok(None)` for lines that carry no service, and an error for a
    /// row that cannot be tokenized. Errors are fatal for the whole run.
    pub fn feed(&mut self, line: &str) -> Result<Option<ServiceRecord>, ProbeError> {
        let line = line.trim_end_matches(['\r', '\n']);

        if !self.header_found {
            if line.contains(HEADER) {
                trace!("Found column header: {line}");
                self.header_found = true;
            }
            return Ok(None);
        }

        if is_noise(line) {
            return Ok(None);
        }

        tokenize(line, &self.platform).map(Some)
    }
}

fn is_noise(line: &str) -> bool {
    line.trim().is_empty()
        || line.contains(HEADER)
        || CLASS_BANNERS.iter().any(|banner| line.contains(banner))
}

/// Splits one data row into a [`ServiceRecord`].
///
/// Surplus tokens can only come from commas inside the display name, since
/// it is the only free-text column. They are glued back together, and the
/// last three tokens are taken as short name, startup type and status.
pub fn tokenize(line: &str, platform: &Platform) -> Result<ServiceRecord, ProbeError> {
    let tokens: Vec<&str> = line.split(DELIMITER).collect();
    let expected = platform.expected_columns();

    if tokens.len() < expected {
        return Err(ProbeError::IncorrectFormat {
            line: line.to_string(),
        });
    }

    let content = &tokens[platform.first_content_column()..];
    // Everything up to the last three columns belongs to the display name.
    let name_end = content.len() - (SERVICE_COLUMNS - 1);
    let display_name = content[..name_end].join(",");
    let short_name = content[name_end];
    let startup_type = content[name_end + 1];
    let status = content[name_end + 2];

    let fields = [display_name.as_str(), short_name, startup_type, status];
    if fields.iter().any(|field| field.is_empty()) {
        return Err(ProbeError::EmptyColumn {
            line: line.to_string(),
        });
    }

    Ok(ServiceRecord::new(display_name, short_name, startup_type, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EMBEDDED: &str = "Random, Display,  Awesome,RandomDisplayAwesome,Manual,Stopped";

    fn feed_all(parser: &mut OutputParser, lines: &[&str]) -> Vec<ServiceRecord> {
        lines
            .iter()
            .filter_map(|line| parser.feed(line).unwrap())
            .collect()
    }

    #[test]
    fn linux_row_with_embedded_commas() {
        let record = tokenize(EMBEDDED, &Platform::Linux).unwrap();
        assert_eq!(record.display_name, "Random, Display,  Awesome");
        assert_eq!(record.short_name, "RandomDisplayAwesome");
        assert_eq!(record.startup_type, "Manual");
        assert_eq!(record.status, "Stopped");
    }

    #[test]
    fn windows_row_with_embedded_commas() {
        let line = format!("WINBOX01,{EMBEDDED}");
        let record = tokenize(&line, &Platform::Windows).unwrap();
        assert_eq!(record.display_name, "Random, Display,  Awesome");
        assert_eq!(record.short_name, "RandomDisplayAwesome");
        assert_eq!(record.startup_type, "Manual");
        assert_eq!(record.status, "Stopped");
    }

    #[test]
    fn windows_drops_node_column() {
        let record = tokenize("WINBOX01,Print Spooler,Spooler,Auto,Running", &Platform::Windows).unwrap();
        assert_eq!(
            record,
            ServiceRecord::new("Print Spooler", "Spooler", "Auto", "Running")
        );
    }

    #[test]
    fn short_row_is_incorrect_format() {
        assert!(matches!(
            tokenize("Spooler,Auto,Running", &Platform::Linux),
            Err(ProbeError::IncorrectFormat { .. })
        ));
        // Four tokens are not enough once the node column is expected.
        assert!(matches!(
            tokenize("Print Spooler,Spooler,Auto,Running", &Platform::Windows),
            Err(ProbeError::IncorrectFormat { .. })
        ));
    }

    #[test]
    fn empty_column_is_rejected() {
        assert!(matches!(
            tokenize("Print Spooler,,Auto,Running", &Platform::Linux),
            Err(ProbeError::EmptyColumn { .. })
        ));
        assert!(matches!(
            tokenize("Print Spooler,Spooler,Auto,", &Platform::Linux),
            Err(ProbeError::EmptyColumn { .. })
        ));
    }

    #[test]
    fn lines_before_header_are_dropped() {
        let mut parser = OutputParser::new(&Platform::Linux);
        let records = feed_all(
            &mut parser,
            &[
                "[librpc/rpc/dcerpc_connect.c:790] failed NT status (c00000b5)",
                "Bogus,Row,Auto,Running",
                "CLASS: Win32_Service",
                "Caption|Name|StartMode|State",
            ],
        );
        assert!(records.is_empty());
        assert!(!parser.header_found());
    }

    #[test]
    fn linux_output_with_repeated_banners() {
        let mut parser = OutputParser::new(&Platform::Linux);
        let records = feed_all(
            &mut parser,
            &[
                "dcerpc_pipe_connect: ok",
                "CLASS: Win32_Service",
                "Caption,Name,StartMode,State",
                "DHCP Client,Dhcp,Auto,Running",
                "",
                "CLASS: Win32_TerminalService",
                "Caption,Name,StartMode,State",
                "Remote Desktop Services,TermService,Manual,Running",
            ],
        );
        assert!(parser.header_found());
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].short_name, "TermService");
    }

    #[test]
    fn windows_csv_output_with_carriage_returns() {
        let mut parser = OutputParser::new(&Platform::Windows);
        let records = feed_all(
            &mut parser,
            &[
                "\r",
                "Node,Caption,Name,StartMode,State\r",
                "WINBOX01,Windows Update,wuauserv,Manual,Stopped\r",
                "   \r",
            ],
        );
        assert_eq!(records, vec![ServiceRecord::new(
            "Windows Update",
            "wuauserv",
            "Manual",
            "Stopped"
        )]);
    }

    #[test]
    fn malformed_row_after_header_is_fatal() {
        let mut parser = OutputParser::new(&Platform::Linux);
        parser.feed("Caption,Name,StartMode,State").unwrap();
        assert!(matches!(
            parser.feed("garbage"),
            Err(ProbeError::IncorrectFormat { .. })
        ));
    }

    proptest! {
        #[test]
        fn display_names_with_commas_survive(
            name in "[A-Za-z ]{1,8}(,[A-Za-z ]{1,8}){0,4}",
            short in "[A-Za-z]{1,10}",
        ) {
            let linux = format!("{name},{short},Manual,Stopped");
            let windows = format!("NODE,{linux}");

            for (line, platform) in [(linux, Platform::Linux), (windows, Platform::Windows)] {
                let record = tokenize(&line, &platform).unwrap();
                prop_assert_eq!(&record.display_name, &name);
                prop_assert_eq!(&record.short_name, &short);
                prop_assert_eq!(record.startup_type.as_str(), "Manual");
                prop_assert_eq!(record.status.as_str(), "Stopped");
            }
        }
    }
}
