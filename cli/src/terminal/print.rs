// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::{fmt::Display, sync::OnceLock};

use crate::terminal::{colors, format};
use anyhow::bail;
use colored::*;
use svcwatch_common::config::Config;
use svcwatch_common::models::platform::Platform;
use svcwatch_common::models::report::ProbeReport;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

static PRINT: OnceLock<Print> = OnceLock::new();

#[macro_export]
macro_rules! tprint {
    () => {
        $crate::tprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "svcwatch::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

/// Terminal presentation settings, fixed once at startup.
#[derive(Debug, Default)]
pub struct Print {
    no_banner: bool,
    q_level: u8,
    json: bool,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
            json: cfg.json,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        if PRINT.set(Self::new(cfg)).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        static FALLBACK: OnceLock<Print> = OnceLock::new();
        PRINT
            .get()
            .unwrap_or_else(|| FALLBACK.get_or_init(Print::default))
    }

    /// True when only machine readable output should reach the terminal.
    pub fn is_plain() -> bool {
        let p = Self::get();
        p.json || p.q_level > 1
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 || p.json {
            return;
        }

        let text_content: String = format!("⟦ SVCWATCH v{} ⟧ ", env!("CARGO_PKG_VERSION"));
        let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();

        tprint!("{}{}{}", sep, text, sep);
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 0 || p.json {
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let dash_count: usize = TOTAL_WIDTH.saturating_sub(formatted.width());
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        tprint!("{}", line);
    }

    /// Renders a finished probe run in the mode selected on the command line.
    ///
    /// JSON and `-qq` output go to stdout so they can be piped; everything
    /// else goes through the log writer on stderr.
    pub fn report(report: &ProbeReport, host: &str, platform: &Platform) -> anyhow::Result<()> {
        let p = Self::get();

        if p.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        if p.q_level > 1 {
            if !report.matched_services.is_empty() {
                println!("{}", report.matched_services);
            }
            return Ok(());
        }

        Self::header("service check");
        aligned_line("Host", host.color(colors::PRIMARY));
        aligned_line("Platform", platform.to_string());
        aligned_line("State", format::monitor_state(report.state));
        aligned_line("Message", report.message.as_str());

        if !report.services.is_empty() {
            tprint!();
        }
        for (idx, (name, state)) in report.services.iter().enumerate() {
            tree_head(idx, name);
            as_tree(format::service_to_detail(state));
        }

        Self::summary(report);
        Ok(())
    }

    fn summary(report: &ProbeReport) {
        let p = Self::get();
        if !report.is_ok() {
            return;
        }

        let count: ColoredString = report.number_of_matches.to_string().bold().green();
        let label = if report.number_of_matches == 1 {
            "service"
        } else {
            "services"
        };
        let output = format!("Check complete: {count} {label} matched").color(colors::TEXT_DEFAULT);

        match p.q_level {
            0 => {
                divider();
                centerln(&output.to_string());
            }
            _ => {
                tprint!();
                svcwatch_common::success!("{output}");
            }
        }
    }

    pub fn end_of_program() {
        let p = Self::get();
        if p.q_level > 0 || p.json {
            return;
        }
        tprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
    }
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    tprint!("{}", sep);
}

const KEY_WIDTH: usize = 8;

pub fn aligned_line<V>(key: &str, value: V)
where
    V: Display + WithDefaultColor,
{
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    let colon: String = format!(
        "{}{}",
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    let value: ColoredString = value.with_default(colors::TEXT_DEFAULT);
    tprint!(
        "{} {}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        colon,
        value
    );
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    tprint!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::SECONDARY)
    );
}

pub fn as_tree(details: Vec<format::Detail>) {
    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = KEY_WIDTH.saturating_sub(key.len());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        tprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    tprint!("{}{}{}", space, msg, space);
}
