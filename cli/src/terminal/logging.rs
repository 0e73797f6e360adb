// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Event formatter for the terminal.
//!
//! Log events get a colored status symbol and their message. Events sent to
//! the [`PRINT_TARGET`] target are written verbatim, which is how the report
//! itself reaches the terminal without interleaving with the spinner.

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

pub const PRINT_TARGET: &str = "svcwatch::print";

pub struct SvcwatchFormatter {
    pub max_verbosity: u8,
}

fn symbol(level: &Level, status: Option<&str>) -> ColoredString {
    match *level {
        Level::TRACE => "[ ]".dimmed(),
        Level::DEBUG => "[?]".blue(),
        Level::INFO => match status {
            Some("info") => "[»]".cyan().bold(),
            _ => "[+]".green().bold(),
        },
        Level::WARN => "[*]".yellow().bold(),
        Level::ERROR => "[-]".red().bold(),
    }
}

impl<S, N> FormatEvent<S, N> for SvcwatchFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut visitor = RawVisitor::new(writer.by_ref());
            event.record(&mut visitor);
            return write!(writer, "\r\n");
        }

        let mut meta_visitor = MetaVisitor::default();
        event.record(&mut meta_visitor);

        if meta_visitor.verbosity.unwrap_or(0) > self.max_verbosity {
            return Ok(());
        }

        write!(
            writer,
            "{} ",
            symbol(meta.level(), meta_visitor.status.as_deref())
        )?;

        let mut output_visitor = OutputVisitor::new(writer.by_ref());
        event.record(&mut output_visitor);
        output_visitor.finish();

        write!(writer, "\r\n")
    }
}

/// Collects the `status` and `verbosity` fields added by the logging macros.
#[derive(Default)]
struct MetaVisitor {
    status: Option<String>,
    verbosity: Option<u8>,
}

impl Visit for MetaVisitor {
    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}

    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "verbosity" {
            self.verbosity = Some(value.min(u8::MAX as u64) as u8);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "verbosity" {
            self.verbosity = Some(value.clamp(0, u8::MAX as i64) as u8);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "status" {
            self.status = Some(value.to_string());
        }
    }
}

/// Writes the message first and any extra fields after it.
struct OutputVisitor<'a> {
    writer: Writer<'a>,
    extras: String,
}

impl<'a> OutputVisitor<'a> {
    fn new(writer: Writer<'a>) -> Self {
        Self {
            writer,
            extras: String::new(),
        }
    }

    fn finish(mut self) {
        let _ = write!(self.writer, "{}", self.extras);
    }
}

impl<'a> Visit for OutputVisitor<'a> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "status" | "verbosity" => {}
            "message" => {
                let _ = write!(self.writer, "{:?}", value);
            }
            name => {
                let extra = format!(" {}={:?}", name.italic(), value);
                self.extras.push_str(&extra.dimmed().to_string());
            }
        }
    }
}

struct RawVisitor<'a> {
    writer: Writer<'a>,
}

impl<'a> RawVisitor<'a> {
    fn new(writer: Writer<'a>) -> Self {
        Self { writer }
    }
}

impl<'a> RawVisitor<'a> {
    fn emit(&mut self, text: &str) {
        let _ = write!(self.writer, "{}", text.replace('\n', "\r\n"));
    }
}

impl<'a> Visit for RawVisitor<'a> {
    // `raw_msg = %args` arrives here, wrapped so that `{:?}` renders Display.
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "raw_msg" {
            self.emit(&format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.emit(value);
        }
    }
}
