// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Terminal UI & Logging
//!
//! 1.  **Global Logging**: Wires up `tracing` so that `info!`, `warn!`, etc.,
//!     print cleanly to stderr without breaking the progress line.
//! 2.  **The Spinner**: A background animation shown while `wmic` runs, with a
//!     status line refreshed from a caller supplied closure.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::{IndicatifLayer, span_ext::IndicatifSpanExt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::terminal::logging;

const TICKS: &[&str] = &[
    "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
];

fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,svcwatch=info",
        1 => "warn,svcwatch=debug",
        _ => "warn,svcwatch=trace",
    }
}

/// Wires up the global tracing subscriber.
///
/// `RUST_LOG` overrides the filter derived from `-v`.
pub fn init_logging(verbosity: u8) {
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS);
    let indicatif_layer = IndicatifLayer::new().with_progress_style(style);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .event_format(logging::SvcwatchFormatter {
            max_verbosity: verbosity,
        })
        .with_writer(indicatif_layer.get_stderr_writer());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(formatting_layer)
        .with(indicatif_layer)
        .init();
}

async fn run_spinner_loop<F>(span: Span, running: Arc<AtomicBool>, status_fn: F)
where
    F: Fn(Duration) -> ColoredString + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval(Duration::from_millis(100));
    let start_time = tokio::time::Instant::now();
    let mut last_text = String::new();

    while running.load(Ordering::Relaxed) {
        interval.tick().await;

        let current_text = status_fn(start_time.elapsed()).to_string();
        if current_text != last_text {
            span.pb_set_message(&current_text);
            last_text = current_text;
        }
    }
}

/// Keeps the spinner alive until dropped.
pub struct SpinnerGuard {
    running: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl SpinnerGuard {
    /// Starts a spinner whose message is rebuilt from the elapsed time.
    pub fn with_status<F>(span: Span, status_fn: F) -> Self
    where
        F: Fn(Duration) -> ColoredString + Send + Sync + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let run_clone = running.clone();

        let handle = tokio::spawn(async move {
            run_spinner_loop(span, run_clone, status_fn).await;
        });

        Self { running, handle }
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_widens_the_filter() {
        assert_eq!(default_filter(0), "warn,svcwatch=info");
        assert_eq!(default_filter(1), "warn,svcwatch=debug");
        assert_eq!(default_filter(5), "warn,svcwatch=trace");
    }
}
