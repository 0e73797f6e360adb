// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # External Process Capabilities
//!
//! The probe talks to the outside world through two small traits:
//!
//! * [`QueryRunner`] starts the query and hands back a [`QueryProcess`], a
//!   lazy stream of stdout lines plus the exit status.
//! * [`ToolLocator`] answers whether a tool is installed on the station.
//!
//! [`WmicRunner`] and [`ShellToolLocator`] are the real implementations.
//! [`ReplayRunner`] serves previously captured output instead of spawning
//! anything, which is how `--replay` works and how the probe is tested.
//! [`ReplayLocator`] goes with it and reports every tool as present.

use std::collections::VecDeque;
use std::path::Path;
use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use svcwatch_common::debug;
use svcwatch_common::error::ProbeError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};

/// Starts the external query tool.
pub trait QueryRunner: Send + Sync {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn QueryProcess>, ProbeError>;
}

/// A running query. Dropping it releases the underlying process.
#[async_trait]
pub trait QueryProcess: Send {
    /// Next line of standard output without its line terminator, or `None`
    /// at end of stream.
    async fn next_line(&mut self) -> Result<Option<String>, ProbeError>;

    /// Waits for the process to exit. `None` if it was ended by a signal.
    async fn wait(&mut self) -> Result<Option<i32>, ProbeError>;
}

/// Checks whether a command line tool is available on this machine.
#[async_trait]
pub trait ToolLocator: Send + Sync {
    async fn is_installed(&self, tool: &str) -> bool;
}

/// Runs the real `wmic` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct WmicRunner;

impl QueryRunner for WmicRunner {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn QueryProcess>, ProbeError> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            ProbeError::Spawn(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty command line",
            ))
        })?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(ProbeError::Spawn)?;

        let stdout = child.stdout.take().ok_or_else(|| {
            ProbeError::Spawn(std::io::Error::other("stdout of wmic was not captured"))
        })?;

        debug!(verbosity = 1, "Spawned {program} with pid {:?}", child.id());
        Ok(Box::new(ChildProcess {
            child,
            stdout: BufReader::new(stdout),
            buf: Vec::new(),
        }))
    }
}

struct ChildProcess {
    child: Child,
    stdout: BufReader<ChildStdout>,
    buf: Vec<u8>,
}

#[async_trait]
impl QueryProcess for ChildProcess {
    async fn next_line(&mut self) -> Result<Option<String>, ProbeError> {
        self.buf.clear();
        let read = self
            .stdout
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(ProbeError::Io)?;

        if read == 0 {
            return Ok(None);
        }

        // wmic does not promise UTF-8 (Windows consoles use the OEM code page).
        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn wait(&mut self) -> Result<Option<i32>, ProbeError> {
        let status = self.child.wait().await.map_err(ProbeError::Io)?;
        Ok(status.code())
    }
}

/// Asks `/bin/sh` whether the tool is on the `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellToolLocator;

#[async_trait]
impl ToolLocator for ShellToolLocator {
    async fn is_installed(&self, tool: &str) -> bool {
        let status = Command::new("/bin/sh")
            .arg("-c")
            .arg(format!("which {tool} 2>/dev/null 1>&2"))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(s) => s.success(),
            Err(e) => {
                debug!("Unable to look up {tool}: {e}");
                false
            }
        }
    }
}

/// Locator for replayed runs. Nothing is spawned, so the station does not
/// need the client.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplayLocator;

#[async_trait]
impl ToolLocator for ReplayLocator {
    async fn is_installed(&self, _tool: &str) -> bool {
        true
    }
}

/// Replays captured `wmic` output instead of running a process.
#[derive(Debug, Default, Clone)]
pub struct ReplayRunner {
    lines: Vec<String>,
}

impl ReplayRunner {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("unable to read captured output '{}'", path.display()))?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }
}

impl QueryRunner for ReplayRunner {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn QueryProcess>, ProbeError> {
        debug!(
            verbosity = 1,
            "Replaying {} captured line(s) instead of running {}",
            self.lines.len(),
            argv.first().map(String::as_str).unwrap_or_default()
        );
        Ok(Box::new(ReplayProcess {
            lines: self.lines.iter().cloned().collect(),
        }))
    }
}

struct ReplayProcess {
    lines: VecDeque<String>,
}

#[async_trait]
impl QueryProcess for ReplayProcess {
    async fn next_line(&mut self) -> Result<Option<String>, ProbeError> {
        Ok(self.lines.pop_front())
    }

    async fn wait(&mut self) -> Result<Option<i32>, ProbeError> {
        Ok(Some(0))
    }
}
