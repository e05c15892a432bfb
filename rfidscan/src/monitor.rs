//! Monitoring loop
//!
//! One session: connect, read frames until the time limit or a stop request,
//! print each accepted frame, disconnect. The stop request and the time limit
//! are checked between reads; a pending read always runs to its timeout.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use rfidscan_core::constants::TIMED_SESSION_SECS;
use rfidscan_transport::Transport;

use crate::error::Result;
use crate::reader::Reader;
use crate::report;

/// How much to print per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorMode {
    /// Format, raw, hex and decimal views, timestamp, validation
    Detailed,

    /// Format and raw data only
    Simple,
}

impl fmt::Display for MonitorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detailed => f.write_str("detailed"),
            Self::Simple => f.write_str("simple"),
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorOptions {
    pub mode: MonitorMode,

    /// Stop after this long; `None` runs until interrupted
    pub duration: Option<Duration>,
}

impl MonitorOptions {
    /// Run until interrupted
    pub fn continuous(mode: MonitorMode) -> Self {
        Self { mode, duration: None }
    }

    /// Run for the standard timed session length
    pub fn timed(mode: MonitorMode) -> Self {
        Self::for_duration(mode, Duration::from_secs(TIMED_SESSION_SECS))
    }

    pub fn for_duration(mode: MonitorMode, duration: Duration) -> Self {
        Self {
            mode,
            duration: Some(duration),
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DurationElapsed,
    Interrupted,
}

/// Outcome of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSummary {
    /// Frames accepted during this session
    pub reads: u64,
    pub elapsed: Duration,
    pub stopped_by: StopReason,
}

/// Card monitor
///
/// Owns the reader and the read counter. The counter lives as long as the
/// monitor, so numbering continues across sessions.
pub struct Monitor<T: Transport> {
    reader: Reader<T>,
    read_count: u64,
}

impl<T: Transport> Monitor<T> {
    pub fn new(reader: Reader<T>) -> Self {
        Self {
            reader,
            read_count: 0,
        }
    }

    /// Total frames accepted since the monitor was created
    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    pub fn reader(&self) -> &Reader<T> {
        &self.reader
    }

    /// Run one monitoring session
    ///
    /// The port is opened at the start and always closed at the end.
    ///
    /// # Errors
    ///
    /// Fails if the port cannot be opened, on a fatal read error, or if the
    /// report cannot be written.
    pub async fn run<W: Write>(
        &mut self,
        options: MonitorOptions,
        out: &mut W,
        stop: &watch::Receiver<bool>,
    ) -> Result<MonitorSummary> {
        self.reader.connect().await?;

        let result = self.session(options, out, stop).await;

        if let Err(e) = self.reader.disconnect().await {
            warn!("Failed to close port cleanly: {}", e);
        }

        let summary = result?;
        report::session_summary(out, &summary)?;
        out.flush()?;

        info!(
            reads = summary.reads,
            elapsed_secs = summary.elapsed.as_secs(),
            stopped_by = ?summary.stopped_by,
            "Monitoring session ended"
        );

        Ok(summary)
    }

    async fn session<W: Write>(
        &mut self,
        options: MonitorOptions,
        out: &mut W,
        stop: &watch::Receiver<bool>,
    ) -> Result<MonitorSummary> {
        report::session_banner(out, options.mode, options.duration)?;
        out.flush()?;

        let started = Instant::now();
        let first_read = self.read_count;

        let stopped_by = loop {
            if *stop.borrow() {
                break StopReason::Interrupted;
            }
            if options.duration.is_some_and(|limit| started.elapsed() >= limit) {
                break StopReason::DurationElapsed;
            }

            if let Some(frame) = self.reader.next_frame(self.read_count + 1).await? {
                self.read_count += 1;

                debug!("Card read: {}", frame);

                report::frame(out, &frame, options.mode)?;
                out.flush()?;
            }
        };

        Ok(MonitorSummary {
            reads: self.read_count - first_read,
            elapsed: started.elapsed(),
            stopped_by,
        })
    }
}
