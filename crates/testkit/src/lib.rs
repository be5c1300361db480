#![warn(missing_docs)]
//! Deterministic testing surfaces (notification log, tracking noise, frame harness).

mod harness;
mod jitter;

use anyhow::{Context, Result};
use handray_core::FrameTick;
use handray_interaction::TickReport;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use harness::{frame, InteractionHarness};
pub use jitter::TrackingJitter;

/// Primary event record captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Frame when the event occurred.
    pub tick: FrameTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Free-form payload.
    pub payload: &'a str,
    /// Wall-clock time the record was written (RFC 3339).
    pub recorded_at: String,
}

impl<'a> EventRecord<'a> {
    /// Record stamped with the current time.
    pub fn new(tick: FrameTick, kind: &'a str, payload: &'a str) -> Self {
        Self {
            tick,
            kind,
            payload,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    out: BufWriter<File>,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Append one record per transition and selectable notification in `report`.
    pub fn write_report(&mut self, report: &TickReport) -> Result<()> {
        if let Some((from, to)) = report.transition {
            let payload = format!("{from}->{to}");
            self.write(&EventRecord::new(report.tick, "transition", &payload))?;
        }
        for (entity, event) in &report.events {
            let kind = serde_json::to_value(event)?;
            let kind = kind.as_str().unwrap_or("selectable");
            let payload = entity.to_string();
            self.write(&EventRecord::new(report.tick, kind, &payload))?;
        }
        Ok(())
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flushing event log")
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        if let Err(err) = self.out.flush() {
            tracing::warn!(%err, "event log flush failed");
        }
    }
}
