//! Trace capture for simulation and bench runs.
//!
//! The recorder is the harness-facing collaborator: it never influences
//! the controller, it only snapshots what each tick produced. Rows carry
//! both the controller timeline position and a wall-clock capture stamp.

use crate::core::lights::LightPattern;
use crate::core::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One waveform row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceRow {
    /// Tick sequence number, counted across skipped rows too.
    pub seq: u64,
    /// Controller timeline position, in milliseconds.
    pub at_ms: u64,
    pub phase: Phase,
    pub lights: LightPattern,
    /// When the row was captured.
    pub recorded_at: DateTime<Utc>,
}

/// Accumulates waveform rows from a tick loop.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    rows: Vec<TraceRow>,
    changes_only: bool,
    ticks: u64,
}

impl TraceRecorder {
    /// Record a row for every tick.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a row only when the phase differs from the previous row.
    pub fn changes_only() -> Self {
        Self {
            changes_only: true,
            ..Self::default()
        }
    }

    /// Snapshot one tick's outcome.
    pub fn record(&mut self, at: Duration, phase: Phase, lights: LightPattern) {
        let seq = self.ticks;
        self.ticks += 1;

        if self.changes_only {
            if let Some(last) = self.rows.last() {
                if last.phase == phase {
                    return;
                }
            }
        }

        self.rows.push(TraceRow {
            seq,
            at_ms: at.as_millis() as u64,
            phase,
            lights,
            recorded_at: Utc::now(),
        });
    }

    /// Rows captured so far.
    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    /// Ticks observed, including ones skipped by `changes_only`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Serialize the capture as JSON lines, one row per line.
    pub fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&serde_json::to_string(row)?);
            out.push('\n');
        }
        Ok(out)
    }
}
