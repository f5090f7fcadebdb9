//! `FrameRecorder<W>` — bridges `EngineObserver` to a `FrameWriter`.

use fleet_core::Timestamp;
use fleet_engine::{EngineObserver, TickSummary};
use fleet_motion::{PathHistory, VehicleRegistry};
use tracing::warn;

use crate::row::{TickSummaryRow, VehicleFrameRow};
use crate::writer::FrameWriter;
use crate::{OutputError, OutputResult};

/// An [`EngineObserver`] that records vehicle frames and tick summaries to
/// any [`FrameWriter`].
///
/// Vehicle rows are written every `interval` ticks (the first tick is always
/// recorded); a summary row is written for every tick.
///
/// Errors from the writer are stored because observer hooks have no return
/// value.  Check with [`take_error`][Self::take_error], or call
/// [`finish`][Self::finish] which reports it.
pub struct FrameRecorder<W: FrameWriter> {
    writer:     W,
    interval:   u64,
    frame:      u64,
    last_error: Option<OutputError>,
}

impl<W: FrameWriter> FrameRecorder<W> {
    /// `interval` of 0 is treated as 1.
    pub fn new(writer: W, interval: u64) -> Self {
        Self {
            writer,
            interval:   interval.max(1),
            frame:      0,
            last_error: None,
        }
    }

    /// Ticks observed so far.
    #[inline]
    pub fn frames_seen(&self) -> u64 {
        self.frame
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Returns the first stored error if there is one.
    pub fn finish(&mut self) -> OutputResult<()> {
        let result = self.writer.finish();
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        result
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "frame recording failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: FrameWriter> EngineObserver for FrameRecorder<W> {
    fn on_frame(&mut self, now: Timestamp, registry: &VehicleRegistry, history: &PathHistory) {
        if self.frame % self.interval != 0 {
            return;
        }
        let rows: Vec<VehicleFrameRow> = registry
            .iter()
            .map(|(id, v)| VehicleFrameRow::from_vehicle(self.frame, now, id, v, history))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_frame(&rows);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow::from_summary(self.frame, summary);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
        self.frame += 1;
    }
}
