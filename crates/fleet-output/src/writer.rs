//! The `FrameWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickSummaryRow, VehicleFrameRow};

/// A sink for recorded frames.
///
/// Errors surface through [`FrameRecorder::take_error`][crate::FrameRecorder::take_error]
/// when the writer is driven by the recorder.
pub trait FrameWriter {
    /// Write all vehicle rows of one frame.
    fn write_frame(&mut self, rows: &[VehicleFrameRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
