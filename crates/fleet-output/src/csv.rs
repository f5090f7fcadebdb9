//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_frames.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::FrameWriter;
use crate::{OutputResult, TickSummaryRow, VehicleFrameRow};

pub const FRAMES_FILE: &str = "vehicle_frames.csv";
pub const SUMMARIES_FILE: &str = "tick_summaries.csv";

/// Writes recorded frames to two CSV files.
pub struct CsvWriter {
    frames:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the directory if needed, open both files and write the headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut frames = Writer::from_path(dir.join(FRAMES_FILE))?;
        frames.write_record([
            "frame", "time_ms", "vehicle_id", "kind", "status", "lat", "lon", "animating", "trail_len",
        ])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARIES_FILE))?;
        summaries.write_record([
            "frame", "time_ms", "animating", "arrivals", "originated", "skipped", "clock_regressed",
        ])?;

        Ok(Self {
            frames,
            summaries,
            finished: false,
        })
    }
}

impl FrameWriter for CsvWriter {
    fn write_frame(&mut self, rows: &[VehicleFrameRow]) -> OutputResult<()> {
        for row in rows {
            self.frames.write_record(&[
                row.frame.to_string(),
                row.time_ms.to_string(),
                row.vehicle_id.to_string(),
                row.kind.to_string(),
                row.status.to_string(),
                format!("{:.7}", row.position.lat),
                format!("{:.7}", row.position.lon),
                (row.animating as u8).to_string(),
                row.trail_len.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.frame.to_string(),
            row.time_ms.to_string(),
            row.animating.to_string(),
            row.arrivals.to_string(),
            row.originated.to_string(),
            row.skipped.to_string(),
            (row.clock_regressed as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.frames.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
