//! `fleet-output` — frame recording for the fleet_track engine.
//!
//! The engine knows nothing about files.  [`FrameRecorder`] implements
//! `fleet_engine::EngineObserver`, turns each sampled frame into
//! [`VehicleFrameRow`]s and each tick into a [`TickSummaryRow`], and hands
//! them to any [`FrameWriter`].
//!
//! | Backend       | Files created                                  |
//! |---------------|------------------------------------------------|
//! | [`CsvWriter`] | `vehicle_frames.csv`, `tick_summaries.csv`     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::{CsvWriter, FrameRecorder};
//!
//! let writer = CsvWriter::new(Path::new("./out"))?;
//! let mut rec = FrameRecorder::new(writer, 10);
//! for t in (0..60_000).step_by(33) {
//!     engine.tick_observed(Timestamp(t), &mut rec);
//! }
//! rec.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::FrameRecorder;
pub use row::{TickSummaryRow, VehicleFrameRow};
pub use writer::FrameWriter;
