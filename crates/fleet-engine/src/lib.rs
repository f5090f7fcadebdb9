//! `fleet-engine` — composition root of the fleet_track motion engine.
//!
//! # The three calls
//!
//! ```text
//! ingest(reports)  — merge a full fleet snapshot from the feed
//! tick(now)        — ① interpolate every in-flight movement to `now`
//!                    ② if the origination period has elapsed, start new
//!                       movements for a random subset of idle, available
//!                       vehicles
//! snapshot()       — value copy of every vehicle's position, animating
//!                    flag and trail
//! ```
//!
//! The engine never reads a clock or spawns a timer: the driver decides the
//! cadence.  All mutation goes through `&mut self`, so a single driver
//! thread needs no locking; drivers that ingest from another thread wrap the
//! engine in [`SharedEngine`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `serde`    | `Serialize` on snapshots and all core types.           |
//! | `parallel` | Runs the interpolation step on Rayon's thread pool.    |
//! | `fx-hash`  | FxHash for the per-vehicle trail map.                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_core::{EngineConfig, Timestamp, VehicleReport};
//! use fleet_engine::EngineBuilder;
//!
//! let mut engine = EngineBuilder::new(EngineConfig { seed: 7, ..Default::default() })
//!     .build()?;
//! engine.ingest(&reports);
//! engine.tick(Timestamp(0));
//! for v in engine.snapshot().iter() {
//!     println!("{} {} animating={}", v.id, v.position, v.animating);
//! }
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod shared;
pub mod snapshot;


pub use builder::EngineBuilder;
pub use engine::{Engine, EngineStats, TickSummary};
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver};
pub use shared::SharedEngine;
pub use snapshot::{FleetSnapshot, NearbyVehicle, VehicleView};
