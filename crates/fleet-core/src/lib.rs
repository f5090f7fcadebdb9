//! `fleet-core` — foundational types for the `fleet_track` vehicle motion
//! engine.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It
//! intentionally has no `fleet-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`                                           |
//! | [`geo`]         | `GeoPoint`, haversine distance, distance labels       |
//! | [`time`]        | `Timestamp`, `FrameClock`                             |
//! | [`rng`]         | `SimRng` (seeded, injectable)                         |
//! | [`vehicle`]     | `VehicleKind`, `VehicleStatus`, `VehicleReport`       |
//! | [`config`]      | `EngineConfig`, `ShapeWeights`                        |
//! | [`error`]       | `FleetError`, `FleetResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EngineConfig, ShapeWeights};
pub use error::{FleetError, FleetResult};
pub use geo::{GeoPoint, format_distance};
pub use ids::VehicleId;
pub use rng::SimRng;
pub use time::{FrameClock, Timestamp};
pub use vehicle::{VehicleKind, VehicleReport, VehicleStatus};
