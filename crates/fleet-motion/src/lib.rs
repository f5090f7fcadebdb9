//! `fleet-motion` — synthetic vehicle motion over sparse position reports.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`state`]       | `AnimatedVehicle`, `Movement` — per-vehicle animation state   |
//! | [`history`]     | `PathHistory` — bounded per-vehicle trails                    |
//! | [`registry`]    | `VehicleRegistry` — id → state map, feed reconciliation       |
//! | [`profile`]     | `MovementProfile`, `MovementShape` — per-kind kinematics      |
//! | [`scheduler`]   | `MovementScheduler` — periodic movement origination           |
//! | [`interpolate`] | `FrameInterpolator` — per-tick easing and arrival             |
//! | [`error`]       | `MotionError`, `MotionResult<T>`                              |
//!
//! # Movement model
//!
//! 1. `VehicleRegistry::reconcile` merges a full feed snapshot.  Idle
//!    vehicles jump to their reported position; moving vehicles keep
//!    moving and only their trail records the report.
//! 2. Every origination period, `MovementScheduler` picks a random subset of
//!    idle, available vehicles and commits a short step (horizontal,
//!    vertical or diagonal) sized by the vehicle kind's profile.
//! 3. Every tick, `FrameInterpolator` places each moving vehicle at
//!    `lerp(anchor, target, ease_out_cubic(progress))` and, once
//!    `progress` reaches 1, snaps it to the target and appends the target
//!    to its trail.

pub mod error;
pub mod history;
pub mod interpolate;
pub mod profile;
pub mod registry;
pub mod scheduler;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{MotionError, MotionResult};
pub use history::PathHistory;
pub use interpolate::{AdvanceReport, Arrival, FrameInterpolator, ease_out_cubic};
pub use profile::{MovementProfile, MovementShape, profile_for};
pub use registry::{ReconcileReport, VehicleRegistry};
pub use scheduler::{MovementScheduler, Origination, OriginationReport};
pub use state::{AnimatedVehicle, Movement};
