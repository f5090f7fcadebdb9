//! `FrameInterpolator` — advances every in-flight movement once per tick.

use fleet_core::{GeoPoint, Timestamp, VehicleId};
use tracing::debug;

use crate::{AnimatedVehicle, PathHistory, VehicleRegistry};

/// Cubic ease-out: fast start, decelerating finish.  `t` is clamped to
/// `[0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// A vehicle that completed its movement this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrival {
    pub id:       VehicleId,
    pub position: GeoPoint,
}

/// Outcome of one [`FrameInterpolator::advance`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdvanceReport {
    /// Vehicles still moving after this tick.
    pub animating: usize,
    /// Vehicles that reached their target this tick, ascending id order.
    pub arrivals: Vec<Arrival>,
    /// `now` was earlier than the previous tick's `now`.
    pub clock_regressed: bool,
}

/// Per-vehicle result of one interpolation step.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Step {
    Idle,
    Moving,
    Arrived(GeoPoint),
}

/// Interpolates in-flight movements.
///
/// # Two phases
///
/// 1. **Step** (parallel with the `parallel` feature): each vehicle's
///    `current` is recomputed from its own movement only.
/// 2. **Apply** (sequential, ascending id): arrivals are appended to the
///    trails.  This keeps results identical with and without `parallel`.
#[derive(Clone, Debug, Default)]
pub struct FrameInterpolator {
    last_now: Option<Timestamp>,
}

impl FrameInterpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `now` of the most recent `advance` call.
    #[inline]
    pub fn last_now(&self) -> Option<Timestamp> {
        self.last_now
    }

    pub fn advance(
        &mut self,
        now:      Timestamp,
        registry: &mut VehicleRegistry,
        history:  &mut PathHistory,
    ) -> AdvanceReport {
        let clock_regressed = self.last_now.is_some_and(|prev| now < prev);
        if clock_regressed {
            debug!(%now, "clock moved backwards; elapsed time clamped");
        }
        self.last_now = Some(now);

        let steps = step_all(registry, now);

        let mut report = AdvanceReport {
            clock_regressed,
            ..Default::default()
        };
        for (id, step) in steps {
            match step {
                Step::Idle => {}
                Step::Moving => report.animating += 1,
                Step::Arrived(position) => {
                    history.append(&id, position);
                    report.arrivals.push(Arrival { id, position });
                }
            }
        }
        report
    }
}

#[cfg(not(feature = "parallel"))]
fn step_all(registry: &mut VehicleRegistry, now: Timestamp) -> Vec<(VehicleId, Step)> {
    registry
        .vehicles_mut()
        .iter_mut()
        .filter(|(_, v)| v.is_animating())
        .map(|(id, v)| (id.clone(), step_vehicle(v, now)))
        .collect()
}

#[cfg(feature = "parallel")]
fn step_all(registry: &mut VehicleRegistry, now: Timestamp) -> Vec<(VehicleId, Step)> {
    use rayon::prelude::*;

    let mut steps: Vec<(VehicleId, Step)> = registry
        .vehicles_mut()
        .par_iter_mut()
        .filter(|(_, v)| v.is_animating())
        .map(|(id, v)| (id.clone(), step_vehicle(v, now)))
        .collect();
    steps.sort_by(|a, b| a.0.cmp(&b.0));
    steps
}

/// Advance one vehicle's movement to `now`.
fn step_vehicle(vehicle: &mut AnimatedVehicle, now: Timestamp) -> Step {
    let Some(movement) = vehicle.in_flight else {
        return Step::Idle;
    };

    let progress = movement.progress(now);
    if progress < 1.0 {
        vehicle.current = vehicle.anchor.lerp(movement.target, ease_out_cubic(progress));
        Step::Moving
    } else {
        vehicle.settle(movement.target);
        Step::Arrived(movement.target)
    }
}
