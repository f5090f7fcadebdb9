//! Per-kind kinematic profiles and movement shapes.
//!
//! Step sizes are in degrees: 0.0025° is roughly 280 m of latitude.  Faster
//! vehicle types take bigger steps in less time.

use fleet_core::{ShapeWeights, VehicleKind};
use rand::Rng;

/// Each diagonal axis moves this fraction of the step distance.
pub const DIAGONAL_FACTOR: f64 = 0.7;

/// Kinematic parameters of one vehicle kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementProfile {
    /// Cardinal step length in degrees.
    pub step_distance: f64,
    /// Time to cover one full `step_distance`, in ms.
    pub base_duration_ms: f64,
}

impl MovementProfile {
    /// Profile used for `VehicleKind::Other` and anything without a
    /// dedicated entry.
    pub const DEFAULT: MovementProfile = MovementProfile {
        step_distance:    0.0015,
        base_duration_ms: 3_000.0,
    };

    /// `base × (distance / step) + jitter`.
    #[inline]
    pub fn duration_ms(&self, distance: f64, jitter_ms: f64) -> f64 {
        self.base_duration_ms * (distance / self.step_distance) + jitter_ms
    }
}

/// The kinematic profile for `kind`.  Pure and total.
pub fn profile_for(kind: VehicleKind) -> MovementProfile {
    match kind {
        VehicleKind::Ambulance => MovementProfile {
            step_distance:    0.0025,
            base_duration_ms: 2_000.0,
        },
        VehicleKind::Police => MovementProfile {
            step_distance:    0.0020,
            base_duration_ms: 2_500.0,
        },
        VehicleKind::Fire => MovementProfile {
            step_distance:    0.0015,
            base_duration_ms: 3_000.0,
        },
        VehicleKind::Other => MovementProfile::DEFAULT,
    }
}

/// The geometric shape of one synthetic step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MovementShape {
    /// East-west: longitude ± step.
    Horizontal,
    /// North-south: latitude ± step.
    Vertical,
    /// Both axes ± `DIAGONAL_FACTOR` × step.
    Diagonal,
}

impl MovementShape {
    /// Draw a shape according to `weights`.
    pub fn pick<R: Rng + ?Sized>(weights: &ShapeWeights, rng: &mut R) -> Self {
        let total = weights.total();
        if total == 0 {
            return MovementShape::Horizontal;
        }
        let roll = rng.gen_range(0..total);
        let horizontal = weights.horizontal as u64;
        if roll < horizontal {
            MovementShape::Horizontal
        } else if roll < horizontal + weights.vertical as u64 {
            MovementShape::Vertical
        } else {
            MovementShape::Diagonal
        }
    }

    /// `(d_lat, d_lon)` for a step of `step` degrees, each moved axis
    /// getting an independent random sign.
    pub fn displacement<R: Rng + ?Sized>(self, step: f64, rng: &mut R) -> (f64, f64) {
        let mut sign = || if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        match self {
            MovementShape::Horizontal => (0.0, step * sign()),
            MovementShape::Vertical   => (step * sign(), 0.0),
            MovementShape::Diagonal   => {
                let d_lat = step * DIAGONAL_FACTOR * sign();
                let d_lon = step * DIAGONAL_FACTOR * sign();
                (d_lat, d_lon)
            }
        }
    }
}
