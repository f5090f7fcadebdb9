//! Per-vehicle animation state.

use fleet_core::{GeoPoint, Timestamp, VehicleKind, VehicleReport, VehicleStatus};

/// A single synthetic transition from the vehicle's anchor to `target`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Movement {
    pub target:      GeoPoint,
    pub started_at:  Timestamp,
    /// Always positive and finite (enforced by [`Movement::new`]).
    pub duration_ms: f64,
}

impl Movement {
    /// Returns `None` if `duration_ms` is non-finite or not positive; such a
    /// movement must never be committed.
    pub fn new(target: GeoPoint, started_at: Timestamp, duration_ms: f64) -> Option<Self> {
        if duration_ms.is_finite() && duration_ms > 0.0 {
            Some(Self { target, started_at, duration_ms })
        } else {
            None
        }
    }

    /// Fraction of the movement completed at `now`, in `[0.0, 1.0]`.
    ///
    /// A `now` earlier than `started_at` counts as zero elapsed time.
    pub fn progress(&self, now: Timestamp) -> f64 {
        let elapsed = now.saturating_since(self.started_at) as f64;
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Timestamp at which the movement completes (rounded up to whole ms).
    pub fn ends_at(&self) -> Timestamp {
        self.started_at.offset(self.duration_ms.ceil() as u64)
    }
}

/// Engine-owned wrapper around one tracked vehicle.
///
/// A vehicle is either **idle** (`in_flight == None`, `current == anchor`)
/// or **animating** towards `in_flight.target`.  The trail lives in
/// [`PathHistory`][crate::PathHistory] under the same id.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedVehicle {
    pub kind:   VehicleKind,
    pub status: VehicleStatus,

    /// Position reported to consumers.
    pub current: GeoPoint,

    /// Position at the start of the current movement; equals `current` when
    /// idle.
    pub anchor: GeoPoint,

    /// Last authoritative position from the feed, used for change detection.
    /// May differ from `current` once a synthetic movement has completed.
    pub reported: GeoPoint,

    pub in_flight: Option<Movement>,
}

impl AnimatedVehicle {
    /// An idle vehicle at the report's position.
    pub fn from_report(report: &VehicleReport) -> Self {
        Self {
            kind:      report.kind,
            status:    report.status,
            current:   report.position,
            anchor:    report.position,
            reported:  report.position,
            in_flight: None,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Eligible for a new synthetic movement: available and idle.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.status.is_available() && !self.is_animating()
    }

    /// Move an idle vehicle to `position` (both `current` and `anchor`).
    pub(crate) fn settle(&mut self, position: GeoPoint) {
        self.current   = position;
        self.anchor    = position;
        self.in_flight = None;
    }
}
