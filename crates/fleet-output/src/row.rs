//! Plain data row types written by output backends.

use fleet_core::{GeoPoint, Timestamp, VehicleId, VehicleKind, VehicleStatus};
use fleet_engine::TickSummary;
use fleet_motion::{AnimatedVehicle, PathHistory};

/// One vehicle's rendered state in one recorded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFrameRow {
    /// Zero-based tick counter since the recorder was created.
    pub frame:      u64,
    pub time_ms:    u64,
    pub vehicle_id: VehicleId,
    pub kind:       VehicleKind,
    pub status:     VehicleStatus,
    pub position:   GeoPoint,
    pub animating:  bool,
    pub trail_len:  usize,
}

impl VehicleFrameRow {
    pub fn from_vehicle(
        frame:   u64,
        now:     Timestamp,
        id:      &VehicleId,
        vehicle: &AnimatedVehicle,
        history: &PathHistory,
    ) -> Self {
        Self {
            frame,
            time_ms:    now.as_millis(),
            vehicle_id: id.clone(),
            kind:       vehicle.kind,
            status:     vehicle.status,
            position:   vehicle.current,
            animating:  vehicle.is_animating(),
            trail_len:  history.trail_len(id.as_str()),
        }
    }
}

/// Counters for one engine tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub frame:           u64,
    pub time_ms:         u64,
    pub animating:       u64,
    pub arrivals:        u64,
    pub originated:      u64,
    pub skipped:         u64,
    pub clock_regressed: bool,
}

impl TickSummaryRow {
    pub fn from_summary(frame: u64, summary: &TickSummary) -> Self {
        Self {
            frame,
            time_ms:         summary.now.as_millis(),
            animating:       summary.animating as u64,
            arrivals:        summary.arrivals as u64,
            originated:      summary.originated as u64,
            skipped:         summary.skipped as u64,
            clock_regressed: summary.clock_regressed,
        }
    }
}
