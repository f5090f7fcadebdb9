use fleet_core::{GeoPoint, VehicleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("vehicle {0} is not tracked")]
    UnknownVehicle(VehicleId),

    #[error("vehicle {0} is already moving")]
    AlreadyMoving(VehicleId),

    #[error("movement target {target} for vehicle {id} is not a valid coordinate")]
    InvalidTarget { id: VehicleId, target: GeoPoint },

    #[error("movement for vehicle {id} has degenerate duration {duration_ms} ms")]
    DegenerateDuration { id: VehicleId, duration_ms: f64 },
}

pub type MotionResult<T> = Result<T, MotionError>;
