use fleet_core::FleetError;
use fleet_motion::MotionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] FleetError),

    #[error("motion error: {0}")]
    Motion(#[from] MotionError),
}

pub type EngineResult<T> = Result<T, EngineError>;
