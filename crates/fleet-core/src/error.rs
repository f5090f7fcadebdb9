//! Framework error type.
//!
//! Sub-crates define their own error enums and convert `FleetError` into
//! them via `From` impls.

use thiserror::Error;

use crate::{GeoPoint, VehicleId};

/// The top-level error type for `fleet-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("vehicle {id} reported an invalid position {position}")]
    InvalidPosition { id: VehicleId, position: GeoPoint },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `fleet-*` crates.
pub type FleetResult<T> = Result<T, FleetError>;
