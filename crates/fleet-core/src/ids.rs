//! Strongly typed vehicle identifier.
//!
//! Vehicle ids come from the upstream feed as opaque strings.  `VehicleId`
//! wraps the string so it cannot be confused with other text fields, and is
//! `Ord + Hash` so it can key both hash maps and ordered maps.  Ascending
//! id order is the canonical iteration order everywhere determinism matters.

use std::borrow::Borrow;
use std::fmt;

/// Stable, unique identifier of one vehicle.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VehicleId(String);

impl VehicleId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        VehicleId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        VehicleId(s.to_owned())
    }
}

impl From<String> for VehicleId {
    fn from(s: String) -> Self {
        VehicleId(s)
    }
}

impl Borrow<str> for VehicleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
