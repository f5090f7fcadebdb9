//! Vehicle kind/status enums and the authoritative feed report.
//!
//! The upstream feed carries kind and status as free-form strings.
//! `from_label` maps them onto the closed enums here; anything unrecognised
//! becomes `Other` / `Unknown` rather than an error.

use crate::{FleetError, FleetResult, GeoPoint, VehicleId};

// ── VehicleKind ──────────────────────────────────────────────────────────────

/// The type of emergency vehicle.  Selects the movement profile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleKind {
    Ambulance,
    Police,
    Fire,
    /// Any vehicle type the feed reports that is not one of the above.
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

impl VehicleKind {
    /// Parse a feed label, case-insensitively.  Never fails.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "ambulance" => VehicleKind::Ambulance,
            "police"    => VehicleKind::Police,
            "fire"      => VehicleKind::Fire,
            _           => VehicleKind::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Ambulance => "ambulance",
            VehicleKind::Police    => "police",
            VehicleKind::Fire      => "fire",
            VehicleKind::Other     => "other",
        }
    }

    /// Trail colour used by map renderers, as `[r, g, b, a]`.
    pub fn trail_rgba(self) -> [u8; 4] {
        match self {
            VehicleKind::Ambulance => [234, 56, 76, 179],
            VehicleKind::Police    => [30, 174, 219, 179],
            VehicleKind::Fire      => [249, 115, 22, 179],
            VehicleKind::Other     => [75, 85, 99, 179],
        }
    }
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VehicleStatus ────────────────────────────────────────────────────────────

/// Dispatch status.  Only `Available` vehicles receive synthetic movement.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleStatus {
    Available,
    Busy,
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl VehicleStatus {
    /// Parse a feed label, case-insensitively.  A missing status is `Unknown`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("available") => VehicleStatus::Available,
            Some("busy")      => VehicleStatus::Busy,
            _                 => VehicleStatus::Unknown,
        }
    }

    #[inline]
    pub fn is_available(self) -> bool {
        matches!(self, VehicleStatus::Available)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Busy      => "busy",
            VehicleStatus::Unknown   => "unknown",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VehicleReport ────────────────────────────────────────────────────────────

/// One authoritative vehicle record from the external feed.
///
/// A batch of reports is always a full fleet snapshot, never a delta.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleReport {
    pub id:       VehicleId,
    pub kind:     VehicleKind,
    pub status:   VehicleStatus,
    pub position: GeoPoint,
}

impl VehicleReport {
    pub fn new(
        id:       impl Into<VehicleId>,
        kind:     VehicleKind,
        status:   VehicleStatus,
        position: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            status,
            position,
        }
    }

    /// Build a report from raw feed fields.
    pub fn from_feed(
        id:     &str,
        kind:   &str,
        status: Option<&str>,
        lat:    f64,
        lon:    f64,
    ) -> Self {
        Self::new(
            id,
            VehicleKind::from_label(kind),
            VehicleStatus::from_label(status),
            GeoPoint::new(lat, lon),
        )
    }

    /// Reject reports whose position is non-finite or out of range.
    pub fn validate(&self) -> FleetResult<()> {
        if self.position.is_valid() {
            Ok(())
        } else {
            Err(FleetError::InvalidPosition {
                id:       self.id.clone(),
                position: self.position,
            })
        }
    }
}
