//! Read-only fleet views handed to renderers.
//!
//! Everything here is a value copy: holding a `FleetSnapshot` across later
//! `tick`s never observes further changes.

use fleet_core::{GeoPoint, Timestamp, VehicleId, VehicleKind, VehicleStatus, format_distance};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// One vehicle as of the snapshot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VehicleView {
    pub id:        VehicleId,
    pub kind:      VehicleKind,
    pub status:    VehicleStatus,
    /// Interpolated position.
    pub position:  GeoPoint,
    /// A synthetic movement is in flight.
    pub animating: bool,
    /// Recent positions, oldest first.
    pub trail:     Vec<GeoPoint>,
}

impl VehicleView {
    /// A trail is only worth drawing with at least two points.
    #[inline]
    pub fn has_trail(&self) -> bool {
        self.trail.len() > 1
    }

    /// Trail colour for this vehicle's kind.
    #[inline]
    pub fn trail_rgba(&self) -> [u8; 4] {
        self.kind.trail_rgba()
    }
}

/// A vehicle together with its distance from a query point.
#[derive(Clone, Debug, PartialEq)]
pub struct NearbyVehicle<'a> {
    pub vehicle:    &'a VehicleView,
    pub distance_m: f64,
    /// e.g. `"350 m away"`, `"2.3 km away"`.
    pub label:      String,
}

/// Consistent view of the whole fleet.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FleetSnapshot {
    /// `now` of the last tick before the snapshot, `None` before the first.
    pub taken_at: Option<Timestamp>,
    /// Ascending id order.
    pub vehicles: Vec<VehicleView>,
}

impl FleetSnapshot {
    pub fn get(&self, id: &str) -> Option<&VehicleView> {
        self.vehicles
            .binary_search_by(|v| v.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.vehicles[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VehicleView> {
        self.vehicles.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn animating_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.animating).count()
    }

    /// Up to `limit` vehicles closest to `point`, nearest first, by
    /// great-circle distance.
    ///
    /// The R-tree indexes unit vectors on the sphere.  Chord length grows
    /// monotonically with great-circle distance, so the tree's neighbour
    /// order is exact at every latitude and across the antimeridian.
    /// An invalid `point` matches nothing; vehicles with invalid positions
    /// are skipped.
    pub fn nearest_to(&self, point: GeoPoint, limit: usize) -> Vec<NearbyVehicle<'_>> {
        if limit == 0 || !point.is_valid() {
            return Vec::new();
        }

        let entries: Vec<VehicleEntry> = self
            .vehicles
            .iter()
            .enumerate()
            .filter(|(_, v)| v.position.is_valid())
            .map(|(index, v)| VehicleEntry {
                point: unit_vector(v.position),
                index,
            })
            .collect();
        if entries.is_empty() {
            return Vec::new();
        }
        let tree = RTree::bulk_load(entries);

        let mut nearby: Vec<NearbyVehicle<'_>> = tree
            .nearest_neighbor_iter(&unit_vector(point))
            .take(limit)
            .map(|e| {
                let vehicle = &self.vehicles[e.index];
                let distance_m = point.distance_m(vehicle.position);
                NearbyVehicle {
                    vehicle,
                    distance_m,
                    label: format_distance(distance_m),
                }
            })
            .collect();

        // Chord and haversine can disagree in the last bits on near-ties.
        nearby.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        nearby
    }
}

impl<'a> IntoIterator for &'a FleetSnapshot {
    type Item = &'a VehicleView;
    type IntoIter = std::slice::Iter<'a, VehicleView>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Point on the unit sphere for `p`.
fn unit_vector(p: GeoPoint) -> [f64; 3] {
    let (lat, lon) = (p.lat.to_radians(), p.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Unit-sphere point tagged with its index into `FleetSnapshot::vehicles`.
struct VehicleEntry {
    point: [f64; 3],
    index: usize,
}

impl RTreeObject for VehicleEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VehicleEntry {
    /// Squared chord length.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        self.point
            .iter()
            .zip(point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}
