//! `PathHistory` — bounded trailing path per vehicle.
//!
//! Each trail is a FIFO of at most `capacity` positions, oldest first.
//! Appending a position equal (within `epsilon`) to the newest entry is a
//! no-op, so a parked vehicle does not fill its trail with copies of the
//! same point.

use std::collections::VecDeque;

use fleet_core::{GeoPoint, VehicleId};

#[cfg(feature = "fx-hash")]
type TrailMap = rustc_hash::FxHashMap<VehicleId, VecDeque<GeoPoint>>;

#[cfg(not(feature = "fx-hash"))]
type TrailMap = std::collections::HashMap<VehicleId, VecDeque<GeoPoint>>;

/// Per-vehicle trails keyed by `VehicleId`.
#[derive(Clone, Debug)]
pub struct PathHistory {
    capacity: usize,
    epsilon:  f64,
    trails:   TrailMap,
}

impl PathHistory {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize, epsilon: f64) -> Self {
        Self {
            capacity: capacity.max(1),
            epsilon,
            trails:   TrailMap::default(),
        }
    }

    /// Append `position` to `id`'s trail, creating the trail if needed and
    /// dropping the oldest entries beyond capacity.
    ///
    /// Returns `false` if the position duplicated the newest entry.
    pub fn append(&mut self, id: &VehicleId, position: GeoPoint) -> bool {
        let capacity = self.capacity;
        let trail = self
            .trails
            .entry(id.clone())
            .or_insert_with(|| VecDeque::with_capacity(capacity));

        if trail
            .back()
            .is_some_and(|last| last.approx_eq(position, self.epsilon))
        {
            return false;
        }

        trail.push_back(position);
        while trail.len() > capacity {
            trail.pop_front();
        }
        true
    }

    /// Copy of `id`'s trail, oldest first.  Empty for untracked ids.
    pub fn get(&self, id: &str) -> Vec<GeoPoint> {
        self.trails
            .get(id)
            .map(|t| t.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Newest trail entry for `id`.
    pub fn last(&self, id: &str) -> Option<GeoPoint> {
        self.trails.get(id).and_then(|t| t.back().copied())
    }

    /// Number of points in `id`'s trail.
    pub fn trail_len(&self, id: &str) -> usize {
        self.trails.get(id).map_or(0, VecDeque::len)
    }

    /// Drop `id`'s trail entirely.
    pub fn remove(&mut self, id: &str) -> bool {
        self.trails.remove(id).is_some()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of vehicles with a trail.
    #[inline]
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}
