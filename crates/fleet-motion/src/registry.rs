//! The `VehicleRegistry` — canonical id → animation state map.

use std::collections::{BTreeMap, HashSet};

use fleet_core::{GeoPoint, Timestamp, VehicleId, VehicleReport};

use crate::{AnimatedVehicle, MotionError, MotionResult, Movement, PathHistory};

/// Outcome of one [`VehicleRegistry::reconcile`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Ids seen for the first time.
    pub added: Vec<VehicleId>,
    /// Ids tracked before and gone from this batch.
    pub removed: Vec<VehicleId>,
    /// Ids dropped for an invalid position (treated as absent).
    pub rejected: Vec<VehicleId>,
    /// Known vehicles whose kind, status or position changed.
    pub updated: usize,
    /// Repeated ids within the batch; the first occurrence wins.
    pub duplicates: usize,
}

impl ReconcileReport {
    /// `true` if the batch left the registry exactly as it was.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated == 0
    }
}

/// Holds the animation state of every tracked vehicle.
///
/// Backed by a `BTreeMap` so iteration is in ascending id order; the
/// scheduler's random selection is only reproducible under a fixed seed if
/// the eligible set is enumerated in a fixed order.
#[derive(Clone, Debug)]
pub struct VehicleRegistry {
    vehicles: BTreeMap<VehicleId, AnimatedVehicle>,
    epsilon:  f64,
}

impl VehicleRegistry {
    /// `epsilon` is the per-axis tolerance (degrees) below which a reported
    /// position counts as unchanged.
    pub fn new(epsilon: f64) -> Self {
        Self {
            vehicles: BTreeMap::new(),
            epsilon,
        }
    }

    /// Merge a full fleet snapshot.
    ///
    /// - New ids start idle at their reported position with a one-point trail.
    /// - Known ids take the new kind and status.  A moved position is
    ///   appended to the trail; if the vehicle is idle it also jumps there,
    ///   while an in-flight movement is left to finish.
    /// - Tracked ids absent from `reports` are removed with their trails.
    ///
    /// Reports with invalid positions are skipped, so a vehicle whose
    /// position turns invalid is removed for this cycle.
    pub fn reconcile(
        &mut self,
        reports: &[VehicleReport],
        history: &mut PathHistory,
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(reports.len());

        for incoming in reports {
            if incoming.validate().is_err() {
                report.rejected.push(incoming.id.clone());
                continue;
            }
            if !seen.insert(incoming.id.as_str()) {
                report.duplicates += 1;
                continue;
            }

            match self.vehicles.get_mut(incoming.id.as_str()) {
                None => {
                    history.remove(incoming.id.as_str());
                    history.append(&incoming.id, incoming.position);
                    self.vehicles
                        .insert(incoming.id.clone(), AnimatedVehicle::from_report(incoming));
                    report.added.push(incoming.id.clone());
                }
                Some(vehicle) => {
                    let mut changed = false;

                    if vehicle.kind != incoming.kind || vehicle.status != incoming.status {
                        vehicle.kind   = incoming.kind;
                        vehicle.status = incoming.status;
                        changed = true;
                    }

                    if !vehicle.reported.approx_eq(incoming.position, self.epsilon) {
                        vehicle.reported = incoming.position;
                        history.append(&incoming.id, incoming.position);
                        if !vehicle.is_animating() {
                            vehicle.settle(incoming.position);
                        }
                        changed = true;
                    }

                    if changed {
                        report.updated += 1;
                    }
                }
            }
        }

        // A rejected id that was also reported validly stays tracked.
        report.rejected.retain(|id| !seen.contains(id.as_str()));

        let removed: Vec<VehicleId> = self
            .vehicles
            .keys()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect();
        for id in &removed {
            self.vehicles.remove(id);
            history.remove(id.as_str());
        }
        report.removed = removed;

        report
    }

    /// Commit a synthetic movement for an idle vehicle.
    ///
    /// The vehicle's anchor is reset to its current position.
    pub fn begin_movement(
        &mut self,
        id:          &str,
        target:      GeoPoint,
        now:         Timestamp,
        duration_ms: f64,
    ) -> MotionResult<Movement> {
        let vehicle = self
            .vehicles
            .get_mut(id)
            .ok_or_else(|| MotionError::UnknownVehicle(id.into()))?;

        if vehicle.is_animating() {
            return Err(MotionError::AlreadyMoving(id.into()));
        }
        if !target.is_valid() {
            return Err(MotionError::InvalidTarget { id: id.into(), target });
        }
        let movement = Movement::new(target, now, duration_ms)
            .ok_or_else(|| MotionError::DegenerateDuration { id: id.into(), duration_ms })?;

        vehicle.anchor    = vehicle.current;
        vehicle.in_flight = Some(movement);
        Ok(movement)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&AnimatedVehicle> {
        self.vehicles.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.vehicles.contains_key(id)
    }

    /// All vehicles in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&VehicleId, &AnimatedVehicle)> {
        self.vehicles.iter()
    }

    /// Tracked ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &VehicleId> {
        self.vehicles.keys()
    }

    /// Number of vehicles with a movement in flight.
    pub fn animating_count(&self) -> usize {
        self.vehicles.values().filter(|v| v.is_animating()).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub(crate) fn vehicles_mut(&mut self) -> &mut BTreeMap<VehicleId, AnimatedVehicle> {
        &mut self.vehicles
    }
}
