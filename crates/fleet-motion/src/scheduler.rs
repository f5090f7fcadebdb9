//! `MovementScheduler` — periodic origination of synthetic movements.

use fleet_core::{EngineConfig, GeoPoint, ShapeWeights, Timestamp, VehicleId};
use rand::Rng;
use tracing::{debug, trace};

use crate::{AnimatedVehicle, Movement, MovementShape, VehicleRegistry, profile_for};

/// A movement committed by one origination run.
#[derive(Clone, Debug, PartialEq)]
pub struct Origination {
    pub id:       VehicleId,
    pub movement: Movement,
}

/// Outcome of one origination run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OriginationReport {
    /// Size of the eligible set (available and idle).
    pub eligible: usize,
    /// Movements committed, in selection order.
    pub started: Vec<Origination>,
    /// Selected vehicles left idle because their step was degenerate.
    pub skipped: usize,
}

/// Starts new movements on a fixed period.
///
/// The first call to [`poll`][Self::poll] arms the timer; origination first
/// happens one full period later, and then every period after the previous
/// run.
#[derive(Clone, Debug)]
pub struct MovementScheduler {
    period_ms:       u64,
    selection_ratio: f64,
    min_selected:    usize,
    max_selected:    usize,
    jitter_ms:       f64,
    shape_weights:   ShapeWeights,
    last_run:        Option<Timestamp>,
}

impl MovementScheduler {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            period_ms:       config.origination_period_ms,
            selection_ratio: config.selection_ratio,
            min_selected:    config.min_selected,
            max_selected:    config.max_selected,
            jitter_ms:       config.jitter_ms,
            shape_weights:   config.shape_weights,
            last_run:        None,
        }
    }

    /// When the scheduler last ran (or was armed).
    #[inline]
    pub fn last_run(&self) -> Option<Timestamp> {
        self.last_run
    }

    /// Run [`originate`][Self::originate] if a full period has elapsed since
    /// the last run.  Returns `None` when not due.
    ///
    /// If the clock moved backwards past the last run, the timer is re-armed
    /// at `now` instead of stalling until the clock catches up.
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now:      Timestamp,
        registry: &mut VehicleRegistry,
        rng:      &mut R,
    ) -> Option<OriginationReport> {
        let Some(last) = self.last_run else {
            self.last_run = Some(now);
            return None;
        };
        if now < last {
            self.last_run = Some(now);
            return None;
        }
        if now.saturating_since(last) < self.period_ms {
            return None;
        }
        self.last_run = Some(now);
        Some(self.originate(now, registry, rng))
    }

    /// Select a random subset of eligible vehicles and commit a movement for
    /// each.  Does not consult or update the period timer.
    pub fn originate<R: Rng + ?Sized>(
        &self,
        now:      Timestamp,
        registry: &mut VehicleRegistry,
        rng:      &mut R,
    ) -> OriginationReport {
        let eligible: Vec<VehicleId> = registry
            .iter()
            .filter(|(_, v)| v.is_eligible())
            .map(|(id, _)| id.clone())
            .collect();

        let mut report = OriginationReport {
            eligible: eligible.len(),
            ..Default::default()
        };
        let count = self.selection_count(eligible.len());
        if count == 0 {
            return report;
        }

        let chosen = rand::seq::index::sample(rng, eligible.len(), count);
        for idx in chosen.iter() {
            let id = &eligible[idx];
            let Some(vehicle) = registry.get(id.as_str()) else {
                continue;
            };
            let Some((target, duration_ms)) = self.plan(vehicle, rng) else {
                debug!(vehicle = %id, "degenerate movement skipped");
                report.skipped += 1;
                continue;
            };

            match registry.begin_movement(id.as_str(), target, now, duration_ms) {
                Ok(movement) => {
                    trace!(vehicle = %id, %target, ends_at = %movement.ends_at(), "movement started");
                    report.started.push(Origination { id: id.clone(), movement });
                }
                Err(e) => {
                    debug!(vehicle = %id, error = %e, "movement rejected");
                    report.skipped += 1;
                }
            }
        }
        report
    }

    /// Target and duration for one step of `vehicle`, or `None` if the step
    /// would be degenerate (non-finite or non-positive duration, or a target
    /// off the globe).
    pub fn plan<R: Rng + ?Sized>(
        &self,
        vehicle: &AnimatedVehicle,
        rng:     &mut R,
    ) -> Option<(GeoPoint, f64)> {
        let profile = profile_for(vehicle.kind);
        let shape = MovementShape::pick(&self.shape_weights, rng);
        let (d_lat, d_lon) = shape.displacement(profile.step_distance, rng);

        let from   = vehicle.current;
        let target = from.offset(d_lat, d_lon);
        let jitter = if self.jitter_ms > 0.0 {
            rng.gen_range(0.0..self.jitter_ms)
        } else {
            0.0
        };
        let duration_ms = profile.duration_ms(from.degree_distance(target), jitter);

        (target.is_valid() && duration_ms.is_finite() && duration_ms > 0.0)
            .then_some((target, duration_ms))
    }

    /// `clamp(round(ratio × eligible), min, max)`, capped at `eligible`.
    pub fn selection_count(&self, eligible: usize) -> usize {
        if eligible == 0 {
            return 0;
        }
        let wanted = (self.selection_ratio * eligible as f64).round() as usize;
        wanted
            .clamp(self.min_selected, self.max_selected)
            .min(eligible)
    }
}
