//! The `Engine` struct: ingest, tick, snapshot.

use fleet_core::{EngineConfig, GeoPoint, SimRng, Timestamp, VehicleId, VehicleReport};
use fleet_motion::{
    FrameInterpolator, Movement, MovementScheduler, PathHistory, ReconcileReport,
    VehicleRegistry,
};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::{EngineObserver, EngineResult, FleetSnapshot, NoopObserver, VehicleView};

// ── Per-tick and cumulative counters ──────────────────────────────────────────

/// What one [`Engine::tick`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub now: Timestamp,
    /// Vehicles still moving after the tick (including ones started in it).
    pub animating: usize,
    pub arrivals: usize,
    /// `true` if the origination period elapsed and the scheduler ran.
    pub scheduler_ran: bool,
    pub originated: usize,
    /// Vehicles the scheduler selected but left idle (degenerate step).
    pub skipped: usize,
    pub clock_regressed: bool,
}

/// Running totals since the engine was built.  Diagnostic only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub ticks: u64,
    pub ingests: u64,
    /// Reports dropped for an invalid position.
    pub rejected_reports: u64,
    /// Repeated ids within a batch.
    pub duplicate_reports: u64,
    pub movements_started: u64,
    pub movements_skipped: u64,
    pub arrivals: u64,
    pub clock_regressions: u64,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The vehicle motion engine.
///
/// Owns the registry and trails, and wires the scheduler and interpolator
/// to the timestamps the driver passes to [`tick`][Self::tick].
///
/// `R` is the random source for movement origination; the default is a
/// [`SimRng`] seeded from `config.seed`.  Create via
/// [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<R: Rng = SimRng> {
    pub(crate) config:       EngineConfig,
    pub(crate) registry:     VehicleRegistry,
    pub(crate) history:      PathHistory,
    pub(crate) scheduler:    MovementScheduler,
    pub(crate) interpolator: FrameInterpolator,
    pub(crate) rng:          R,
    pub(crate) stats:        EngineStats,
}

impl<R: Rng> Engine<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Merge a full fleet snapshot.  Callable at any time, at any rate.
    ///
    /// Invalid reports are dropped and logged; they never fail the call.
    pub fn ingest(&mut self, reports: &[VehicleReport]) -> ReconcileReport {
        self.ingest_observed(reports, &mut NoopObserver)
    }

    pub fn ingest_observed<O: EngineObserver>(
        &mut self,
        reports:  &[VehicleReport],
        observer: &mut O,
    ) -> ReconcileReport {
        let report = self.registry.reconcile(reports, &mut self.history);

        for id in &report.rejected {
            warn!(vehicle = %id, "dropping report with invalid position");
        }
        if report.duplicates > 0 {
            warn!(duplicates = report.duplicates, "batch repeated vehicle ids; kept first occurrence");
        }
        debug!(
            tracked = self.registry.len(),
            added   = report.added.len(),
            removed = report.removed.len(),
            updated = report.updated,
            "fleet reconciled"
        );

        self.stats.ingests += 1;
        self.stats.rejected_reports += report.rejected.len() as u64;
        self.stats.duplicate_reports += report.duplicates as u64;

        observer.on_reconciled(&report);
        report
    }

    /// Advance every in-flight movement to `now`, then run the scheduler if
    /// its period has elapsed.
    pub fn tick(&mut self, now: Timestamp) -> TickSummary {
        self.tick_observed(now, &mut NoopObserver)
    }

    /// [`tick`][Self::tick] with observer callbacks.
    pub fn tick_observed<O: EngineObserver>(&mut self, now: Timestamp, observer: &mut O) -> TickSummary {
        observer.on_tick_start(now);

        // ── Phase 1: interpolate ──────────────────────────────────────────
        let advanced = self
            .interpolator
            .advance(now, &mut self.registry, &mut self.history);
        for arrival in &advanced.arrivals {
            trace!(vehicle = %arrival.id, position = %arrival.position, "movement finished");
            observer.on_arrival(arrival, now);
        }

        // ── Phase 2: originate ────────────────────────────────────────────
        //
        // Runs after interpolation so vehicles that arrived this tick are
        // already idle and eligible.
        let originated = self.scheduler.poll(now, &mut self.registry, &mut self.rng);
        if let Some(run) = &originated {
            for o in &run.started {
                observer.on_movement_started(&o.id, &o.movement);
            }
            debug!(
                eligible   = run.eligible,
                originated = run.started.len(),
                skipped    = run.skipped,
                "origination run"
            );
        }

        let summary = TickSummary {
            now,
            animating:       self.registry.animating_count(),
            arrivals:        advanced.arrivals.len(),
            scheduler_ran:   originated.is_some(),
            originated:      originated.as_ref().map_or(0, |r| r.started.len()),
            skipped:         originated.as_ref().map_or(0, |r| r.skipped),
            clock_regressed: advanced.clock_regressed,
        };

        self.stats.ticks += 1;
        self.stats.arrivals += summary.arrivals as u64;
        self.stats.movements_started += summary.originated as u64;
        self.stats.movements_skipped += summary.skipped as u64;
        self.stats.clock_regressions += summary.clock_regressed as u64;

        observer.on_frame(now, &self.registry, &self.history);
        observer.on_tick_end(&summary);
        summary
    }

    /// Value copy of every tracked vehicle, ascending id order, as of the
    /// last completed `ingest` or `tick`.
    pub fn snapshot(&self) -> FleetSnapshot {
        let vehicles = self
            .registry
            .iter()
            .map(|(id, v)| VehicleView {
                id:        id.clone(),
                kind:      v.kind,
                status:    v.status,
                position:  v.current,
                animating: v.is_animating(),
                trail:     self.history.get(id.as_str()),
            })
            .collect();

        FleetSnapshot {
            taken_at: self.interpolator.last_now(),
            vehicles,
        }
    }

    /// Start a movement for an idle vehicle directly, bypassing the
    /// scheduler (e.g. to replay a recorded movement).
    pub fn begin_movement(
        &mut self,
        id:          &str,
        target:      GeoPoint,
        now:         Timestamp,
        duration_ms: f64,
    ) -> EngineResult<Movement> {
        self.begin_movement_observed(id, target, now, duration_ms, &mut NoopObserver)
    }

    /// [`begin_movement`][Self::begin_movement] with the
    /// `on_movement_started` callback.
    pub fn begin_movement_observed<O: EngineObserver>(
        &mut self,
        id:          &str,
        target:      GeoPoint,
        now:         Timestamp,
        duration_ms: f64,
        observer:    &mut O,
    ) -> EngineResult<Movement> {
        let movement = self.registry.begin_movement(id, target, now, duration_ms)?;
        self.stats.movements_started += 1;
        observer.on_movement_started(&VehicleId::from(id), &movement);
        Ok(movement)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    #[inline]
    pub fn history(&self) -> &PathHistory {
        &self.history
    }

    #[inline]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Number of tracked vehicles.
    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
