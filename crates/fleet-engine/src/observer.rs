//! Engine observer trait for progress reporting and data collection.

use fleet_core::{Timestamp, VehicleId};
use fleet_motion::{Arrival, Movement, PathHistory, ReconcileReport, VehicleRegistry};

use crate::TickSummary;

/// Callbacks invoked by [`Engine::ingest_observed`][crate::Engine::ingest_observed]
/// and [`Engine::tick_observed`][crate::Engine::tick_observed].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — arrival logger
///
/// ```rust,ignore
/// struct ArrivalLog(Vec<String>);
///
/// impl EngineObserver for ArrivalLog {
///     fn on_arrival(&mut self, arrival: &Arrival, now: Timestamp) {
///         self.0.push(format!("{now}: {} at {}", arrival.id, arrival.position));
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called after every reconciliation.
    fn on_reconciled(&mut self, _report: &ReconcileReport) {}

    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _now: Timestamp) {}

    /// Called for each vehicle that reached its target this tick.
    fn on_arrival(&mut self, _arrival: &Arrival, _now: Timestamp) {}

    /// Called for each movement the scheduler committed this tick.
    fn on_movement_started(&mut self, _id: &VehicleId, _movement: &Movement) {}

    /// Called once per tick after all state changes, with read-only access
    /// to the full registry and trails so that writers can record positions
    /// without the engine knowing about any output format.
    fn on_frame(
        &mut self,
        _now:      Timestamp,
        _registry: &VehicleRegistry,
        _history:  &PathHistory,
    ) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
