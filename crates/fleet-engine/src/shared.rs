//! `SharedEngine` — an [`Engine`] behind one mutex.
//!
//! For drivers that receive feed snapshots on one thread (network I/O) and
//! tick from another (frame timer).  The single lock guards the registry,
//! the trails and the scheduler together, so every `ingest` and `tick` is
//! applied whole and in lock-acquisition order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fleet_core::{SimRng, Timestamp, VehicleReport};
use fleet_motion::ReconcileReport;
use rand::Rng;

use crate::{Engine, FleetSnapshot, TickSummary};

pub struct SharedEngine<R: Rng = SimRng> {
    inner: Arc<Mutex<Engine<R>>>,
}

impl<R: Rng> Clone for SharedEngine<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Rng> SharedEngine<R> {
    pub fn new(engine: Engine<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn ingest(&self, reports: &[VehicleReport]) -> ReconcileReport {
        self.lock().ingest(reports)
    }

    pub fn tick(&self, now: Timestamp) -> TickSummary {
        self.lock().tick(now)
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<T>(&self, f: impl FnOnce(&mut Engine<R>) -> T) -> T {
        f(&mut self.lock())
    }

    // Engine methods do not panic mid-update, so a poisoned lock still
    // guards consistent state.
    fn lock(&self) -> MutexGuard<'_, Engine<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
