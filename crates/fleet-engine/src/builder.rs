//! Fluent builder for constructing an [`Engine`].

use fleet_core::{EngineConfig, SimRng, VehicleReport};
use fleet_motion::{FrameInterpolator, MovementScheduler, PathHistory, VehicleRegistry};
use rand::Rng;

use crate::{Engine, EngineResult, EngineStats};

/// Fluent builder for [`Engine<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                           |
/// |------------------------|-----------------------------------|
/// | `.rng(r)`              | `SimRng::new(config.seed)`        |
/// | `.initial_fleet(v)`    | Empty fleet                       |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config)
///     .rng(StdRng::seed_from_u64(9))
///     .initial_fleet(reports)
///     .build()?;
/// ```
pub struct EngineBuilder<R: Rng = SimRng> {
    config:  EngineConfig,
    rng:     R,
    initial: Vec<VehicleReport>,
}

impl EngineBuilder<SimRng> {
    /// Create a builder whose RNG is seeded from `config.seed`.
    pub fn new(config: EngineConfig) -> Self {
        let rng = SimRng::new(config.seed);
        Self {
            config,
            rng,
            initial: Vec::new(),
        }
    }
}

impl<R: Rng> EngineBuilder<R> {
    /// Replace the random source used for movement origination.
    pub fn rng<R2: Rng>(self, rng: R2) -> EngineBuilder<R2> {
        EngineBuilder {
            config:  self.config,
            rng,
            initial: self.initial,
        }
    }

    /// Fleet to ingest before the engine is returned.
    pub fn initial_fleet(mut self, reports: Vec<VehicleReport>) -> Self {
        self.initial = reports;
        self
    }

    /// Validate the configuration and return a ready engine.
    pub fn build(self) -> EngineResult<Engine<R>> {
        self.config.validate()?;

        let mut engine = Engine {
            registry:     VehicleRegistry::new(self.config.position_epsilon),
            history:      PathHistory::new(self.config.history_len, self.config.position_epsilon),
            scheduler:    MovementScheduler::new(&self.config),
            interpolator: FrameInterpolator::new(),
            rng:          self.rng,
            stats:        EngineStats::default(),
            config:       self.config,
        };
        if !self.initial.is_empty() {
            engine.ingest(&self.initial);
        }
        Ok(engine)
    }
}

impl Engine<SimRng> {
    /// Shorthand for `EngineBuilder::new(config).build()`.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        EngineBuilder::new(config).build()
    }
}
