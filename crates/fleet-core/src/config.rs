//! Engine configuration.
//!
//! Typically built in code with `..Default::default()`, or loaded from a
//! JSON file by the application crate (with the `serde` feature every field
//! is optional and falls back to its default).

use crate::{FleetError, FleetResult};

// ── ShapeWeights ──────────────────────────────────────────────────────────────

/// Relative weights of the three synthetic movement shapes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeWeights {
    /// East-west step.
    pub horizontal: u32,
    /// North-south step.
    pub vertical: u32,
    /// Step on both axes at 0.7× distance.
    pub diagonal: u32,
}

impl ShapeWeights {
    /// Sum of all three weights, widened so any `u32` inputs fit.
    #[inline]
    pub fn total(&self) -> u64 {
        self.horizontal as u64 + self.vertical as u64 + self.diagonal as u64
    }
}

impl Default for ShapeWeights {
    /// 40 / 40 / 20.
    fn default() -> Self {
        Self {
            horizontal: 40,
            vertical:   40,
            diagonal:   20,
        }
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Master RNG seed.  The same seed always produces identical movements.
    pub seed: u64,

    /// Milliseconds between movement-origination runs.  Default: 3000.
    pub origination_period_ms: u64,

    /// Cadence hint for drivers calling `tick`.  The engine itself does not
    /// depend on it.  Default: 33 (≈30 Hz).
    pub frame_interval_ms: u64,

    /// Maximum trail length per vehicle.  Default: 8.
    pub history_len: usize,

    /// Two positions closer than this (degrees, per axis) are the same.
    pub position_epsilon: f64,

    /// Fraction of the eligible set to move per origination run.
    pub selection_ratio: f64,

    /// Lower bound on vehicles moved per run (when any are eligible).
    pub min_selected: usize,

    /// Upper bound on vehicles moved per run.
    pub max_selected: usize,

    /// Upper bound (exclusive) of the random duration jitter in ms.
    pub jitter_ms: f64,

    /// Relative probabilities of the movement shapes.
    pub shape_weights: ShapeWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:                  0,
            origination_period_ms: 3_000,
            frame_interval_ms:     33,
            history_len:           8,
            position_epsilon:      1e-9,
            selection_ratio:       0.6,
            min_selected:          1,
            max_selected:          5,
            jitter_ms:             500.0,
            shape_weights:         ShapeWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Check every field for a usable value.
    pub fn validate(&self) -> FleetResult<()> {
        fn bad(msg: impl Into<String>) -> FleetResult<()> {
            Err(FleetError::Config(msg.into()))
        }

        if self.origination_period_ms == 0 {
            return bad("origination_period_ms must be positive");
        }
        if self.frame_interval_ms == 0 {
            return bad("frame_interval_ms must be positive");
        }
        if self.history_len == 0 {
            return bad("history_len must be at least 1");
        }
        if !self.position_epsilon.is_finite() || self.position_epsilon < 0.0 {
            return bad("position_epsilon must be finite and non-negative");
        }
        if !self.selection_ratio.is_finite() || !(0.0..=1.0).contains(&self.selection_ratio) {
            return bad("selection_ratio must be within [0, 1]");
        }
        if self.min_selected > self.max_selected {
            return bad(format!(
                "min_selected ({}) exceeds max_selected ({})",
                self.min_selected, self.max_selected
            ));
        }
        if !self.jitter_ms.is_finite() || self.jitter_ms < 0.0 {
            return bad("jitter_ms must be finite and non-negative");
        }
        if self.shape_weights.total() == 0 {
            return bad("shape_weights must not all be zero");
        }
        Ok(())
    }
}
