use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Progress is logged every this many executed update steps
pub const LOG_EVERY: usize = 1000;

/// Sentinel left in trace slots the run never reached
pub const TRACE_SENTINEL: f64 = -1.0;

// ============================================
// Sweep driver defaults
// ============================================

/// Outer lattice side used by the bundled driver
pub const SWEEP_N_OUTER: usize = 300;

/// Measured interior side used by the bundled driver
pub const SWEEP_N_INTERIOR: usize = 280;

/// Step budget per run in the sweep
pub const SWEEP_STEPS: usize = 1_000_000;

/// Fixation threshold used by the sweep
pub const SWEEP_THRESHOLD: f64 = 0.85;

/// Independent runs per density value
pub const SWEEP_RUNS: usize = 10;

/// Base seed for the sweep; each run derives its own generator from it
pub const SWEEP_SEED: u64 = 0;

/// Densities just above the critical point, swept as 0.5 + epsilon
pub const SWEEP_EPSILONS: [f64; 5] = [0.01, 0.025, 0.05, 0.075, 0.1];

/// Additional supercritical densities appended to the sweep
pub const SWEEP_EXTRA_DENSITIES: [f64; 3] = [0.7, 0.8, 0.9];

/// How the two boundary rows are filled at initialization.
///
/// Only rows 0 and n-1 are boundary rows; columns are never clamped, they are
/// merely excluded from the update-site range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    /// Both boundary rows are overwritten with the given value and keep it for
    /// the lifetime of the run.
    Fixed(bool),
    /// Boundary rows keep their Bernoulli(p) draw. They are still never
    /// updated afterwards.
    Random,
}

impl Default for Boundary {
    fn default() -> Self {
        Boundary::Fixed(true)
    }
}

/// Stopping rule applied to the interior count after every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixationPolicy {
    /// Fixation once the interior share crosses `threshold` from above or
    /// `1 - threshold` from below.
    Threshold,
    /// Fixation only when the interior is exactly all-1 or all-0.
    Absolute,
}

impl Default for FixationPolicy {
    fn default() -> Self {
        FixationPolicy::Threshold
    }
}

impl FixationPolicy {
    /// Classifies the interior count against this stopping rule.
    ///
    /// Returns `Some(true)` once the interior has fixated toward 1,
    /// `Some(false)` toward 0, and `None` while the run is undecided.
    pub fn is_fixated(self, ones: usize, target: usize, threshold: f64) -> Option<bool> {
        match self {
            FixationPolicy::Threshold => {
                let ones = ones as f64;
                let target = target as f64;
                if ones >= threshold * target {
                    Some(true)
                } else if ones <= (1.0 - threshold) * target {
                    Some(false)
                } else {
                    None
                }
            }
            FixationPolicy::Absolute => {
                if ones == target {
                    Some(true)
                } else if ones == 0 {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}

/// Invalid run parameter, reported before any lattice is allocated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("outer lattice side must be at least 3, got {0}")]
    OuterTooSmall(usize),
    #[error("interior side must be at least 1")]
    InteriorEmpty,
    #[error("interior side {n_interior} does not fit strictly inside outer side {n_outer}")]
    InteriorTooLarge { n_outer: usize, n_interior: usize },
    #[error("initial density must lie in [0, 1], got {0}")]
    DensityOutOfRange(f64),
    #[error("fixation threshold must lie in (0.5, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error("step budget must be positive")]
    ZeroStepBudget,
}

/// Parameters of a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Side length of the outer lattice; rows 0 and n-1 are boundary rows.
    pub n_outer: usize,
    /// Side length of the centered sub-square the fixation statistic is
    /// measured over.
    pub n_interior: usize,
    /// Probability that a cell starts as 1.
    pub p: f64,
    /// Maximum number of single-site updates before the run is abandoned.
    pub max_steps: usize,
    /// Interior share at which the run is declared fixated.
    pub threshold: f64,
    /// Boundary-row condition.
    #[serde(default)]
    pub boundary: Boundary,
    /// Stopping rule.
    #[serde(default)]
    pub policy: FixationPolicy,
}

impl RunConfig {
    /// Builds a configuration with the default boundary (rows clamped to 1)
    /// and the threshold stopping rule.
    pub fn new(n_outer: usize, n_interior: usize, p: f64, max_steps: usize, threshold: f64) -> Self {
        Self {
            n_outer,
            n_interior,
            p,
            max_steps,
            threshold,
            boundary: Boundary::default(),
            policy: FixationPolicy::default(),
        }
    }

    /// Centering offset of the measured sub-square inside the outer lattice.
    pub fn buffer(&self) -> usize {
        (self.n_outer - self.n_interior) / 2
    }

    /// Rejects the first invalid parameter. Nothing is clamped: a bad value is
    /// an error, not a suggestion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_outer < 3 {
            return Err(ConfigError::OuterTooSmall(self.n_outer));
        }
        if self.n_interior == 0 {
            return Err(ConfigError::InteriorEmpty);
        }
        // The measured sub-square must sit strictly inside the updatable
        // interior, so it may never touch the boundary rows.
        if self.n_interior + 2 > self.n_outer {
            return Err(ConfigError::InteriorTooLarge {
                n_outer: self.n_outer,
                n_interior: self.n_interior,
            });
        }
        if !(0.0..=1.0).contains(&self.p) || self.p.is_nan() {
            return Err(ConfigError::DensityOutOfRange(self.p));
        }
        if !(self.threshold > 0.5 && self.threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepBudget);
        }
        Ok(())
    }
}
