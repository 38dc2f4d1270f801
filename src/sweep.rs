use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::{ConfigError, RunConfig};
use crate::simulation::{run_single, Outcome};

/// Aggregate fixation statistics for one density value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixationEstimate {
    /// Initial density the runs were drawn at.
    pub p: f64,
    /// Number of independent runs.
    pub runs: usize,
    /// Share of runs that fixated toward 1.
    pub fixation_rate: f64,
    /// Mean iteration count over the runs that fixated toward 1; 0 when none
    /// did.
    pub mean_iterations_when_fixed: f64,
    /// Runs that exhausted their budget without a decision. Counted on their
    /// own, never as low fixations.
    pub unresolved: usize,
}

/// Repeats independent runs of one configuration and aggregates the outcomes.
///
/// Runs execute sequentially; each owns a generator seeded from `seed` plus
/// the run index, so there is no shared random state and repeating the whole
/// estimate with the same seed reproduces it exactly.
pub fn estimate_fixation(
    config: &RunConfig,
    runs: usize,
    seed: u64,
) -> Result<FixationEstimate, ConfigError> {
    config.validate()?;

    let mut fixations = 0usize;
    let mut unresolved = 0usize;
    let mut iterations_sum = 0usize;

    for rep in 0..runs {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(rep as u64));
        let result = run_single(config, &mut rng)?;
        match result.outcome {
            Outcome::FixatedHigh => {
                fixations += 1;
                iterations_sum += result.iterations;
            }
            Outcome::FixatedLow => {}
            Outcome::BudgetExhausted => unresolved += 1,
        }
        log::info!(
            "run {}/{} at p = {}: {:?} after {} steps",
            rep + 1,
            runs,
            config.p,
            result.outcome,
            result.iterations
        );
    }

    let fixation_rate = if runs > 0 {
        fixations as f64 / runs as f64
    } else {
        0.0
    };
    let mean_iterations_when_fixed = if fixations > 0 {
        iterations_sum as f64 / fixations as f64
    } else {
        0.0
    };

    Ok(FixationEstimate {
        p: config.p,
        runs,
        fixation_rate,
        mean_iterations_when_fixed,
        unresolved,
    })
}
