use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{ConfigError, RunConfig, LOG_EVERY, TRACE_SENTINEL};

use super::grid::Lattice;
use super::mask::InteriorMask;
use super::schedule::UpdateSchedule;

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The interior crossed the upper stopping bound.
    FixatedHigh,
    /// The interior crossed the lower stopping bound.
    FixatedLow,
    /// The schedule ran dry with the interior still between the bounds.
    BudgetExhausted,
}

impl Outcome {
    /// `Some(true)` for high fixation, `Some(false)` for low fixation, `None`
    /// when the run was inconclusive. Budget exhaustion is never folded into a
    /// fixation decision.
    pub fn fixated(self) -> Option<bool> {
        match self {
            Outcome::FixatedHigh => Some(true),
            Outcome::FixatedLow => Some(false),
            Outcome::BudgetExhausted => None,
        }
    }
}

/// Record of one completed run. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub outcome: Outcome,
    /// Number of update steps actually executed.
    pub iterations: usize,
    /// Interior share of ones after each executed step. Slots the run never
    /// reached keep the -1 sentinel; the length always equals the step budget.
    pub trace: Vec<f64>,
}

/// Executes one run against the supplied random source.
///
/// The lattice, the full update schedule, and every tie-break all draw from
/// `rng`, so a seeded generator reproduces the run exactly. Each step applies
/// a fixed order: update the scheduled site, rescan the interior mask, record
/// the share into the trace, then check the stopping rule. The iteration
/// counter advances as part of the step, so a run that stops on its first
/// update reports one iteration.
pub fn run_single<R: Rng + ?Sized>(
    config: &RunConfig,
    rng: &mut R,
) -> Result<RunResult, ConfigError> {
    config.validate()?;

    let mut lattice = Lattice::bernoulli(config.n_outer, config.p, config.boundary, rng);
    let schedule = UpdateSchedule::sample(config.n_outer, config.max_steps, rng);
    let mask = InteriorMask::centered(config.n_outer, config.n_interior);
    let target = mask.target();

    log::debug!(
        "starting run: n_outer = {}, n_interior = {}, p = {}, budget = {}",
        config.n_outer,
        config.n_interior,
        config.p,
        config.max_steps
    );

    let mut trace = vec![TRACE_SENTINEL; config.max_steps];
    let mut iterations = 0;
    let mut outcome = Outcome::BudgetExhausted;

    for (i, &site) in schedule.sites().iter().enumerate() {
        lattice.update_site(site, rng);
        iterations = i + 1;

        let ones = lattice.count_ones(mask.sites());
        let share = ones as f64 / target as f64;
        trace[i] = share;

        if iterations % LOG_EVERY == 0 {
            log::debug!(
                "iteration {} for p = {}: share of ones is {:.4}",
                iterations,
                config.p,
                share
            );
        }

        match config.policy.is_fixated(ones, target, config.threshold) {
            Some(true) => {
                outcome = Outcome::FixatedHigh;
                break;
            }
            Some(false) => {
                outcome = Outcome::FixatedLow;
                break;
            }
            None => {}
        }
    }

    log::info!(
        "run finished: {:?} after {} of {} steps (p = {})",
        outcome,
        iterations,
        config.max_steps,
        config.p
    );

    Ok(RunResult {
        outcome,
        iterations,
        trace,
    })
}

/// Runs with a generator seeded from `seed`, for reproducible traces.
pub fn run_seeded(config: &RunConfig, seed: u64) -> Result<RunResult, ConfigError> {
    let mut rng = StdRng::seed_from_u64(seed);
    run_single(config, &mut rng)
}

/// Runs with a fresh OS-entropy generator owned by this run alone.
pub fn run(config: &RunConfig) -> Result<RunResult, ConfigError> {
    let mut rng = StdRng::from_entropy();
    run_single(config, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Boundary, FixationPolicy, RunConfig};

    #[test]
    fn test_all_ones_fixates_high_in_one_step() {
        // Single-cell interior, everything drawn as 1: any update sees four
        // live neighbors and the share lands on 1.0 immediately.
        let config = RunConfig::new(5, 1, 1.0, 1, 0.9);
        let result = run_seeded(&config, 0).unwrap();
        assert_eq!(result.outcome, Outcome::FixatedHigh);
        assert_eq!(result.outcome.fixated(), Some(true));
        assert_eq!(result.iterations, 1);
        assert_eq!(result.trace, vec![1.0]);
    }

    #[test]
    fn test_all_zeros_fixates_low_in_one_step() {
        let mut config = RunConfig::new(5, 1, 0.0, 1, 0.9);
        config.boundary = Boundary::Fixed(false);
        let result = run_seeded(&config, 0).unwrap();
        assert_eq!(result.outcome, Outcome::FixatedLow);
        assert_eq!(result.outcome.fixated(), Some(false));
        assert_eq!(result.iterations, 1);
        assert_eq!(result.trace, vec![0.0]);
    }

    #[test]
    fn test_budget_exhaustion_is_reported_distinctly() {
        // A 16x16 interior starting near half density moves by at most
        // 1/256 per step, so five steps cannot reach either 0.99 bound.
        let mut config = RunConfig::new(20, 16, 0.5, 5, 0.99);
        config.boundary = Boundary::Random;
        let result = run_seeded(&config, 1).unwrap();
        assert_eq!(result.outcome, Outcome::BudgetExhausted);
        assert_eq!(result.outcome.fixated(), None);
        assert_eq!(result.iterations, 5);
        // Every slot was reached: no sentinel left
        assert_eq!(result.trace.len(), 5);
        assert!(result.trace.iter().all(|&share| (0.0..=1.0).contains(&share)));
    }

    #[test]
    fn test_trace_keeps_sentinel_past_the_stop() {
        let config = RunConfig::new(5, 1, 1.0, 100, 0.9);
        let result = run_seeded(&config, 3).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.trace.len(), 100);
        assert_eq!(result.trace[0], 1.0);
        assert!(result.trace[1..].iter().all(|&slot| slot == -1.0));
    }

    #[test]
    fn test_same_seed_reproduces_the_run() {
        let config = RunConfig::new(30, 20, 0.55, 2000, 0.85);
        let a = run_seeded(&config, 1234).unwrap();
        let b = run_seeded(&config, 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_absolute_policy_fixates_on_unanimity() {
        let mut config = RunConfig::new(5, 1, 1.0, 1, 0.9);
        config.policy = FixationPolicy::Absolute;
        let result = run_seeded(&config, 0).unwrap();
        assert_eq!(result.outcome, Outcome::FixatedHigh);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_invalid_config_fails_before_running() {
        let config = RunConfig::new(5, 5, 1.0, 1, 0.9);
        assert!(run_seeded(&config, 0).is_err());
    }
}
