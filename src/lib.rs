//! Glauber-dynamics fixation simulator on a two-dimensional binary lattice.
//!
//! A run draws an n x n Bernoulli(p) lattice whose top and bottom rows are
//! clamped to a boundary value, then repeatedly picks a uniform interior site
//! and applies the four-neighbor majority rule, resolving exact ties with a
//! fair coin. After every update the share of ones over a centered interior
//! sub-square is measured; the run stops once that share crosses the fixation
//! threshold in either direction, or once the step budget is exhausted.
//!
//! Sweeping the initial density `p` over many independent runs gives an
//! empirical estimate of the fixation probability as a function of `p`.

pub mod config;
pub mod output;
pub mod simulation;
pub mod sweep;

pub use config::{Boundary, ConfigError, FixationPolicy, RunConfig};
pub use simulation::{Outcome, RunResult};

/// Runs a single simulation with the default boundary (rows clamped to 1) and
/// the threshold stopping rule, drawing from a fresh OS-entropy generator.
///
/// Flat driver-facing surface: every parameter is a plain scalar and the
/// result carries the fixation outcome, the executed step count, and the full
/// interior-share trace.
pub fn run(
    n_outer: usize,
    n_interior: usize,
    p: f64,
    max_steps: usize,
    threshold: f64,
) -> Result<RunResult, ConfigError> {
    let config = RunConfig::new(n_outer, n_interior, p, max_steps, threshold);
    simulation::run(&config)
}
