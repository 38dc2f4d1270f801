use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use glauber_fixation::config::{
    RunConfig, SWEEP_EPSILONS, SWEEP_EXTRA_DENSITIES, SWEEP_N_INTERIOR, SWEEP_N_OUTER, SWEEP_RUNS,
    SWEEP_SEED, SWEEP_STEPS, SWEEP_THRESHOLD,
};
use glauber_fixation::output;
use glauber_fixation::simulation::run_seeded;
use glauber_fixation::sweep::{estimate_fixation, FixationEstimate};

/// Parameters of the whole sweep, dumped next to its results.
#[derive(Serialize)]
struct SweepParams {
    base: RunConfig,
    densities: Vec<f64>,
    runs_per_density: usize,
    seed: u64,
}

fn main() {
    env_logger::init();

    if let Err(err) = run_sweep() {
        log::error!("sweep failed: {:#}", err);
        std::process::exit(1);
    }
}

fn run_sweep() -> anyhow::Result<()> {
    let results_dir = Path::new("results");
    let trace_dir = results_dir.join("traces");

    let mut densities: Vec<f64> = SWEEP_EPSILONS.iter().map(|eps| 0.5 + eps).collect();
    densities.extend(SWEEP_EXTRA_DENSITIES);

    let base = RunConfig::new(
        SWEEP_N_OUTER,
        SWEEP_N_INTERIOR,
        densities[0],
        SWEEP_STEPS,
        SWEEP_THRESHOLD,
    );
    base.validate().context("sweep configuration")?;

    log::info!(
        "sweeping {} densities on a {}x{} lattice ({} interior), {} runs each",
        densities.len(),
        SWEEP_N_OUTER,
        SWEEP_N_OUTER,
        SWEEP_N_INTERIOR,
        SWEEP_RUNS
    );

    let params = SweepParams {
        base: base.clone(),
        densities: densities.clone(),
        runs_per_density: SWEEP_RUNS,
        seed: SWEEP_SEED,
    };
    output::write_json(results_dir, "sweep-params.json", &params)
        .context("writing sweep parameters")?;

    let mut estimates: Vec<FixationEstimate> = Vec::with_capacity(densities.len());
    for &p in &densities {
        let mut config = base.clone();
        config.p = p;

        let estimate = estimate_fixation(&config, SWEEP_RUNS, SWEEP_SEED)
            .with_context(|| format!("estimating fixation at p = {}", p))?;
        log::info!(
            "p = {:.3}: fixation rate {:.2}, mean iterations when fixed {:.0}, {} unresolved",
            estimate.p,
            estimate.fixation_rate,
            estimate.mean_iterations_when_fixed,
            estimate.unresolved
        );
        estimates.push(estimate);

        // One reproducible trace run per density, persisted for plotting
        let result = run_seeded(&config, SWEEP_SEED)?;
        let run_id = format!("p{:.3}", p);
        if let Err(err) = output::write_trace(&trace_dir, &run_id, "0", &result.trace) {
            // A lost trace must not take the remaining densities down with it
            log::error!("{}", err);
        }
    }

    output::write_json(results_dir, "fixation-estimates.json", &estimates)
        .context("writing fixation estimates")?;

    log::info!("sweep finished: {} densities estimated", estimates.len());
    Ok(())
}
