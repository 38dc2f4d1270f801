mod grid;
mod mask;
mod runner;
mod schedule;

pub use grid::{Lattice, Site};
pub use mask::InteriorMask;
pub use runner::{run, run_seeded, run_single, Outcome, RunResult};
pub use schedule::UpdateSchedule;
