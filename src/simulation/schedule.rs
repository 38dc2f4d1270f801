use rand::Rng;

use super::grid::Site;

/// Pre-drawn sequence of update sites for one run.
///
/// The whole schedule is sampled before the loop starts, so a run's site
/// sequence is a pure function of its random source and stays decoupled from
/// how far the loop actually gets. Sites may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSchedule {
    sites: Vec<Site>,
}

impl UpdateSchedule {
    /// Draws `steps` sites with row and column each uniform on the closed
    /// range [1, side - 2], excluding the outermost ring.
    ///
    /// `side` must be at least 3.
    pub fn sample<R: Rng + ?Sized>(side: usize, steps: usize, rng: &mut R) -> Self {
        let hi = side - 2;
        let sites = (0..steps)
            .map(|_| (rng.gen_range(1..=hi), rng.gen_range(1..=hi)))
            .collect();
        Self { sites }
    }

    /// Number of scheduled steps.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Scheduled sites in execution order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }
}
