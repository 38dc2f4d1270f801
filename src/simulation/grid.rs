use rand::Rng;

use crate::config::Boundary;

/// Lattice coordinate as (row, col)
pub type Site = (usize, usize);

/// Square binary lattice with clamped boundary rows.
///
/// Row 0 and row n-1 are written once at initialization and never touched
/// again; updates only ever target sites strictly inside the outermost ring.
/// Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    cells: Vec<bool>,
    side: usize,
}

impl Lattice {
    /// Draws an n x n lattice of i.i.d. Bernoulli(p) cells, then applies the
    /// boundary condition to the top and bottom rows.
    pub fn bernoulli<R: Rng + ?Sized>(
        side: usize,
        p: f64,
        boundary: Boundary,
        rng: &mut R,
    ) -> Self {
        let mut cells = Vec::with_capacity(side * side);
        for _ in 0..side * side {
            cells.push(rng.gen_bool(p));
        }

        let mut lattice = Self { cells, side };
        if let Boundary::Fixed(value) = boundary {
            for col in 0..side {
                lattice.set((0, col), value);
                lattice.set((side - 1, col), value);
            }
        }
        lattice
    }

    /// Side length of the lattice.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Value of the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.side + col]
    }

    fn set(&mut self, (row, col): Site, value: bool) {
        self.cells[row * self.side + col] = value;
    }

    /// Sum of the four axis neighbors of an interior site.
    pub fn neighbor_sum(&self, (row, col): Site) -> u8 {
        self.get(row - 1, col) as u8
            + self.get(row + 1, col) as u8
            + self.get(row, col - 1) as u8
            + self.get(row, col + 1) as u8
    }

    /// Applies the majority rule at one interior site, mutating exactly that
    /// cell: more than two live neighbors force it to 1, fewer than two force
    /// it to 0, and an exact tie is resolved by a fair coin flip.
    ///
    /// The site must be strictly inside the outermost ring.
    pub fn update_site<R: Rng + ?Sized>(&mut self, site: Site, rng: &mut R) {
        let value = match self.neighbor_sum(site) {
            3 | 4 => true,
            0 | 1 => false,
            _ => rng.gen_bool(0.5),
        };
        self.set(site, value);
    }

    /// Number of 1-valued cells over the given coordinate set. Full rescan,
    /// O(len) per call.
    pub fn count_ones(&self, sites: &[Site]) -> usize {
        sites.iter().filter(|&&(row, col)| self.get(row, col)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_lattice_dimensions() {
        let lattice = Lattice::bernoulli(100, 0.5, Boundary::Fixed(true), &mut rng());
        assert_eq!(lattice.side(), 100);
        assert_eq!(lattice.cells.len(), 10000);
    }

    #[test]
    fn test_boundary_rows_clamped() {
        for p in [0.0, 0.5, 1.0] {
            let lattice = Lattice::bernoulli(20, p, Boundary::Fixed(true), &mut rng());
            for col in 0..20 {
                assert!(lattice.get(0, col), "top boundary row must be 1");
                assert!(lattice.get(19, col), "bottom boundary row must be 1");
            }
        }
        let lattice = Lattice::bernoulli(20, 1.0, Boundary::Fixed(false), &mut rng());
        for col in 0..20 {
            assert!(!lattice.get(0, col), "top boundary row must be 0");
            assert!(!lattice.get(19, col), "bottom boundary row must be 0");
        }
    }

    #[test]
    fn test_random_boundary_keeps_draw() {
        // With p = 1 every cell, boundary rows included, keeps its draw of 1
        let lattice = Lattice::bernoulli(10, 1.0, Boundary::Random, &mut rng());
        assert_eq!(lattice.count_ones(&all_sites(10)), 100);
        // And with p = 0 nothing is forced up
        let lattice = Lattice::bernoulli(10, 0.0, Boundary::Random, &mut rng());
        assert_eq!(lattice.count_ones(&all_sites(10)), 0);
    }

    #[test]
    fn test_density_roughly_matches_p() {
        let lattice = Lattice::bernoulli(100, 0.5, Boundary::Random, &mut rng());
        let ones = lattice.count_ones(&all_sites(100));
        // 10000 draws at p = 0.5; allow a generous band
        assert!(ones > 4500 && ones < 5500, "got {} ones", ones);
    }

    #[test]
    fn test_update_rule_deterministic_cases() {
        let mut lattice = Lattice::bernoulli(5, 0.0, Boundary::Fixed(false), &mut rng());

        // Three live neighbors force the cell to 1
        lattice.set((1, 2), true);
        lattice.set((3, 2), true);
        lattice.set((2, 1), true);
        assert_eq!(lattice.neighbor_sum((2, 2)), 3);
        lattice.update_site((2, 2), &mut rng());
        assert!(lattice.get(2, 2));

        // One live neighbor forces it back to 0
        lattice.set((1, 2), false);
        lattice.set((3, 2), false);
        assert_eq!(lattice.neighbor_sum((2, 2)), 1);
        lattice.update_site((2, 2), &mut rng());
        assert!(!lattice.get(2, 2));

        // Zero and four are just as decisive
        lattice.set((2, 1), false);
        lattice.update_site((2, 2), &mut rng());
        assert!(!lattice.get(2, 2));
        for site in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            lattice.set(site, true);
        }
        lattice.update_site((2, 2), &mut rng());
        assert!(lattice.get(2, 2));
    }

    #[test]
    fn test_tie_break_is_a_fair_coin() {
        // Exactly two live neighbors: the cell value must come from the coin
        let mut lattice = Lattice::bernoulli(5, 0.0, Boundary::Fixed(false), &mut rng());
        lattice.set((1, 2), true);
        lattice.set((3, 2), true);
        assert_eq!(lattice.neighbor_sum((2, 2)), 2);

        let mut rng = rng();
        let trials = 10_000;
        let mut ones = 0;
        for _ in 0..trials {
            lattice.update_site((2, 2), &mut rng);
            if lattice.get(2, 2) {
                ones += 1;
            }
        }
        let share = ones as f64 / trials as f64;
        assert!(
            (share - 0.5).abs() < 0.03,
            "tie-break share was {}, expected ~0.5",
            share
        );
    }

    #[test]
    fn test_boundary_rows_survive_updates() {
        let mut lattice = Lattice::bernoulli(10, 0.5, Boundary::Fixed(true), &mut rng());
        let mut rng = rng();
        for _ in 0..1000 {
            let site = (rng.gen_range(1..=8), rng.gen_range(1..=8));
            lattice.update_site(site, &mut rng);
        }
        for col in 0..10 {
            assert!(lattice.get(0, col) && lattice.get(9, col));
        }
    }

    fn all_sites(side: usize) -> Vec<Site> {
        let mut sites = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                sites.push((row, col));
            }
        }
        sites
    }
}
