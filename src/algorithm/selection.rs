//! Observation: which cell to collapse next and to which variant

use crate::math::probability::roulette_index;
use crate::spatial::direction::Position;
use crate::spatial::grid::CellGrid;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Restart the stream from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Uniform sample in `[0, 1)`
    pub fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform index below `len`, `None` for an empty range
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.random_range(0..len))
        }
    }

    /// Generic weighted random selection
    ///
    /// Returns an index into `weights`, or `None` if no weight is positive
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let draw = self.draw();
        roulette_index(weights, draw)
    }
}

/// Uncollapsed positions sharing the smallest entropy
///
/// Collapsed cells are skipped. Empty when every cell is collapsed.
pub fn minimum_entropy_positions(grid: &CellGrid) -> Vec<Position> {
    let mut best = usize::MAX;
    let mut positions = Vec::new();

    for (position, cell) in grid.iter() {
        let entropy = cell.entropy();
        if entropy <= 1 {
            continue;
        }
        if entropy < best {
            best = entropy;
            positions.clear();
        }
        if entropy == best {
            positions.push(position);
        }
    }

    positions
}

/// Next position to observe, ties broken uniformly at random
pub fn select_position(grid: &CellGrid, selector: &mut RandomSelector) -> Option<Position> {
    let candidates = minimum_entropy_positions(grid);
    selector
        .pick_index(candidates.len())
        .and_then(|index| candidates.get(index).copied())
}
