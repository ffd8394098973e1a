//! Constraint propagation outward from a changed cell

use crate::algorithm::adjacency::AdjacencyTable;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Position;
use crate::spatial::grid::CellGrid;
use bitvec::prelude::*;

/// Pending positions with O(1) membership
///
/// Last in, first out. A position is queued at most once at a time.
struct PropagationStack {
    stack: Vec<Position>,
    queued: BitVec,
}

impl PropagationStack {
    fn new(volume: usize) -> Self {
        Self {
            stack: Vec::new(),
            queued: bitvec![0; volume],
        }
    }

    fn push(&mut self, grid: &CellGrid, position: Position) {
        let Some(index) = grid.linear_index(position) else {
            return;
        };
        if let Some(mut queued) = self.queued.get_mut(index) {
            if *queued {
                return;
            }
            *queued = true;
        }
        self.stack.push(position);
    }

    fn pop(&mut self, grid: &CellGrid) -> Option<Position> {
        let position = self.stack.pop()?;
        if let Some(index) = grid.linear_index(position)
            && let Some(mut queued) = self.queued.get_mut(index)
        {
            *queued = false;
        }
        Some(position)
    }

    const fn len(&self) -> usize {
        self.stack.len()
    }
}

/// Restore arc consistency around `origin`
///
/// Each popped position narrows every in-bounds neighbour to the union of
/// variants compatible with its own candidates; neighbours that shrink are
/// queued in turn. Returns the number of positions processed.
///
/// Errors carry iteration 0; the solver stamps the real iteration.
///
/// # Errors
///
/// - `Contradiction` if a neighbour would be left with no candidates. The
///   neighbour is left untouched.
/// - `PropagationRunaway` if more than `ceiling` positions are processed
/// - `OutOfBounds` if `origin` lies outside the grid
pub fn propagate(
    grid: &mut CellGrid,
    adjacency: &AdjacencyTable,
    origin: Position,
    ceiling: usize,
) -> Result<usize> {
    grid.cell(origin)?;

    let bounds = *grid.bounds();
    let mut pending = PropagationStack::new(bounds.volume());
    pending.push(grid, origin);

    let mut processed = 0;
    while let Some(position) = pending.pop(grid) {
        processed += 1;
        if processed > ceiling {
            return Err(AlgorithmError::PropagationRunaway {
                position: origin,
                iteration: 0,
                stack_size: pending.len() + 1,
            });
        }

        let possible = grid.cell(position)?.possible().clone();
        for (direction, neighbor) in bounds.neighbors(position) {
            let allowed = adjacency.allowed_neighbors(&possible, direction);

            let cell = grid.cell(neighbor)?;
            let removed = cell.possible().difference(&allowed);
            if removed.is_empty() {
                continue;
            }
            if removed.len() >= cell.entropy() {
                return Err(AlgorithmError::Contradiction {
                    position: neighbor,
                    iteration: 0,
                });
            }

            for tile in removed {
                grid.constrain_at(neighbor, tile)?;
            }
            pending.push(grid, neighbor);
        }
    }

    Ok(processed)
}
