//! Per-position superposition state

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};
use crate::tileset::TileId;

/// Still-possible tile variants at one grid position
///
/// The candidate space is every variant of the tileset. The possible set only
/// shrinks, except through [`Cell::reset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    possible: TileBitset,
}

impl Cell {
    /// Create a cell at full entropy
    pub fn new(tile_count: usize) -> Self {
        Self {
            possible: TileBitset::all(tile_count),
        }
    }

    /// Number of still-possible variants
    pub fn entropy(&self) -> usize {
        self.possible.count()
    }

    /// Exactly one variant remains
    pub fn is_collapsed(&self) -> bool {
        self.entropy() == 1
    }

    /// Resolved variant, only when collapsed
    pub fn tile(&self) -> Option<TileId> {
        self.possible.only()
    }

    /// Still-possible variants
    pub const fn possible(&self) -> &TileBitset {
        &self.possible
    }

    /// Whether `tile` is still possible here
    pub fn allows(&self, tile: TileId) -> bool {
        self.possible.contains(tile)
    }

    /// Narrow the cell to the single variant `tile`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTile` when `tile` is outside the full candidate set
    pub fn collapse_to(&mut self, tile: TileId) -> Result<()> {
        let tile_count = self.possible.capacity();
        if tile >= tile_count {
            return Err(AlgorithmError::InvalidTile { tile, tile_count });
        }
        self.possible = TileBitset::single(tile_count, tile);
        Ok(())
    }

    /// Remove `tile` from the possible set
    ///
    /// Callers must not use this to empty a cell; a removal that would leave
    /// nothing is a contradiction and is detected before constraining.
    ///
    /// # Errors
    ///
    /// Returns `ConstrainFailed` when the cell is already collapsed or `tile`
    /// was not possible. The position is filled in by the grid.
    pub fn constrain(&mut self, tile: TileId) -> Result<()> {
        if self.is_collapsed() {
            return Err(AlgorithmError::ConstrainFailed {
                position: [0, 0, 0],
                tile,
                reason: "cell is already collapsed",
            });
        }
        if !self.possible.remove(tile) {
            return Err(AlgorithmError::ConstrainFailed {
                position: [0, 0, 0],
                tile,
                reason: "tile was not possible",
            });
        }
        Ok(())
    }

    /// Restore the full candidate set
    pub fn reset(&mut self) {
        self.possible = TileBitset::all(self.possible.capacity());
    }
}
