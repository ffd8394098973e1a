use crate::tileset::TileId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over tile variant ids
///
/// Backs both cell superposition state and the per-direction adjacency lists.
/// Provides O(1) membership testing and word-wise set operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing all possible tiles
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset holding exactly one tile
    pub fn single(max_tiles: usize, tile: TileId) -> Self {
        let mut bitset = Self::new(max_tiles);
        bitset.insert(tile);
        bitset
    }

    /// Size of the id space this bitset covers
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Insert a tile id
    ///
    /// Ids outside the id space are ignored
    pub fn insert(&mut self, tile: TileId) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Remove a tile id, reporting whether it was present
    pub fn remove(&mut self, tile: TileId) -> bool {
        if self.contains(tile) {
            self.bits.set(tile, false);
            true
        } else {
            false
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Add every tile of another bitset in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Tiles present here but absent from `other`
    pub fn difference(&self, other: &Self) -> Vec<TileId> {
        self.iter().filter(|&tile| !other.contains(tile)).collect()
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The sole member when exactly one tile is present
    pub fn only(&self) -> Option<TileId> {
        if self.count() == 1 {
            self.bits.first_one()
        } else {
            None
        }
    }

    /// Iterate over present tile ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all tile ids as a vector
    pub fn to_vec(&self) -> Vec<TileId> {
        self.iter().collect()
    }

    /// Build from a list of ids
    pub fn from_ids(ids: &[TileId], max_tiles: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        for &tile in ids {
            bitset.insert(tile);
        }
        bitset
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
