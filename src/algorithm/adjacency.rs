use crate::algorithm::bitset::TileBitset;
use crate::spatial::direction::Direction;
use crate::tileset::{TileId, Tileset};

/// Precomputed legal neighbours of every variant along every face
///
/// Built once from a finished tileset and never mutated afterwards. Lookups
/// during propagation are a single index per variant and direction.
#[derive(Clone, Debug)]
pub struct AdjacencyTable {
    neighbors: Vec<[TileBitset; 6]>,
    tile_count: usize,
}

impl AdjacencyTable {
    /// Compare every pair of variants on every face
    ///
    /// Variant `w` may sit on face `d` of variant `v` when `v`'s socket on `d`
    /// is compatible with `w`'s socket on the opposite face.
    pub fn build(tileset: &Tileset) -> Self {
        let tile_count = tileset.len();
        let variants = tileset.variants();

        let neighbors = variants
            .iter()
            .map(|variant| {
                Direction::ALL.map(|direction| {
                    let face = variant.sockets().face(direction);
                    let compatible: Vec<TileId> = variants
                        .iter()
                        .enumerate()
                        .filter(|(_, candidate)| {
                            face.is_compatible(candidate.sockets().face(direction.opposite()))
                        })
                        .map(|(candidate_id, _)| candidate_id)
                        .collect();
                    TileBitset::from_ids(&compatible, tile_count)
                })
            })
            .collect();

        Self {
            neighbors,
            tile_count,
        }
    }

    /// Number of variants covered
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Variants allowed on face `direction` of `tile`
    pub fn neighbors(&self, tile: TileId, direction: Direction) -> Option<&TileBitset> {
        self.neighbors
            .get(tile)
            .and_then(|faces| faces.get(direction.index()))
    }

    /// Neighbour ids of `tile` on face `direction`, empty for unknown ids
    pub fn neighbor_ids(&self, tile: TileId, direction: Direction) -> Vec<TileId> {
        self.neighbors(tile, direction)
            .map(TileBitset::to_vec)
            .unwrap_or_default()
    }

    /// Union of the neighbours of every tile in `possible` along `direction`
    ///
    /// This is the set a neighbouring cell must stay within.
    pub fn allowed_neighbors(&self, possible: &TileBitset, direction: Direction) -> TileBitset {
        let mut allowed = TileBitset::new(self.tile_count);
        for tile in possible.iter() {
            if let Some(compatible) = self.neighbors(tile, direction) {
                allowed.union_with(compatible);
            }
        }
        allowed
    }
}
