//! Tests for the precomputed neighbour compatibility table

#[cfg(test)]
mod tests {
    use socketwfc::algorithm::adjacency::AdjacencyTable;
    use socketwfc::algorithm::bitset::TileBitset;
    use socketwfc::spatial::Direction;
    use socketwfc::tileset::{Sockets, TileDefinition, Tileset};

    fn definition(labels: [&str; 6]) -> TileDefinition {
        TileDefinition::new(None, Sockets::parse(labels).unwrap())
    }

    // Wall faces `w` on +X, its back `wf` on -X; floor is symmetric all round
    fn tileset() -> Tileset {
        Tileset::from_definitions(&[
            definition(["w", "wf", "-1", "-1", "-1", "-1"]),
            definition(["g0s", "g0s", "-1", "-1", "-1", "-1"]),
            definition(["wf", "w", "-1", "-1", "-1", "-1"]),
        ])
        .unwrap()
    }

    // Tests neighbours follow socket matching on facing faces
    // Verified by comparing both tiles on the same face
    #[test]
    fn test_neighbors_follow_facing_sockets() {
        let table = AdjacencyTable::build(&tileset());
        assert_eq!(table.tile_count(), 3);

        // +X face `w` needs a -X face `wf`
        assert_eq!(table.neighbor_ids(0, Direction::XPos), vec![0]);
        assert_eq!(table.neighbor_ids(0, Direction::XNeg), vec![0]);
        assert_eq!(table.neighbor_ids(1, Direction::XPos), vec![1]);
        assert_eq!(table.neighbor_ids(2, Direction::XPos), vec![2]);
        assert_eq!(table.neighbor_ids(1, Direction::YPos), vec![0, 1, 2]);
    }

    // Tests adjacency is mutual across opposite faces
    // Verified by building only the +X table
    #[test]
    fn test_adjacency_is_mutual() {
        let table = AdjacencyTable::build(&tileset());
        for a in 0..3 {
            for b in 0..3 {
                for direction in Direction::ALL {
                    let forward = table.neighbors(a, direction).unwrap().contains(b);
                    let backward = table.neighbors(b, direction.opposite()).unwrap().contains(a);
                    assert_eq!(forward, backward);
                }
            }
        }
    }

    // Tests the allowed set is the union over every candidate
    // Verified by intersecting instead of uniting
    #[test]
    fn test_allowed_neighbors_union() {
        let table = AdjacencyTable::build(&tileset());
        let possible = TileBitset::from_ids(&[0, 1], 3);
        let allowed = table.allowed_neighbors(&possible, Direction::XPos);
        assert_eq!(allowed.to_vec(), vec![0, 1]);

        let none = table.allowed_neighbors(&TileBitset::new(3), Direction::XPos);
        assert!(none.is_empty());
    }

    // Tests unknown ids yield nothing
    // Verified by indexing the table directly
    #[test]
    fn test_unknown_tile() {
        let table = AdjacencyTable::build(&tileset());
        assert!(table.neighbors(3, Direction::XPos).is_none());
        assert!(table.neighbor_ids(3, Direction::XPos).is_empty());
    }
}
