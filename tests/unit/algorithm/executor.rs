//! Tests for the solver state machine, forced placements and weighted observation

#[cfg(test)]
mod tests {
    use socketwfc::algorithm::executor::{CollapseStatus, SolverState, WaveFunctionCollapse};
    use socketwfc::io::configuration::SolverConfig;
    use socketwfc::spatial::{BoundingBox, Direction};
    use socketwfc::tileset::{Socket, Sockets, TileDefinition, Tileset};
    use socketwfc::AlgorithmError;

    fn definition(model: &str, labels: [&str; 6]) -> TileDefinition {
        TileDefinition::new(Some(model.to_string()), Sockets::parse(labels).unwrap())
    }

    // One tile per colour triple; colours must match along each axis, so no
    // partial assignment that propagation accepts can become unsatisfiable
    fn colours() -> Tileset {
        let mut definitions = Vec::new();
        for a in 0..2 {
            for b in 0..2 {
                for c in 0..2 {
                    let x = format!("x{a}s");
                    let y = format!("y{b}s");
                    let z = format!("z{c}s");
                    definitions.push(definition(
                        &format!("c{a}{b}{c}"),
                        [x.as_str(), x.as_str(), y.as_str(), y.as_str(), z.as_str(), z.as_str()],
                    ));
                }
            }
        }
        Tileset::from_definitions(&definitions).unwrap()
    }

    fn solver(tileset: Tileset, extent: [u32; 3], seed: u64) -> WaveFunctionCollapse {
        let [w, h, d] = extent;
        let bounds = BoundingBox::from_extent(w, h, d).unwrap();
        WaveFunctionCollapse::initialize(tileset, bounds, SolverConfig::with_seed(seed)).unwrap()
    }

    // Tests a fresh solver is open with no observations
    // Verified by starting the iteration counter at one
    #[test]
    fn test_initialize() {
        let wfc = solver(colours(), [2, 2, 2], 1);
        assert_eq!(wfc.state(), SolverState::Initialized);
        assert_eq!(wfc.status(), CollapseStatus::StillOpen);
        assert_eq!(wfc.iteration(), 0);
        assert_eq!(wfc.collapsed_count(), 0);
        assert_eq!(wfc.adjacency().tile_count(), 8);
        assert!(wfc.is_dirty());
    }

    // Tests a zero propagation ceiling is rejected
    // Verified by accepting any ceiling
    #[test]
    fn test_initialize_rejects_zero_ceiling() {
        let bounds = BoundingBox::from_extent(1, 1, 1).unwrap();
        let config = SolverConfig {
            seed: 0,
            propagation_ceiling: 0,
        };
        assert!(matches!(
            WaveFunctionCollapse::initialize(colours(), bounds, config),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
    }

    // Tests each iterate collapses at least one cell and the run terminates
    // Verified by not propagating after a collapse
    #[test]
    fn test_iterate_until_collapsed() {
        let mut wfc = solver(colours(), [3, 2, 3], 5);
        let volume = wfc.bounds().volume();

        let mut previous = 0;
        let mut calls = 0;
        while let Some(placement) = wfc.iterate().unwrap() {
            calls += 1;
            assert!(wfc.collapsed_count() > previous);
            previous = wfc.collapsed_count();
            assert!(wfc.get_tile_at(placement.position).unwrap().is_some());
        }

        assert!(calls <= volume);
        assert!(wfc.is_collapsed());
        assert_eq!(wfc.state(), SolverState::Collapsed);
        assert_eq!(wfc.iterate().unwrap(), None);
    }

    // Tests every adjacent pair of a solved grid has compatible facing sockets
    // Verified by skipping the -X face when building adjacency
    #[test]
    fn test_solved_grid_is_consistent() {
        let mut wfc = solver(colours(), [3, 3, 3], 9);
        wfc.solve().unwrap();

        let bounds = *wfc.bounds();
        for position in bounds.positions() {
            let tile = wfc.get_tile_at(position).unwrap().unwrap();
            for (direction, step) in bounds.neighbors(position) {
                let neighbor = wfc.get_tile_at(step).unwrap().unwrap();
                assert!(
                    tile.sockets()
                        .face(direction)
                        .is_compatible(neighbor.sockets().face(direction.opposite()))
                );
            }
        }
    }

    // Tests the same seed reproduces the same grid
    // Verified by reseeding the selector on every iterate
    #[test]
    fn test_seed_reproducibility() {
        let run = |seed| {
            let mut wfc = solver(colours(), [3, 2, 3], seed);
            wfc.solve().unwrap();
            wfc.tiles()
                .map(|(position, tile)| (position, tile.map(|t| t.name())))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(17), run(17));
    }

    // Tests forced placement propagates to neighbours
    // Verified by collapsing without propagating in set_at
    #[test]
    fn test_set_at_propagates() {
        let mut wfc = solver(colours(), [3, 1, 1], 0);
        let tile = wfc.tileset().find_by_name("c101").unwrap();
        wfc.set_at([0, 0, 0], tile).unwrap();

        // Only the x colour travels along the row
        assert_eq!(wfc.get_tile_at([0, 0, 0]).unwrap().unwrap().name(), "c101");
        for x in 1..3 {
            let cell = wfc.grid().cell([x, 0, 0]).unwrap();
            assert_eq!(cell.entropy(), 4);
            for id in cell.possible().iter() {
                assert!(wfc.tileset().get(id).unwrap().name().starts_with("c1"));
            }
        }
        assert_eq!(wfc.state(), SolverState::Initialized);
    }

    // Tests bad forced placements are rejected without halting the run
    // Verified by marking the run failed on argument errors
    #[test]
    fn test_set_at_argument_errors() {
        let mut wfc = solver(colours(), [2, 2, 2], 0);
        assert!(matches!(
            wfc.set_at([5, 0, 0], 0),
            Err(AlgorithmError::OutOfBounds { .. })
        ));
        assert!(matches!(
            wfc.set_at([0, 0, 0], 8),
            Err(AlgorithmError::InvalidTile { tile: 8, .. })
        ));
        assert_eq!(wfc.state(), SolverState::Initialized);
        assert!(wfc.iterate().is_ok());
    }

    // Tests a placement already ruled out is refused without touching the grid
    // Verified by collapsing the cell before checking its candidates
    #[test]
    fn test_set_at_rejects_eliminated_tile() {
        let tileset = Tileset::from_definitions(&[
            definition("a", ["-1", "-1", "ps", "qs", "-1", "-1"]),
            definition("b", ["-1", "-1", "qs", "ps", "-1", "-1"]),
        ])
        .unwrap();
        let mut wfc = solver(tileset, [1, 2, 1], 0);
        wfc.set_at([0, 0, 0], 0).unwrap();
        assert_eq!(wfc.get_tile_at([0, 1, 0]).unwrap().unwrap().name(), "b");

        let error = wfc.set_at([0, 1, 0], 0).unwrap_err();
        assert!(matches!(
            error,
            AlgorithmError::ConstrainFailed { position: [0, 1, 0], tile: 0, .. }
        ));
        assert!(!error.is_retryable());
        assert_eq!(wfc.get_tile_at([0, 1, 0]).unwrap().unwrap().name(), "b");
        assert_eq!(wfc.state(), SolverState::Initialized);
        assert_eq!(wfc.iterate().unwrap(), None);
    }

    // Tests a grid touching the coordinate limit propagates without overflow
    // Verified by stepping past i32::MAX during propagation
    #[test]
    fn test_set_at_on_coordinate_limit() {
        let bounds = BoundingBox::new([i32::MAX - 1, 0, 0], [i32::MAX, 0, 0]).unwrap();
        let mut wfc =
            WaveFunctionCollapse::initialize(colours(), bounds, SolverConfig::with_seed(0)).unwrap();
        let tile = wfc.tileset().find_by_name("c011").unwrap();
        wfc.set_at([i32::MAX, 0, 0], tile).unwrap();

        let cell = wfc.grid().cell([i32::MAX - 1, 0, 0]).unwrap();
        assert_eq!(cell.entropy(), 4);
        wfc.solve().unwrap();
        assert!(wfc.is_collapsed());
    }

    // Tests zero weights are never chosen
    // Verified by drawing uniformly and ignoring the weights
    #[test]
    fn test_zero_weight_tiles_never_placed() {
        for seed in 0..5 {
            let mut wfc = solver(colours(), [2, 2, 2], seed)
                .with_weights(|_, variant| if variant.name().starts_with("c0") { 0.0 } else { 1.0 });
            wfc.solve().unwrap();
            assert!(wfc
                .tiles()
                .all(|(_, tile)| tile.is_some_and(|t| t.name().starts_with("c1"))));
        }
    }

    // Tests a cell whose candidates all weigh zero is reported
    // Verified by falling back to the first candidate
    #[test]
    fn test_zero_total_weight() {
        let mut wfc = solver(colours(), [2, 1, 1], 0).with_weights(|_, _| 0.0);
        let error = wfc.iterate().unwrap_err();
        assert!(matches!(error, AlgorithmError::ZeroTotalWeight { iteration: 1, .. }));
        assert!(error.is_retryable());
        assert_eq!(wfc.state(), SolverState::Failed);
    }

    // Tests invalid weights are reported with the offending value
    // Verified by clamping negative weights to zero
    #[test]
    fn test_invalid_weight() {
        let mut wfc = solver(colours(), [2, 1, 1], 0);
        wfc.set_weights(|_, _| -1.0);
        assert!(matches!(
            wfc.iterate(),
            Err(AlgorithmError::InvalidWeight { weight, .. }) if (weight + 1.0).abs() < f64::EPSILON
        ));
    }

    // Tests a contradiction halts the run until clear
    // Verified by leaving the state active after a contradiction
    #[test]
    fn test_contradiction_halts_until_clear() {
        let tileset = Tileset::from_definitions(&[
            definition("a", ["a", "a", "a", "a", "a", "a"]),
            definition("b", ["b", "b", "b", "b", "b", "b"]),
        ])
        .unwrap();
        let mut wfc = solver(tileset, [2, 1, 1], 0);

        let error = wfc.iterate().unwrap_err();
        let AlgorithmError::Contradiction { position, iteration } = error else {
            unreachable!("expected Contradiction, got {error:?}");
        };
        assert_eq!(iteration, 1);
        assert_eq!(wfc.status(), CollapseStatus::Contradiction(position));
        assert!(!wfc.is_collapsed());
        assert!(matches!(wfc.iterate(), Err(AlgorithmError::RunHalted { .. })));

        wfc.clear();
        assert_eq!(wfc.state(), SolverState::Initialized);
        assert_eq!(wfc.status(), CollapseStatus::StillOpen);
        assert_eq!(wfc.iteration(), 0);
    }

    // Tests clear restores full entropy and marks the grid dirty
    // Verified by skipping the cell reset in clear
    #[test]
    fn test_clear_resets_grid() {
        let mut wfc = solver(colours(), [2, 2, 2], 4);
        wfc.solve().unwrap();
        assert!(wfc.take_dirty());
        assert!(!wfc.is_dirty());

        wfc.clear();
        assert!(wfc.is_dirty());
        assert_eq!(wfc.collapsed_count(), 0);
        assert!(wfc.tiles().all(|(_, tile)| tile.is_none()));
    }

    // Tests reseeding updates the configuration
    // Verified by reseeding only the selector
    #[test]
    fn test_reseed() {
        let mut wfc = solver(colours(), [1, 1, 1], 4);
        wfc.reseed(99);
        assert_eq!(wfc.config().seed, 99);
    }

    // Tests layer filling collapses exactly one horizontal slice
    // Verified by filling along Z instead of Y
    #[test]
    fn test_fill_layer() {
        let sky = TileDefinition::new(None, Sockets::uniform(&Socket::void("1")));
        let ground = TileDefinition::new(None, Sockets::uniform(&Socket::void("2")));
        let bridge = definition("bridge", ["-1", "-1", "-1", "-2", "-1", "-1"]);
        let tileset = Tileset::from_definitions(&[sky, ground, bridge]).unwrap();
        let mut wfc = solver(tileset, [2, 3, 2], 0);

        assert_eq!(wfc.fill_layer(2, 0).unwrap(), 4);
        for x in 0..2 {
            for z in 0..2 {
                assert_eq!(wfc.get_tile_at([x, 2, z]).unwrap().unwrap().name(), "void(-1)");
            }
        }
        assert!(matches!(
            wfc.fill_layer(3, 0),
            Err(AlgorithmError::OutOfBounds { .. })
        ));
    }

    // Tests the grid and tile listing agree with positions
    // Verified by enumerating tiles in z-major order
    #[test]
    fn test_tiles_follow_positions() {
        let wfc = solver(colours(), [2, 1, 2], 0);
        let positions: Vec<_> = wfc.tiles().map(|(position, _)| position).collect();
        let expected: Vec<_> = wfc.bounds().positions().collect();
        assert_eq!(positions, expected);
        assert_eq!(wfc.grid().tile_count(), 8);
        assert_eq!(Direction::ALL.len(), 6);
    }
}
