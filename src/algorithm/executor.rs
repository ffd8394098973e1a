use crate::{
    algorithm::adjacency::AdjacencyTable,
    algorithm::propagation::propagate,
    algorithm::selection::{RandomSelector, select_position},
    io::configuration::SolverConfig,
    io::error::{AlgorithmError, Result, WithContext, invalid_parameter, out_of_bounds},
    spatial::direction::Position,
    spatial::grid::{BoundingBox, CellGrid},
    tileset::{TileId, TileVariant, Tileset},
};
use std::fmt;
use tracing::{debug, error, trace, warn};

/// Relative likelihood of placing a variant at a position
///
/// Must return a finite, non-negative value. Zero excludes the variant.
pub type WeightCallback = Box<dyn Fn(Position, &TileVariant) -> f64>;

/// Lifecycle of a solver run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// Grid at full entropy apart from forced placements
    Initialized,
    /// At least one observation has been made
    Solving,
    /// Every cell holds exactly one variant
    Collapsed,
    /// A cell ran out of candidates; clear before continuing
    Contradiction {
        /// The cell that would have been emptied
        position: Position,
    },
    /// Propagation ran away or an invariant broke; clear before continuing
    Failed,
}

impl SolverState {
    /// Whether observations may continue
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Initialized | Self::Solving)
    }
}

/// Result of scanning the grid for completion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollapseStatus {
    /// Every cell is collapsed
    AllCollapsed,
    /// Some cell still has several candidates
    StillOpen,
    /// The run hit a contradiction at this position
    Contradiction(Position),
}

/// One observation made by [`WaveFunctionCollapse::iterate`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementDecision {
    /// Cell that was collapsed
    pub position: Position,
    /// Variant it was collapsed to
    pub tile: TileId,
}

/// Socket-matching wave function collapse solver
///
/// Owns the cell grid exclusively. The adjacency table is derived once from
/// the tileset and never rebuilt, so [`clear`](Self::clear) is cheap.
pub struct WaveFunctionCollapse {
    tileset: Tileset,
    adjacency: AdjacencyTable,
    grid: CellGrid,
    config: SolverConfig,
    random_selector: RandomSelector,
    weight: WeightCallback,
    state: SolverState,
    iteration: usize,
}

impl fmt::Debug for WaveFunctionCollapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveFunctionCollapse")
            .field("tiles", &self.tileset.len())
            .field("bounds", self.grid.bounds())
            .field("config", &self.config)
            .field("state", &self.state)
            .field("iteration", &self.iteration)
            .finish_non_exhaustive()
    }
}

impl WaveFunctionCollapse {
    /// Build the adjacency table and a grid at full entropy
    ///
    /// # Errors
    ///
    /// - `EmptyTileset` if the tileset has no variants
    /// - `InvalidParameter` if the propagation ceiling is zero
    pub fn initialize(tileset: Tileset, bounds: BoundingBox, config: SolverConfig) -> Result<Self> {
        if tileset.is_empty() {
            return Err(AlgorithmError::EmptyTileset);
        }
        if config.propagation_ceiling == 0 {
            return Err(invalid_parameter(
                "propagation_ceiling",
                &config.propagation_ceiling,
                &"must be at least 1",
            ));
        }

        let adjacency = AdjacencyTable::build(&tileset);
        let grid = CellGrid::new(bounds, tileset.len());

        debug!(
            tiles = tileset.len(),
            cells = bounds.volume(),
            seed = config.seed,
            "initialized solver"
        );

        Ok(Self {
            tileset,
            adjacency,
            grid,
            config,
            random_selector: RandomSelector::new(config.seed),
            weight: Box::new(|_, _| 1.0),
            state: SolverState::Initialized,
            iteration: 0,
        })
    }

    /// Replace the weight callback, builder style
    #[must_use]
    pub fn with_weights(mut self, weight: impl Fn(Position, &TileVariant) -> f64 + 'static) -> Self {
        self.set_weights(weight);
        self
    }

    /// Replace the weight callback
    pub fn set_weights(&mut self, weight: impl Fn(Position, &TileVariant) -> f64 + 'static) {
        self.weight = Box::new(weight);
    }

    /// Restart the random stream, typically between runs
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.random_selector.reseed(seed);
    }

    /// Return every cell to full entropy and reset the run
    pub fn clear(&mut self) {
        self.grid.reset();
        self.state = SolverState::Initialized;
        self.iteration = 0;
        debug!("cleared solver grid");
    }

    /// Force `position` to `tile` and propagate the consequences
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` or `InvalidTile` for bad arguments; the run is unaffected
    /// - `ConstrainFailed` if earlier placements already ruled `tile` out at
    ///   `position`; the grid and the run are unaffected
    /// - `RunHalted` if the run already failed
    /// - `Contradiction` if the placement empties a neighbouring cell
    /// - `PropagationRunaway` if propagation does not settle
    pub fn set_at(&mut self, position: Position, tile: TileId) -> Result<()> {
        self.ensure_active()?;
        if tile >= self.tileset.len() {
            return Err(AlgorithmError::InvalidTile {
                tile,
                tile_count: self.tileset.len(),
            });
        }
        if !self.grid.cell(position)?.allows(tile) {
            return Err(AlgorithmError::ConstrainFailed {
                position,
                tile,
                reason: "tile is no longer possible here",
            });
        }

        self.grid.collapse_at(position, tile)?;
        trace!(?position, tile, "forced placement");
        self.propagate_from(position)
    }

    /// Force every cell of the horizontal layer `y` to `tile`
    ///
    /// Returns the number of cells placed.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` if `y` is outside the bounds
    /// - any error of [`set_at`](Self::set_at)
    pub fn fill_layer(&mut self, y: i32, tile: TileId) -> Result<usize> {
        let bounds = *self.grid.bounds();
        if y < bounds.min[1] || y > bounds.max[1] {
            return Err(out_of_bounds([bounds.min[0], y, bounds.min[2]], &bounds));
        }

        let mut placed = 0;
        for position in bounds.positions().filter(|position| position[1] == y) {
            self.set_at(position, tile)?;
            placed += 1;
        }
        debug!(y, tile, placed, "filled layer");
        Ok(placed)
    }

    /// Scan the grid for completion
    pub fn status(&self) -> CollapseStatus {
        if let SolverState::Contradiction { position } = self.state {
            return CollapseStatus::Contradiction(position);
        }

        let mut all_collapsed = true;
        for (position, cell) in self.grid.iter() {
            match cell.entropy() {
                0 => return CollapseStatus::Contradiction(position),
                1 => {}
                _ => all_collapsed = false,
            }
        }

        if all_collapsed {
            CollapseStatus::AllCollapsed
        } else {
            CollapseStatus::StillOpen
        }
    }

    /// Whether every cell holds exactly one variant
    pub fn is_collapsed(&self) -> bool {
        self.status() == CollapseStatus::AllCollapsed
    }

    /// Collapse the lowest-entropy cell and propagate
    ///
    /// Returns `None` once nothing is left to observe.
    ///
    /// # Errors
    ///
    /// - `RunHalted` if the run already failed
    /// - `ZeroTotalWeight` if every candidate at the chosen cell weighs zero
    /// - `InvalidWeight` if the weight callback returns a negative or
    ///   non-finite value
    /// - `Contradiction` or `PropagationRunaway` from propagation
    pub fn iterate(&mut self) -> Result<Option<PlacementDecision>> {
        self.ensure_active()?;

        let Some(position) = select_position(&self.grid, &mut self.random_selector) else {
            self.state = SolverState::Collapsed;
            return Ok(None);
        };

        self.iteration += 1;
        self.state = SolverState::Solving;

        let tile = match self.choose_tile(position) {
            Ok(tile) => tile,
            Err(error) => return Err(self.record_failure(error)),
        };

        self.grid.collapse_at(position, tile)?;
        trace!(iteration = self.iteration, ?position, tile, "collapsed cell");
        self.propagate_from(position)?;

        Ok(Some(PlacementDecision { position, tile }))
    }

    /// Iterate until every cell is collapsed
    ///
    /// Each iteration collapses one cell, so this performs at most one
    /// iteration per cell. Returns the iteration count.
    ///
    /// # Errors
    ///
    /// Any error of [`iterate`](Self::iterate)
    pub fn solve(&mut self) -> Result<usize> {
        while self.iterate()?.is_some() {}
        debug!(iterations = self.iteration, "solve finished");
        Ok(self.iteration)
    }

    /// Resolved variant at `position`, `None` while uncollapsed
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the grid
    pub fn get_tile_at(&self, position: Position) -> Result<Option<&TileVariant>> {
        Ok(self
            .grid
            .tile_at(position)?
            .and_then(|tile| self.tileset.get(tile)))
    }

    /// Every position with its resolved variant
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Option<&TileVariant>)> + '_ {
        self.grid
            .iter()
            .map(|(position, cell)| (position, cell.tile().and_then(|tile| self.tileset.get(tile))))
    }

    /// The expanded variants
    pub const fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    /// Precomputed neighbour compatibility
    pub const fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }

    /// Read access to the cell grid
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// The solved volume
    pub const fn bounds(&self) -> &BoundingBox {
        self.grid.bounds()
    }

    /// Active configuration
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Current run state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Observations made since the last clear
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.grid.collapsed_count()
    }

    /// Whether any cell changed since the flag was last taken
    pub const fn is_dirty(&self) -> bool {
        self.grid.is_dirty()
    }

    /// Read and clear the dirty flag
    pub const fn take_dirty(&mut self) -> bool {
        self.grid.take_dirty()
    }

    const fn ensure_active(&self) -> Result<()> {
        match self.state {
            SolverState::Contradiction { .. } | SolverState::Failed => {
                Err(AlgorithmError::RunHalted {
                    iteration: self.iteration,
                })
            }
            _ => Ok(()),
        }
    }

    fn propagate_from(&mut self, position: Position) -> Result<()> {
        let result = propagate(
            &mut self.grid,
            &self.adjacency,
            position,
            self.config.propagation_ceiling,
        )
        .with_iteration(self.iteration);

        match result {
            Ok(processed) => {
                trace!(?position, processed, "propagated");
                Ok(())
            }
            Err(error) => Err(self.record_failure(error)),
        }
    }

    /// Weighted draw among the candidates at `position`
    fn choose_tile(&mut self, position: Position) -> Result<TileId> {
        let candidates = self.grid.cell(position)?.possible().to_vec();

        let mut weights = Vec::with_capacity(candidates.len());
        for &tile in &candidates {
            let weight = self
                .tileset
                .get(tile)
                .map_or(0.0, |variant| (self.weight)(position, variant));
            if !weight.is_finite() || weight < 0.0 {
                return Err(AlgorithmError::InvalidWeight {
                    position,
                    tile,
                    weight,
                });
            }
            weights.push(weight);
        }

        self.random_selector
            .weighted_choice(&weights)
            .and_then(|index| candidates.get(index).copied())
            .ok_or(AlgorithmError::ZeroTotalWeight {
                position,
                iteration: self.iteration,
            })
    }

    /// Move to a terminal state matching `error`
    fn record_failure(&mut self, error: AlgorithmError) -> AlgorithmError {
        match &error {
            AlgorithmError::Contradiction { position, .. } => {
                warn!(iteration = self.iteration, ?position, "contradiction");
                self.state = SolverState::Contradiction {
                    position: *position,
                };
            }
            AlgorithmError::ZeroTotalWeight { position, .. } => {
                warn!(iteration = self.iteration, ?position, "no weighted candidates");
                self.state = SolverState::Failed;
            }
            _ => {
                error!(iteration = self.iteration, %error, "solver failed");
                self.state = SolverState::Failed;
            }
        }
        error
    }
}
