//! Dense cell storage over an inclusive 3D bounding box
//!
//! Cells live in a single `ndarray` volume indexed from the box minimum, so
//! every lookup is an offset subtraction rather than a map probe. The grid is
//! owned by the solver; collaborators only read resolved tiles.

use ndarray::Array3;

use crate::io::error::{AlgorithmError, Result, invalid_parameter, out_of_bounds};
use crate::spatial::cell::Cell;
use crate::spatial::direction::{Direction, Position};
use crate::tileset::TileId;

/// Axis-aligned bounding box with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Minimum coordinates (inclusive)
    pub min: Position,
    /// Maximum coordinates (inclusive)
    pub max: Position,
}

impl BoundingBox {
    /// Create a box, rejecting inverted corners
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `min` exceeds `max` on any axis, or if
    /// the cell count does not fit in `usize`
    pub fn new(min: Position, max: Position) -> Result<Self> {
        if min.iter().zip(max.iter()).any(|(low, high)| low > high) {
            return Err(invalid_parameter(
                "bounds",
                &format!("{min:?}..={max:?}"),
                &"minimum corner exceeds maximum corner",
            ));
        }

        let volume = min.iter().zip(max.iter()).try_fold(1_usize, |cells, (&low, &high)| {
            usize::try_from(high.abs_diff(low))
                .ok()
                .and_then(|span| span.checked_add(1))
                .and_then(|extent| cells.checked_mul(extent))
        });
        if volume.is_none() {
            return Err(invalid_parameter(
                "bounds",
                &format!("{min:?}..={max:?}"),
                &"cell count overflows",
            ));
        }

        Ok(Self { min, max })
    }

    /// Box spanning `[0, 0, 0]` to `[width - 1, height - 1, depth - 1]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any extent is zero or past `i32::MAX`
    pub fn from_extent(width: u32, height: u32, depth: u32) -> Result<Self> {
        let last = |extent: u32| {
            i32::try_from(extent)
                .map(|signed| signed - 1)
                .map_err(|_overflow| {
                    invalid_parameter("extent", &extent, &"exceeds the coordinate range")
                })
        };
        Self::new([0, 0, 0], [last(width)?, last(height)?, last(depth)?])
    }

    /// Check if a position is within the bounds
    pub const fn contains(&self, pos: Position) -> bool {
        pos[0] >= self.min[0]
            && pos[0] <= self.max[0]
            && pos[1] >= self.min[1]
            && pos[1] <= self.max[1]
            && pos[2] >= self.min[2]
            && pos[2] <= self.max[2]
    }

    /// Cells along each axis
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        (
            self.max[0].abs_diff(self.min[0]) as usize + 1,
            self.max[1].abs_diff(self.min[1]) as usize + 1,
            self.max[2].abs_diff(self.min[2]) as usize + 1,
        )
    }

    /// Total number of cells
    pub const fn volume(&self) -> usize {
        let (width, height, depth) = self.dimensions();
        width.saturating_mul(height).saturating_mul(depth)
    }

    /// Every position, x-major then y then z
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let Self { min, max } = *self;
        (min[0]..=max[0]).flat_map(move |x| {
            (min[1]..=max[1]).flat_map(move |y| (min[2]..=max[2]).map(move |z| [x, y, z]))
        })
    }

    /// In-box neighbours of `pos` with the face leading to each
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = (Direction, Position)> + use<> {
        let bounds = *self;
        Direction::ALL.into_iter().filter_map(move |direction| {
            direction
                .step(pos)
                .filter(|&neighbor| bounds.contains(neighbor))
                .map(|neighbor| (direction, neighbor))
        })
    }

    /// Directions whose neighbour is still inside the box
    pub fn valid_directions(&self, pos: Position) -> impl Iterator<Item = Direction> + use<> {
        self.neighbors(pos).map(|(direction, _)| direction)
    }

    /// Sum of the outward unit vectors of every box face `pos` lies on
    ///
    /// Zero for interior positions; corners combine several faces.
    pub fn border_direction(&self, pos: Position) -> Position {
        let mut direction = [0, 0, 0];
        for (((slot, coordinate), low), high) in direction
            .iter_mut()
            .zip(pos)
            .zip(self.min)
            .zip(self.max)
        {
            if coordinate == low {
                *slot -= 1;
            }
            if coordinate == high {
                *slot += 1;
            }
        }
        direction
    }

    /// Whether `pos` lies on the outer shell of the box
    pub fn is_border(&self, pos: Position) -> bool {
        let direction = self.border_direction(pos);
        direction[0] != 0 || direction[1] != 0 || direction[2] != 0
    }

    /// Convert a world position into array indices
    const fn local_index(&self, pos: Position) -> Option<[usize; 3]> {
        if !self.contains(pos) {
            return None;
        }
        Some([
            pos[0].abs_diff(self.min[0]) as usize,
            pos[1].abs_diff(self.min[1]) as usize,
            pos[2].abs_diff(self.min[2]) as usize,
        ])
    }
}

/// Superposition state for every position in a bounding box
#[derive(Debug, Clone)]
pub struct CellGrid {
    bounds: BoundingBox,
    cells: Array3<Cell>,
    tile_count: usize,
    dirty: bool,
}

impl CellGrid {
    /// Allocate every cell at full entropy
    pub fn new(bounds: BoundingBox, tile_count: usize) -> Self {
        let cells = Array3::from_shape_fn(bounds.dimensions(), |_| Cell::new(tile_count));
        Self {
            bounds,
            cells,
            tile_count,
            dirty: true,
        }
    }

    /// The solved volume
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Size of each cell's candidate set
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Linear slot of a position, for per-cell side tables
    pub fn linear_index(&self, pos: Position) -> Option<usize> {
        let [x, y, z] = self.bounds.local_index(pos)?;
        let (_, height, depth) = self.bounds.dimensions();
        Some((x * height + y) * depth + z)
    }

    /// Cell at `pos`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the box
    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        self.bounds
            .local_index(pos)
            .and_then(|index| self.cells.get(index))
            .ok_or_else(|| out_of_bounds(pos, &self.bounds))
    }

    fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell> {
        let bounds = self.bounds;
        bounds
            .local_index(pos)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or_else(|| out_of_bounds(pos, &bounds))
    }

    /// Resolved variant at `pos`, `None` while uncollapsed
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the box
    pub fn tile_at(&self, pos: Position) -> Result<Option<TileId>> {
        Ok(self.cell(pos)?.tile())
    }

    /// Force the cell at `pos` to a single variant
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` or `InvalidTile`
    pub fn collapse_at(&mut self, pos: Position, tile: TileId) -> Result<()> {
        self.cell_mut(pos)?.collapse_to(tile)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove one candidate from the cell at `pos`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds`, or `ConstrainFailed` stamped with `pos`
    pub fn constrain_at(&mut self, pos: Position, tile: TileId) -> Result<()> {
        self.cell_mut(pos)?.constrain(tile).map_err(|error| match error {
            AlgorithmError::ConstrainFailed { tile, reason, .. } => {
                AlgorithmError::ConstrainFailed {
                    position: pos,
                    tile,
                    reason,
                }
            }
            other => other,
        })?;
        self.dirty = true;
        Ok(())
    }

    /// Restore every cell to full entropy
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
        self.dirty = true;
    }

    /// Every position paired with its cell, in [`BoundingBox::positions`] order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let min = self.bounds.min;
        // Offsets never pass `max`, so the wrapped sum is the exact coordinate
        self.cells.indexed_iter().map(move |((x, y, z), cell)| {
            (
                [
                    min[0].wrapping_add(x as i32),
                    min[1].wrapping_add(y as i32),
                    min[2].wrapping_add(z as i32),
                ],
                cell,
            )
        })
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Whether any cell changed since the flag was last taken
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag
    pub const fn take_dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }
}
