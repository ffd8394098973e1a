//! Spatial data structures for the solved volume
//!
//! This module contains spatial-related functionality including:
//! - Face directions and integer positions
//! - Per-position superposition cells
//! - The dense cell grid over an inclusive bounding box

/// Per-position superposition state
pub mod cell;
/// Face directions and coordinate steps
pub mod direction;
/// Bounding boxes and the dense cell grid
pub mod grid;

pub use cell::Cell;
pub use direction::{Direction, Position};
pub use grid::{BoundingBox, CellGrid};
