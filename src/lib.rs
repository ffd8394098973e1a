//! Socket-matching wave function collapse over 3D tile grids
//!
//! Tiles carry a socket label on each of their six faces. Definitions are
//! expanded into rotated and mirrored variants, a neighbour compatibility
//! table is derived from socket matching, and a seeded solver collapses a
//! bounded grid cell by cell with full constraint propagation.

#![forbid(unsafe_code)]

/// Solver core: adjacency, propagation, observation and orchestration
pub mod algorithm;
/// Post-solve tile usage analysis
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Weighted random draws
pub mod math;
/// Directions, cells and the bounded grid
pub mod spatial;
/// Sockets, tile definitions and variant expansion
pub mod tileset;

pub use algorithm::executor::{CollapseStatus, WaveFunctionCollapse};
pub use io::configuration::SolverConfig;
pub use io::error::{AlgorithmError, Result};
