//! Post-solve analysis of placed tiles

/// Tile usage counts
pub mod statistics;
