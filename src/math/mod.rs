//! Mathematical utilities for the solver

/// Weighted random draws
pub mod probability;
