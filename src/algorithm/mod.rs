/// Precomputed neighbour compatibility per variant and face
pub mod adjacency;
/// Efficient bitset implementation for tile candidate tracking
pub mod bitset;
/// Solver state machine and orchestration
pub mod executor;
/// Stack-driven constraint propagation
pub mod propagation;
/// Minimum-entropy observation and seeded randomness
pub mod selection;
