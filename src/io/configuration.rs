//! Solver constants and runtime configuration defaults

/// Propagation pops allowed per call before giving up
pub const PROPAGATION_ITERATION_CEILING: usize = 100_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Whole-run attempts before reporting failure
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

// Scene conventions for layer seeding
/// Socket label of the open-air tile pinned to the top layer
pub const SKY_SOCKET: &str = "-1";
/// Socket label of the solid tile pinned to the bottom layer
pub const UNDERGROUND_SOCKET: &str = "-2";

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Extension of exported placement files
pub const OUTPUT_EXTENSION: &str = "json";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Per-solver runtime parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Seed of the solver's random stream
    pub seed: u64,
    /// Maximum positions processed by one propagation
    pub propagation_ceiling: usize,
}

impl SolverConfig {
    /// Default configuration with a specific seed
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            propagation_ceiling: PROPAGATION_ITERATION_CEILING,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}
