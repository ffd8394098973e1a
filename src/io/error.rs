//! Error types and context management for solver operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::direction::Position;
use crate::spatial::grid::BoundingBox;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Socket label could not be parsed
    InvalidSocket {
        /// The offending label
        label: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Rotation or mirroring applied to a socket that cannot take it
    ///
    /// Raised while expanding tile definitions, before any solving.
    InvalidSocketTransform {
        /// Label of the socket
        socket: String,
        /// Transform that was attempted
        operation: &'static str,
    },

    /// Tile definitions expanded to no variants
    EmptyTileset,

    /// Tile id outside the tileset
    InvalidTile {
        /// The invalid tile id
        tile: usize,
        /// Number of variants in the tileset
        tile_count: usize,
    },

    /// Position outside the solved volume
    OutOfBounds {
        /// Requested position
        position: Position,
        /// Minimum corner of the volume
        min: Position,
        /// Maximum corner of the volume
        max: Position,
    },

    /// Candidate removal broke a cell invariant
    ///
    /// Indicates a propagation bug or an invalid forced placement.
    ConstrainFailed {
        /// Cell being constrained
        position: Position,
        /// Tile that was being removed
        tile: usize,
        /// Which invariant failed
        reason: &'static str,
    },

    /// A cell ran out of possible tiles
    ///
    /// A property of the tileset and the partial assignment, not a bug; the
    /// run can be cleared and retried with another seed.
    Contradiction {
        /// Cell that would be left empty
        position: Position,
        /// Solver iteration when this occurred
        iteration: usize,
    },

    /// Every remaining candidate at the chosen cell weighs zero
    ZeroTotalWeight {
        /// Cell being collapsed
        position: Position,
        /// Solver iteration when this occurred
        iteration: usize,
    },

    /// Weight callback returned a negative or non-finite value
    InvalidWeight {
        /// Cell being collapsed
        position: Position,
        /// Tile that was weighed
        tile: usize,
        /// The returned weight
        weight: f64,
    },

    /// Propagation exceeded its step ceiling
    ///
    /// Usually points at cyclic or inconsistent compatibility data.
    PropagationRunaway {
        /// Seed position of the propagation
        position: Position,
        /// Solver iteration when this occurred
        iteration: usize,
        /// Pending positions when the ceiling was hit
        stack_size: usize,
    },

    /// The run already failed and must be cleared before continuing
    RunHalted {
        /// Solver iteration of the original failure
        iteration: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Scene file is not valid TOML for the expected layout
    SceneParse {
        /// Path of the scene file
        path: PathBuf,
        /// Underlying parse error
        source: Box<toml::de::Error>,
    },

    /// Result serialization failed
    Export {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },
}

impl AlgorithmError {
    /// Whether clearing and re-running with a new seed may succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Contradiction { .. } | Self::ZeroTotalWeight { .. }
        )
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSocket { label, reason } => {
                write!(f, "Invalid socket '{label}': {reason}")
            }
            Self::InvalidSocketTransform { socket, operation } => {
                write!(f, "Socket '{socket}' does not support {operation}")
            }
            Self::EmptyTileset => write!(f, "Tileset contains no tile variants"),
            Self::InvalidTile { tile, tile_count } => {
                write!(f, "Tile {tile} is out of bounds (tileset has {tile_count})")
            }
            Self::OutOfBounds { position, min, max } => {
                write!(f, "Position {position:?} is outside {min:?}..={max:?}")
            }
            Self::ConstrainFailed {
                position,
                tile,
                reason,
            } => {
                write!(f, "Failed to constrain tile {tile} at {position:?}: {reason}")
            }
            Self::Contradiction {
                position,
                iteration,
            } => {
                write!(
                    f,
                    "Contradiction at {position:?} in iteration {iteration}: no possible tiles"
                )
            }
            Self::ZeroTotalWeight {
                position,
                iteration,
            } => {
                write!(
                    f,
                    "All candidates at {position:?} weigh zero in iteration {iteration}"
                )
            }
            Self::InvalidWeight {
                position,
                tile,
                weight,
            } => {
                write!(
                    f,
                    "Weight {weight} for tile {tile} at {position:?} must be finite and non-negative"
                )
            }
            Self::PropagationRunaway {
                position,
                iteration,
                stack_size,
            } => {
                write!(
                    f,
                    "Propagation from {position:?} exceeded its step ceiling in iteration \
                     {iteration} (stack size {stack_size})"
                )
            }
            Self::RunHalted { iteration } => {
                write!(
                    f,
                    "Run halted after a failure in iteration {iteration}; clear before continuing"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::SceneParse { path, source } => {
                write!(f, "Failed to parse scene '{}': {source}", path.display())
            }
            Self::Export { path, source } => {
                write!(
                    f,
                    "Failed to export result to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::SceneParse { source, .. } => Some(source.as_ref()),
            Self::Export { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current solver iteration
    pub iteration: Option<usize>,
    /// World coordinates where error occurred
    pub position: Option<Position>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with solver state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the iteration context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only run-time failures carry an iteration
            match &mut error {
                AlgorithmError::Contradiction { iteration, .. }
                | AlgorithmError::ZeroTotalWeight { iteration, .. }
                | AlgorithmError::PropagationRunaway { iteration, .. } => {
                    if let Some(iter) = context.iteration {
                        *iteration = iter;
                    }
                }
                AlgorithmError::ConstrainFailed { position, .. } => {
                    if let Some(pos) = context.position {
                        *position = pos;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.with_context(ErrorContext {
            iteration: Some(iteration),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an out-of-bounds error for a position and volume
pub const fn out_of_bounds(position: Position, bounds: &BoundingBox) -> AlgorithmError {
    AlgorithmError::OutOfBounds {
        position,
        min: bounds.min,
        max: bounds.max,
    }
}
