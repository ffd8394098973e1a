//! JSON export of resolved placements for a renderer

use crate::algorithm::executor::WaveFunctionCollapse;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Position;
use crate::tileset::TileVariant;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// One resolved cell as a renderer consumes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Grid position
    pub position: Position,
    /// Model handle, `None` for empty space
    pub model: Option<String>,
    /// Quarter turns about Y
    pub rotation: u8,
    /// Y rotation in degrees
    pub rotation_degrees: u16,
    /// Mirrored along X (render with X scale -1)
    pub mirrored: bool,
}

impl Placement {
    /// Render data of `variant` at `position`
    pub fn new(position: Position, variant: &TileVariant) -> Self {
        Self {
            position,
            model: variant.model().map(str::to_string),
            rotation: variant.rotation(),
            rotation_degrees: variant.rotation_degrees(),
            mirrored: variant.mirrored(),
        }
    }
}

/// Exported solve result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Seed of the successful run
    pub seed: u64,
    /// Minimum corner of the solved volume
    pub min: Position,
    /// Maximum corner of the solved volume
    pub max: Position,
    /// Resolved cells in x, y, z order
    pub placements: Vec<Placement>,
}

impl ExportDocument {
    /// Snapshot every resolved cell of a solver
    ///
    /// Cells holding empty space are included; uncollapsed cells are not.
    pub fn from_solver(solver: &WaveFunctionCollapse) -> Self {
        let bounds = solver.bounds();
        Self {
            seed: solver.config().seed,
            min: bounds.min,
            max: bounds.max,
            placements: solver
                .tiles()
                .filter_map(|(position, variant)| variant.map(|v| Placement::new(position, v)))
                .collect(),
        }
    }

    /// Write the document as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be created, or `Export` if
    /// serialization fails
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "create output",
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|source| {
            AlgorithmError::Export {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Read a previously exported document
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be opened, or `Export` if it is
    /// not a valid document
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "open export",
            source,
        })?;
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
            AlgorithmError::Export {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
