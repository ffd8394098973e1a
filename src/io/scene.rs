//! TOML scene files: tile definitions, weights, bounds and forced placements
//!
//! ```toml
//! seed_layers = true
//!
//! [bounds]
//! min = [0, 0, 0]
//! max = [7, 3, 7]
//!
//! [[tiles]]
//! model = "ground"
//! weight = 5.0
//! rotates = true
//! sockets = { x_pos = "g0s", x_neg = "g0s", y_pos = "-1", y_neg = "-2", z_pos = "g0s", z_neg = "g0s" }
//!
//! [[placements]]
//! position = [3, 1, 3]
//! model = "ground"
//! ```

use crate::algorithm::executor::WaveFunctionCollapse;
use crate::io::configuration::{SKY_SOCKET, UNDERGROUND_SOCKET};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::direction::Position;
use crate::spatial::grid::BoundingBox;
use crate::tileset::{MirrorOverride, Socket, Sockets, TileDefinition, TileId, TileVariant, Tileset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const fn default_weight() -> f64 {
    1.0
}

/// Inclusive corners of the solved volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneBounds {
    /// Minimum corner
    pub min: Position,
    /// Maximum corner
    pub max: Position,
}

/// One tile definition with its selection weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileEntry {
    /// Model handle, absent for empty space
    #[serde(default)]
    pub model: Option<String>,
    /// Faces of the unrotated tile
    pub sockets: Sockets,
    /// Generate quarter turns about Y
    #[serde(default)]
    pub rotates: bool,
    /// Y faces of the mirrored copy; presence enables mirroring
    #[serde(default)]
    pub mirror: Option<MirrorOverride>,
    /// Relative likelihood shared by every variant of this tile
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl TileEntry {
    /// The definition this entry describes
    pub fn definition(&self) -> TileDefinition {
        TileDefinition {
            model: self.model.clone(),
            sockets: self.sockets.clone(),
            rotates: self.rotates,
            mirror: self.mirror.clone(),
        }
    }
}

/// A variant pinned before solving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementEntry {
    /// Where to place it
    pub position: Position,
    /// Display name of the variant (model, or `void(..)`)
    pub model: String,
    /// Quarter turns about Y
    #[serde(default)]
    pub rotation: u8,
    /// Mirrored copy
    #[serde(default)]
    pub mirrored: bool,
}

/// Parsed scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Volume to solve; may be overridden on the command line
    #[serde(default)]
    pub bounds: Option<SceneBounds>,
    /// Pin the top layer to the all-sky tile and the bottom to underground
    #[serde(default)]
    pub seed_layers: bool,
    /// Tile definitions in id order
    pub tiles: Vec<TileEntry>,
    /// Forced placements applied after layer seeding
    #[serde(default)]
    pub placements: Vec<PlacementEntry>,
}

impl SceneFile {
    /// Read and parse a scene from disk
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read, `SceneParse` if it is
    /// not a valid scene, or `InvalidParameter` for a bad tile weight
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read scene",
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse scene text; `path` is only used in error messages
    ///
    /// # Errors
    ///
    /// Returns `SceneParse` for malformed TOML or `InvalidParameter` for a
    /// negative or non-finite tile weight
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let scene: Self = toml::from_str(text).map_err(|source| AlgorithmError::SceneParse {
            path: PathBuf::from(path),
            source: Box::new(source),
        })?;

        if let Some(entry) = scene
            .tiles
            .iter()
            .find(|entry| !entry.weight.is_finite() || entry.weight < 0.0)
        {
            return Err(invalid_parameter(
                "weight",
                &entry.weight,
                &"tile weights must be finite and non-negative",
            ));
        }

        debug!(
            tiles = scene.tiles.len(),
            placements = scene.placements.len(),
            "parsed scene"
        );
        Ok(scene)
    }

    /// Definitions in file order
    pub fn definitions(&self) -> Vec<TileDefinition> {
        self.tiles.iter().map(TileEntry::definition).collect()
    }

    /// Expand every definition into its variants
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileset` or `InvalidSocketTransform`
    pub fn tileset(&self) -> Result<Tileset> {
        Tileset::from_definitions(&self.definitions())
    }

    /// Weight of each definition, indexed like [`Self::tiles`]
    pub fn weights(&self) -> Vec<f64> {
        self.tiles.iter().map(|entry| entry.weight).collect()
    }

    /// Weight callback that looks up each variant's definition weight
    pub fn weight_callback(&self) -> impl Fn(Position, &TileVariant) -> f64 + 'static {
        let weights = self.weights();
        move |_, variant| weights.get(variant.definition()).copied().unwrap_or(0.0)
    }

    /// Volume declared in the file
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the corners are inverted
    pub fn bounding_box(&self) -> Result<Option<BoundingBox>> {
        self.bounds
            .map(|bounds| BoundingBox::new(bounds.min, bounds.max))
            .transpose()
    }

    /// Resolve every placement to a variant id
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a placement naming no variant
    pub fn resolve_placements(&self, tileset: &Tileset) -> Result<Vec<(Position, TileId)>> {
        self.placements
            .iter()
            .map(|placement| {
                tileset
                    .find_variant(&placement.model, placement.rotation, placement.mirrored)
                    .map(|tile| (placement.position, tile))
                    .ok_or_else(|| {
                        invalid_parameter(
                            "placements",
                            &format!(
                                "{} r{} m{}",
                                placement.model, placement.rotation, placement.mirrored
                            ),
                            &"no tile variant with this name and orientation",
                        )
                    })
            })
            .collect()
    }

    /// Seed layers and forced placements into a fresh or cleared solver
    ///
    /// Layer seeding is skipped for a layer whose uniform tile is missing.
    ///
    /// # Errors
    ///
    /// Any error of [`WaveFunctionCollapse::set_at`], or `InvalidParameter`
    /// for an unresolvable placement
    pub fn apply(&self, solver: &mut WaveFunctionCollapse) -> Result<()> {
        if self.seed_layers {
            let bounds = *solver.bounds();
            seed_layer(solver, SKY_SOCKET, bounds.max[1])?;
            if bounds.min[1] != bounds.max[1] {
                seed_layer(solver, UNDERGROUND_SOCKET, bounds.min[1])?;
            }
        }

        for (position, tile) in self.resolve_placements(solver.tileset())? {
            solver.set_at(position, tile)?;
        }
        Ok(())
    }
}

fn seed_layer(solver: &mut WaveFunctionCollapse, label: &str, y: i32) -> Result<()> {
    let socket: Socket = label.parse()?;
    match solver.tileset().find_uniform(&socket) {
        Some(tile) => {
            solver.fill_layer(y, tile)?;
        }
        None => warn!(socket = label, y, "no uniform tile for layer seeding"),
    }
    Ok(())
}
