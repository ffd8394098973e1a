//! Tile definitions and their expansion into concrete oriented variants
//!
//! A definition is what an author writes: one model, one socket set and the
//! symmetries it allows. Expansion produces every rotated and mirrored
//! orientation up front, so socket misuse is reported before any solving.

use crate::io::error::{AlgorithmError, Result};
use crate::tileset::faces::Sockets;
use crate::tileset::socket::{ROTATION_STEPS, Socket};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a variant inside its [`Tileset`]
pub type TileId = usize;

/// Y-face labels used by the mirrored copy of a tile
///
/// Mirroring has no general rule for vertical sockets, so the author states
/// them explicitly. Supplying an override is what enables mirroring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorOverride {
    /// +Y face of the mirrored variant
    pub y_pos: Socket,
    /// -Y face of the mirrored variant
    pub y_neg: Socket,
}

/// Authoring-time tile description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    /// Model handle, `None` for empty space
    #[serde(default)]
    pub model: Option<String>,
    /// Sockets of the unrotated, unmirrored tile
    pub sockets: Sockets,
    /// Generate the three other quarter turns about Y
    #[serde(default)]
    pub rotates: bool,
    /// Generate a copy mirrored along X
    #[serde(default)]
    pub mirror: Option<MirrorOverride>,
}

impl TileDefinition {
    /// Create a definition with no symmetries enabled
    pub const fn new(model: Option<String>, sockets: Sockets) -> Self {
        Self {
            model,
            sockets,
            rotates: false,
            mirror: None,
        }
    }

    /// Enable the Y-axis rotations
    #[must_use]
    pub const fn with_rotation(mut self) -> Self {
        self.rotates = true;
        self
    }

    /// Enable mirroring with the given Y-face overrides
    #[must_use]
    pub fn with_mirror(mut self, y_pos: Socket, y_neg: Socket) -> Self {
        self.mirror = Some(MirrorOverride { y_pos, y_neg });
        self
    }

    /// Number of variants [`Self::expand`] yields
    pub const fn variant_count(&self) -> usize {
        let orientations = if self.rotates { 4 } else { 1 };
        let mirrors = if self.mirror.is_some() { 2 } else { 1 };
        orientations * mirrors
    }

    /// Produce every concrete orientation of this tile
    ///
    /// Order: identity, its rotations, then the mirrored base and its
    /// rotations. `definition` is recorded on each variant.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSocketTransform` if rotation meets a Y face that is not
    /// vertical or void, or mirroring meets a vertical side face
    pub fn expand(&self, definition: usize) -> Result<Vec<TileVariant>> {
        let mut variants = Vec::with_capacity(self.variant_count());
        self.push_orientations(&self.sockets, false, definition, &mut variants)?;

        if let Some(overrides) = &self.mirror {
            let flipped = self.sockets.mirrored(&overrides.y_pos, &overrides.y_neg)?;
            self.push_orientations(&flipped, true, definition, &mut variants)?;
        }

        Ok(variants)
    }

    fn push_orientations(
        &self,
        base: &Sockets,
        mirrored: bool,
        definition: usize,
        variants: &mut Vec<TileVariant>,
    ) -> Result<()> {
        let rotations = if self.rotates { ROTATION_STEPS } else { 1 };
        for rotation in 0..rotations {
            variants.push(TileVariant {
                model: self.model.clone(),
                sockets: base.rotated(rotation)?,
                rotation,
                mirrored,
                definition,
            });
        }
        Ok(())
    }
}

/// One concrete, fully oriented tile the solver places
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileVariant {
    model: Option<String>,
    sockets: Sockets,
    rotation: u8,
    mirrored: bool,
    definition: usize,
}

impl TileVariant {
    /// Model handle, `None` for empty space
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Resolved sockets after rotation and mirroring
    pub const fn sockets(&self) -> &Sockets {
        &self.sockets
    }

    /// Quarter turns about Y, `0..4`
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Whether the variant is mirrored along X
    pub const fn mirrored(&self) -> bool {
        self.mirrored
    }

    /// Index of the definition this variant was expanded from
    pub const fn definition(&self) -> usize {
        self.definition
    }

    /// Y rotation a renderer applies, in degrees
    pub const fn rotation_degrees(&self) -> u16 {
        90 * self.rotation as u16
    }

    /// X scale a renderer applies
    pub const fn x_scale(&self) -> f32 {
        if self.mirrored { -1.0 } else { 1.0 }
    }

    /// Model name, or `void(<+X socket>)` for model-less tiles
    pub fn name(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| format!("void({})", self.sockets.x_pos))
    }
}

impl fmt::Display for TileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} r{}{} - {}",
            self.name(),
            self.rotation,
            if self.mirrored { " mirrored" } else { "" },
            self.sockets
        )
    }
}

/// Every concrete variant available to a solver run
#[derive(Clone, Debug, Default)]
pub struct Tileset {
    variants: Vec<TileVariant>,
}

impl Tileset {
    /// Expand all definitions in order
    ///
    /// # Errors
    ///
    /// Returns the first expansion error, or `EmptyTileset` when nothing was
    /// produced
    pub fn from_definitions(definitions: &[TileDefinition]) -> Result<Self> {
        let mut variants = Vec::new();
        for (index, definition) in definitions.iter().enumerate() {
            variants.extend(definition.expand(index)?);
        }

        if variants.is_empty() {
            return Err(AlgorithmError::EmptyTileset);
        }

        Ok(Self { variants })
    }

    /// All variants, indexed by [`TileId`]
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Variant with the given id
    pub fn get(&self, tile: TileId) -> Option<&TileVariant> {
        self.variants.get(tile)
    }

    /// Number of variants
    pub const fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the tileset holds no variants
    pub const fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// First variant whose six faces all carry `socket`
    pub fn find_uniform(&self, socket: &Socket) -> Option<TileId> {
        self.variants
            .iter()
            .position(|variant| variant.sockets.is_all(socket))
    }

    /// First variant with the given display name
    pub fn find_by_name(&self, name: &str) -> Option<TileId> {
        self.variants
            .iter()
            .position(|variant| variant.name() == name)
    }

    /// Variant with the given display name and orientation
    pub fn find_variant(&self, name: &str, rotation: u8, mirrored: bool) -> Option<TileId> {
        self.variants.iter().position(|variant| {
            variant.rotation == rotation && variant.mirrored == mirrored && variant.name() == name
        })
    }
}
