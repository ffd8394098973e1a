//! Socket vocabulary, tile definitions and orientation expansion
//!
//! This module contains the authoring-side data model:
//! - Socket labels and their compatibility rules
//! - Six-face socket sets with rotation and mirroring
//! - Expansion of definitions into the concrete variants a solver places

/// Definition expansion into oriented variants
pub mod expansion;
/// Six-face socket sets
pub mod faces;
/// Socket labels and compatibility
pub mod socket;

pub use expansion::{MirrorOverride, TileDefinition, TileId, TileVariant, Tileset};
pub use faces::Sockets;
pub use socket::Socket;
