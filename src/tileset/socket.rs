//! Face-adjacency labels and the rules deciding which labels may touch
//!
//! Sockets are authored as short strings with prefix/suffix markers and parsed
//! once into a closed variant type, so compatibility, rotation and mirroring
//! are exhaustive matches rather than string surgery.

use crate::io::error::{AlgorithmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of distinct Y-axis orientations a vertical socket can carry
pub const ROTATION_STEPS: u8 = 4;

/// A label attached to one face of a tile
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Socket {
    /// Open space or boundary filler, written `-id`
    Void(String),
    /// Orientation-independent connector, written `ids`
    Symmetric(String),
    /// Y-face connector that turns with the tile, written `vid_N`
    Vertical {
        /// Connector name without markers
        id: String,
        /// Quarter-turn index in `0..4`
        rotation: u8,
    },
    /// Directional side connector, written `id` or `idf` when mirrored
    Horizontal {
        /// Connector name without markers
        id: String,
        /// Whether the trailing mirror marker is present
        mirrored: bool,
    },
}

impl Socket {
    /// Create a void socket
    pub fn void(id: impl Into<String>) -> Self {
        Self::Void(id.into())
    }

    /// Create a symmetric socket
    pub fn symmetric(id: impl Into<String>) -> Self {
        Self::Symmetric(id.into())
    }

    /// Create a vertical socket, wrapping the rotation into `0..4`
    pub fn vertical(id: impl Into<String>, rotation: u8) -> Self {
        Self::Vertical {
            id: id.into(),
            rotation: rotation % ROTATION_STEPS,
        }
    }

    /// Create an unmirrored horizontal socket
    pub fn horizontal(id: impl Into<String>) -> Self {
        Self::Horizontal {
            id: id.into(),
            mirrored: false,
        }
    }

    /// Test for the symmetric category
    pub const fn is_symmetric(&self) -> bool {
        matches!(self, Self::Symmetric(_))
    }

    /// Test for the vertical category
    pub const fn is_vertical(&self) -> bool {
        matches!(self, Self::Vertical { .. })
    }

    /// Test for the void category
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void(_))
    }

    /// Advance a vertical socket by `steps` quarter turns
    ///
    /// Void sockets have no orientation and come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSocketTransform` for symmetric and horizontal sockets
    pub fn rotate_vertical(&self, steps: u8) -> Result<Self> {
        match self {
            Self::Void(_) => Ok(self.clone()),
            Self::Vertical { id, rotation } => Ok(Self::Vertical {
                id: id.clone(),
                rotation: (rotation + steps % ROTATION_STEPS) % ROTATION_STEPS,
            }),
            Self::Symmetric(_) | Self::Horizontal { .. } => {
                Err(AlgorithmError::InvalidSocketTransform {
                    socket: self.to_string(),
                    operation: "vertical rotation",
                })
            }
        }
    }

    /// Toggle the mirror marker of a horizontal socket
    ///
    /// Void and symmetric sockets read the same from both sides and come back
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSocketTransform` for vertical sockets
    pub fn mirror_horizontal(&self) -> Result<Self> {
        match self {
            Self::Void(_) | Self::Symmetric(_) => Ok(self.clone()),
            Self::Horizontal { id, mirrored } => Ok(Self::Horizontal {
                id: id.clone(),
                mirrored: !mirrored,
            }),
            Self::Vertical { .. } => Err(AlgorithmError::InvalidSocketTransform {
                socket: self.to_string(),
                operation: "horizontal mirroring",
            }),
        }
    }

    /// Decide whether a face carrying `self` may touch a face carrying `other`
    ///
    /// Horizontal sockets pair with their mirrored counterpart only, so a wall
    /// front `w` meets a back `wf` but never another `w`.
    pub fn is_compatible(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Horizontal { id, mirrored },
                Self::Horizontal {
                    id: other_id,
                    mirrored: other_mirrored,
                },
            ) => id == other_id && mirrored != other_mirrored,
            (Self::Horizontal { .. }, _) => false,
            _ => self == other,
        }
    }
}

/// Free-function form of [`Socket::is_compatible`]
pub fn is_compatible(a: &Socket, b: &Socket) -> bool {
    a.is_compatible(b)
}

fn invalid(label: &str, reason: &'static str) -> AlgorithmError {
    AlgorithmError::InvalidSocket {
        label: label.to_string(),
        reason,
    }
}

impl FromStr for Socket {
    type Err = AlgorithmError;

    fn from_str(label: &str) -> Result<Self> {
        if label.is_empty() {
            return Err(invalid(label, "label is empty"));
        }

        if let Some(id) = label.strip_prefix('-') {
            if id.is_empty() {
                return Err(invalid(label, "void marker without an id"));
            }
            return Ok(Self::Void(id.to_string()));
        }

        if let Some(body) = label.strip_prefix('v') {
            let Some((id, rotation)) = body.rsplit_once('_') else {
                return Err(invalid(label, "vertical socket is missing its _N rotation"));
            };
            let rotation: u8 = rotation
                .parse()
                .map_err(|_parse_error| invalid(label, "rotation suffix is not a number"))?;
            if rotation >= ROTATION_STEPS {
                return Err(invalid(label, "rotation suffix must be between 0 and 3"));
            }
            return Ok(Self::Vertical {
                id: id.to_string(),
                rotation,
            });
        }

        if let Some(id) = label.strip_suffix('s') {
            return Ok(Self::Symmetric(id.to_string()));
        }

        if let Some(id) = label.strip_suffix('f') {
            return Ok(Self::Horizontal {
                id: id.to_string(),
                mirrored: true,
            });
        }

        Ok(Self::horizontal(label))
    }
}

impl TryFrom<String> for Socket {
    type Error = AlgorithmError;

    fn try_from(label: String) -> Result<Self> {
        label.parse()
    }
}

impl From<Socket> for String {
    fn from(socket: Socket) -> Self {
        socket.to_string()
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void(id) => write!(f, "-{id}"),
            Self::Symmetric(id) => write!(f, "{id}s"),
            Self::Vertical { id, rotation } => write!(f, "v{id}_{rotation}"),
            Self::Horizontal { id, mirrored } => {
                if *mirrored {
                    write!(f, "{id}f")
                } else {
                    write!(f, "{id}")
                }
            }
        }
    }
}
