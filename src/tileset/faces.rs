//! Six-face socket sets and their orientation transforms

use crate::io::error::Result;
use crate::spatial::direction::Direction;
use crate::tileset::socket::Socket;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One socket per face of a tile
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sockets {
    /// +X face
    pub x_pos: Socket,
    /// -X face
    pub x_neg: Socket,
    /// +Y face
    pub y_pos: Socket,
    /// -Y face
    pub y_neg: Socket,
    /// +Z face
    pub z_pos: Socket,
    /// -Z face
    pub z_neg: Socket,
}

impl Sockets {
    /// Use the same socket on all six faces
    pub fn uniform(socket: &Socket) -> Self {
        Self {
            x_pos: socket.clone(),
            x_neg: socket.clone(),
            y_pos: socket.clone(),
            y_neg: socket.clone(),
            z_pos: socket.clone(),
            z_neg: socket.clone(),
        }
    }

    /// Parse six labels given in `+X -X +Y -Y +Z -Z` order
    ///
    /// # Errors
    ///
    /// Returns `InvalidSocket` for the first malformed label
    pub fn parse(labels: [&str; 6]) -> Result<Self> {
        let [x_pos, x_neg, y_pos, y_neg, z_pos, z_neg] = labels;
        Ok(Self {
            x_pos: x_pos.parse()?,
            x_neg: x_neg.parse()?,
            y_pos: y_pos.parse()?,
            y_neg: y_neg.parse()?,
            z_pos: z_pos.parse()?,
            z_neg: z_neg.parse()?,
        })
    }

    /// Socket on the given face
    pub const fn face(&self, direction: Direction) -> &Socket {
        match direction {
            Direction::XPos => &self.x_pos,
            Direction::XNeg => &self.x_neg,
            Direction::YPos => &self.y_pos,
            Direction::YNeg => &self.y_neg,
            Direction::ZPos => &self.z_pos,
            Direction::ZNeg => &self.z_neg,
        }
    }

    /// Whether every face carries `socket`
    pub fn is_all(&self, socket: &Socket) -> bool {
        Direction::ALL
            .iter()
            .all(|&direction| self.face(direction) == socket)
    }

    /// One quarter turn about Y
    fn quarter_turn(&self) -> Result<Self> {
        Ok(Self {
            x_pos: self.z_pos.clone(),
            z_pos: self.x_neg.clone(),
            x_neg: self.z_neg.clone(),
            z_neg: self.x_pos.clone(),
            y_pos: self.y_pos.rotate_vertical(1)?,
            y_neg: self.y_neg.rotate_vertical(1)?,
        })
    }

    /// Rotate by `steps` quarter turns about Y
    ///
    /// Side faces are permuted cyclically and the Y faces advance their
    /// vertical rotation index in lockstep.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSocketTransform` when a Y face is neither vertical nor
    /// void and `steps` is not a multiple of four
    pub fn rotated(&self, steps: u8) -> Result<Self> {
        let mut rotated = self.clone();
        for _ in 0..steps % 4 {
            rotated = rotated.quarter_turn()?;
        }
        Ok(rotated)
    }

    /// Mirror along X, taking the Y faces from the author-supplied overrides
    ///
    /// # Errors
    ///
    /// Returns `InvalidSocketTransform` when a side face is vertical
    pub fn mirrored(&self, y_pos: &Socket, y_neg: &Socket) -> Result<Self> {
        Ok(Self {
            x_pos: self.x_neg.mirror_horizontal()?,
            x_neg: self.x_pos.mirror_horizontal()?,
            z_pos: self.z_pos.mirror_horizontal()?,
            z_neg: self.z_neg.mirror_horizontal()?,
            y_pos: y_pos.clone(),
            y_neg: y_neg.clone(),
        })
    }
}

impl fmt::Display for Sockets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.x_pos, self.x_neg, self.y_pos, self.y_neg, self.z_pos, self.z_neg
        )
    }
}
