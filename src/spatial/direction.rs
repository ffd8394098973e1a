//! The six axis-aligned face directions of a grid cell

use std::fmt;

/// Integer grid coordinate `[x, y, z]`
pub type Position = [i32; 3];

/// One of the six faces of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// +X
    XPos,
    /// -X
    XNeg,
    /// +Y (up)
    YPos,
    /// -Y (down)
    YNeg,
    /// +Z (forward)
    ZPos,
    /// -Z (back)
    ZNeg,
}

impl Direction {
    /// Every direction, in face-table order
    pub const ALL: [Self; 6] = [
        Self::XPos,
        Self::XNeg,
        Self::YPos,
        Self::YNeg,
        Self::ZPos,
        Self::ZNeg,
    ];

    /// The face on the other side of the shared boundary
    pub const fn opposite(self) -> Self {
        match self {
            Self::XPos => Self::XNeg,
            Self::XNeg => Self::XPos,
            Self::YPos => Self::YNeg,
            Self::YNeg => Self::YPos,
            Self::ZPos => Self::ZNeg,
            Self::ZNeg => Self::ZPos,
        }
    }

    /// Unit step taken when moving through this face
    pub const fn offset(self) -> Position {
        match self {
            Self::XPos => [1, 0, 0],
            Self::XNeg => [-1, 0, 0],
            Self::YPos => [0, 1, 0],
            Self::YNeg => [0, -1, 0],
            Self::ZPos => [0, 0, 1],
            Self::ZNeg => [0, 0, -1],
        }
    }

    /// Slot of this direction in per-face tables
    pub const fn index(self) -> usize {
        match self {
            Self::XPos => 0,
            Self::XNeg => 1,
            Self::YPos => 2,
            Self::YNeg => 3,
            Self::ZPos => 4,
            Self::ZNeg => 5,
        }
    }

    /// Neighbouring coordinate through this face
    ///
    /// `None` when the step leaves the `i32` coordinate range.
    pub const fn step(self, position: Position) -> Option<Position> {
        let offset = self.offset();
        match (
            position[0].checked_add(offset[0]),
            position[1].checked_add(offset[1]),
            position[2].checked_add(offset[2]),
        ) {
            (Some(x), Some(y), Some(z)) => Some([x, y, z]),
            _ => None,
        }
    }

    /// Whether the face lies on the Y axis
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::YPos | Self::YNeg)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::XPos => "+X",
            Self::XNeg => "-X",
            Self::YPos => "+Y",
            Self::YNeg => "-Y",
            Self::ZPos => "+Z",
            Self::ZNeg => "-Z",
        };
        f.write_str(label)
    }
}
