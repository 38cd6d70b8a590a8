//! The six axis-aligned face directions of a grid cell

use serde::{Deserialize, Serialize};
use std::fmt;

/// Face direction of a cell, in the fixed order used by connector tables
///
/// The discriminant is the index into a `[_; 6]` face array, so the opposite
/// face is always three slots away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Towards increasing x
    #[serde(rename = "+X")]
    PosX = 0,
    /// Towards increasing y (up)
    #[serde(rename = "+Y")]
    PosY = 1,
    /// Towards increasing z
    #[serde(rename = "+Z")]
    PosZ = 2,
    /// Towards decreasing x
    #[serde(rename = "-X")]
    NegX = 3,
    /// Towards decreasing y (down)
    #[serde(rename = "-Y")]
    NegY = 4,
    /// Towards decreasing z
    #[serde(rename = "-Z")]
    NegZ = 5,
}

impl Direction {
    /// All directions in face-array order
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::PosY,
        Self::PosZ,
        Self::NegX,
        Self::NegY,
        Self::NegZ,
    ];

    /// The four directions lying in the horizontal plane
    pub const HORIZONTAL: [Self; 4] = [Self::PosX, Self::PosZ, Self::NegX, Self::NegZ];

    /// Index into a face array
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a face-array index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::PosX),
            1 => Some(Self::PosY),
            2 => Some(Self::PosZ),
            3 => Some(Self::NegX),
            4 => Some(Self::NegY),
            5 => Some(Self::NegZ),
            _ => None,
        }
    }

    /// The face pointing the other way
    pub const fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::PosY => Self::NegY,
            Self::PosZ => Self::NegZ,
            Self::NegX => Self::PosX,
            Self::NegY => Self::PosY,
            Self::NegZ => Self::PosZ,
        }
    }

    /// Unit step `[dx, dy, dz]` to the neighbor across this face
    pub const fn offset(self) -> [i32; 3] {
        match self {
            Self::PosX => [1, 0, 0],
            Self::PosY => [0, 1, 0],
            Self::PosZ => [0, 0, 1],
            Self::NegX => [-1, 0, 0],
            Self::NegY => [0, -1, 0],
            Self::NegZ => [0, 0, -1],
        }
    }

    /// Whether this face carries vertical connectors (±Y)
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::PosY | Self::NegY)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PosX => "+X",
            Self::PosY => "+Y",
            Self::PosZ => "+Z",
            Self::NegX => "-X",
            Self::NegY => "-Y",
            Self::NegZ => "-Z",
        };
        f.write_str(label)
    }
}
