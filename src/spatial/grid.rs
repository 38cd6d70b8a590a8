//! Grid coordinates and extents
//!
//! Positions are signed so that offsets and neighbor steps can leave the grid
//! and be rejected by a bounds check instead of wrapping. Extents are strictly
//! positive and bounded by `MAX_GRID_DIMENSION`.

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer grid coordinate, also used for subcell offsets relative to an origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct Position {
    /// X coordinate
    pub x: i32,
    /// Y coordinate (vertical)
    pub y: i32,
    /// Z coordinate
    pub z: i32,
}

impl Position {
    /// The origin `(0, 0, 0)`
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a position from its components
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise sum
    #[must_use]
    pub const fn offset_by(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Component-wise difference, giving the offset of `self` from `origin`
    #[must_use]
    pub const fn relative_to(self, origin: Self) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y, self.z - origin.z)
    }

    /// Neighbor across the given face
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let [dx, dy, dz] = direction.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl From<[i32; 3]> for Position {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Position> for [i32; 3] {
    fn from(position: Position) -> Self {
        [position.x, position.y, position.z]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Strictly positive 3-D extent of a grid or of a module footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[usize; 3]", into = "[usize; 3]")]
pub struct Dimensions {
    x: usize,
    y: usize,
    z: usize,
}

impl Dimensions {
    /// A single cell
    pub const UNIT: Self = Self { x: 1, y: 1, z: 1 };

    /// Create validated dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if any extent is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self> {
        for (parameter, value) in [("x", x), ("y", y), ("z", z)] {
            if value == 0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"extent must be positive",
                ));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("extent must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(Self { x, y, z })
    }

    /// Extent along x
    pub const fn x(self) -> usize {
        self.x
    }

    /// Extent along y
    pub const fn y(self) -> usize {
        self.y
    }

    /// Extent along z
    pub const fn z(self) -> usize {
        self.z
    }

    /// Shape tuple in `(x, y, z)` order for `ndarray` allocation
    pub const fn shape(self) -> (usize, usize, usize) {
        (self.x, self.y, self.z)
    }

    /// Total number of cells
    pub const fn cell_count(self) -> usize {
        self.x * self.y * self.z
    }

    /// The same extent with x and z exchanged (a quarter turn about Y)
    #[must_use]
    pub const fn swapped_xz(self) -> Self {
        Self {
            x: self.z,
            y: self.y,
            z: self.x,
        }
    }

    /// Whether a coordinate lies inside `[0, extent)` on every axis
    pub const fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.z >= 0
            && (position.x as usize) < self.x
            && (position.y as usize) < self.y
            && (position.z as usize) < self.z
    }

    /// Whether a box of `size` anchored at `origin` fits entirely inside
    pub const fn fits(self, origin: Position, size: Self) -> bool {
        origin.x >= 0
            && origin.y >= 0
            && origin.z >= 0
            && origin.x as usize + size.x <= self.x
            && origin.y as usize + size.y <= self.y
            && origin.z as usize + size.z <= self.z
    }

    /// `ndarray` index of an in-bounds coordinate
    pub const fn index_of(self, position: Position) -> Option<[usize; 3]> {
        if self.contains(position) {
            Some([
                position.x as usize,
                position.y as usize,
                position.z as usize,
            ])
        } else {
            None
        }
    }

    /// Every coordinate in x-major, then y, then z order
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.x).flat_map(move |x| {
            (0..self.y).flat_map(move |y| {
                (0..self.z).map(move |z| Position::new(x as i32, y as i32, z as i32))
            })
        })
    }
}

impl TryFrom<[usize; 3]> for Dimensions {
    type Error = crate::io::error::AlgorithmError;

    fn try_from([x, y, z]: [usize; 3]) -> Result<Self> {
        Self::new(x, y, z)
    }
}

impl From<Dimensions> for [usize; 3] {
    fn from(dimensions: Dimensions) -> Self {
        [dimensions.x, dimensions.y, dimensions.z]
    }
}

impl FromStr for Dimensions {
    type Err = crate::io::error::AlgorithmError;

    /// Parse `XxYxZ`, for example `10x3x10`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(['x', 'X']).collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(invalid_parameter(
                "size",
                &s,
                &"expected three extents separated by 'x'",
            ));
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| invalid_parameter("size", &s, &e))
        };
        Self::new(parse(*x)?, parse(*y)?, parse(*z)?)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
