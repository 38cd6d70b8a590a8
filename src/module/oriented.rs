//! A module placed in the grid with a rotation and an optional mirror

use crate::connector::Connector;
use crate::module::definition::{FaceTable, ModuleDefinition};
use crate::module::library::ModuleId;
use crate::spatial::{Dimensions, Direction, Position};
use std::collections::BTreeMap;

/// Module instance anchored at a grid coordinate
///
/// The connector table is derived once from the definition: mirror first if
/// requested, then the given number of quarter turns about +Y. Two instances
/// compare equal only when every field matches, so each transform of a module
/// is a distinct candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrientedModule {
    module: ModuleId,
    position: Position,
    rotation: u8,
    flipped: bool,
    size: Dimensions,
    cells: BTreeMap<Position, FaceTable>,
}

impl OrientedModule {
    /// Orient `definition` and anchor its origin subcell at `position`
    pub fn new(
        module: ModuleId,
        definition: &ModuleDefinition,
        position: Position,
        rotation: u8,
        flipped: bool,
    ) -> Self {
        let mut oriented = Self {
            module,
            position,
            rotation: 0,
            flipped: false,
            size: definition.size(),
            cells: definition.cells().clone(),
        };
        if flipped {
            oriented = oriented.flip();
        }
        for _ in 0..rotation % 4 {
            oriented = oriented.rotate();
        }
        oriented
    }

    /// Quarter turn about +Y
    ///
    /// Offsets map `(x, y, z) → (z, y, size.x - 1 - x)` and the extent swaps x
    /// and z. Horizontal faces follow their subcells around the cycle
    /// `+Z → +X → -Z → -X → +Z`; vertical connectors advance their rotation class.
    #[must_use]
    pub fn rotate(&self) -> Self {
        let last_x = self.size.x() as i32 - 1;
        let cells = self
            .cells
            .iter()
            .map(|(offset, faces)| {
                let moved = Position::new(offset.z, offset.y, last_x - offset.x);
                let face = |direction: Direction| faces.get(direction.index()).copied().flatten();
                let rotated = [
                    face(Direction::PosZ),
                    face(Direction::PosY).map(Connector::rotated),
                    face(Direction::NegX),
                    face(Direction::NegZ),
                    face(Direction::NegY).map(Connector::rotated),
                    face(Direction::PosX),
                ];
                (moved, rotated)
            })
            .collect();

        Self {
            module: self.module,
            position: self.position,
            rotation: (self.rotation + 1) % 4,
            flipped: self.flipped,
            size: self.size.swapped_xz(),
            cells,
        }
    }

    /// Mirror across the YZ plane
    ///
    /// Offsets map `x → size.x - 1 - x`; the ±X faces trade places and every
    /// connector takes its mirrored form.
    #[must_use]
    pub fn flip(&self) -> Self {
        let last_x = self.size.x() as i32 - 1;
        let cells = self
            .cells
            .iter()
            .map(|(offset, faces)| {
                let moved = Position::new(last_x - offset.x, offset.y, offset.z);
                let face = |direction: Direction| {
                    faces
                        .get(direction.index())
                        .copied()
                        .flatten()
                        .map(Connector::mirrored)
                };
                let mirrored = [
                    face(Direction::NegX),
                    face(Direction::PosY),
                    face(Direction::PosZ),
                    face(Direction::PosX),
                    face(Direction::NegY),
                    face(Direction::NegZ),
                ];
                (moved, mirrored)
            })
            .collect();

        Self {
            module: self.module,
            position: self.position,
            rotation: self.rotation,
            flipped: !self.flipped,
            size: self.size,
            cells,
        }
    }

    /// Library id of the underlying definition
    pub const fn module(&self) -> ModuleId {
        self.module
    }

    /// Grid coordinate of the origin subcell
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Quarter turns applied, in `0..4`
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Whether the mirror was applied
    pub const fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Bounding box after the transform
    pub const fn size(&self) -> Dimensions {
        self.size
    }

    /// Transformed face tables keyed by offset
    pub const fn cells(&self) -> &BTreeMap<Position, FaceTable> {
        &self.cells
    }

    /// Occupied subcell offsets
    pub fn offsets(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.keys().copied()
    }

    /// Grid coordinates of the occupied subcells
    pub fn covered_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.keys().map(|offset| self.position.offset_by(*offset))
    }

    /// Connector on one face of the subcell at `offset`
    pub fn connector_at(&self, offset: Position, direction: Direction) -> Option<Connector> {
        self.cells
            .get(&offset)
            .and_then(|faces| faces.get(direction.index()).copied().flatten())
    }

    /// Connector on one face of the subcell covering grid coordinate `cell`
    pub fn connector_at_cell(&self, cell: Position, direction: Direction) -> Option<Connector> {
        self.connector_at(cell.relative_to(self.position), direction)
    }

    /// Whether the whole bounding box lies inside a grid of the given extent
    pub const fn fits(&self, grid: Dimensions) -> bool {
        grid.fits(self.position, self.size)
    }

    /// Same orientation anchored elsewhere
    #[must_use]
    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}
