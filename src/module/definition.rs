//! Immutable module definitions and their validating builder

use crate::algorithm::selection::RandomSelector;
use crate::connector::Connector;
use crate::io::error::{Result, invalid_module};
use crate::spatial::{Dimensions, Direction, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connector per face in `Direction` order; `None` marks an internal face
pub type FaceTable = [Option<Connector>; 6];

/// Face table with one connector on every horizontal face and another on both vertical faces
pub const fn uniform_faces(horizontal: Connector, vertical: Connector) -> FaceTable {
    [
        Some(horizontal),
        Some(vertical),
        Some(horizontal),
        Some(horizontal),
        Some(vertical),
        Some(horizontal),
    ]
}

/// Named visual variant a solved module may be instantiated as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawnable {
    /// Asset name handed to the instantiating collaborator
    pub name: String,
    /// Relative selection weight, non-negative
    #[serde(default = "default_weight")]
    pub weight: f64,
}

const fn default_weight() -> f64 {
    1.0
}

/// A placeable building block of one or more unit subcells
///
/// Only occupied subcells appear in the cell table. Every face of an occupied
/// subcell that borders an unoccupied offset carries a connector, and faces
/// shared by two occupied subcells carry none.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDefinition {
    name: String,
    size: Dimensions,
    cells: BTreeMap<Position, FaceTable>,
    symmetrical: bool,
    flippable: bool,
    ground_only: bool,
    empty: bool,
    spawnables: Vec<Spawnable>,
}

impl ModuleDefinition {
    /// Start building a module with the given name and bounding box
    pub fn builder(name: impl Into<String>, size: Dimensions) -> ModuleBuilder {
        ModuleBuilder {
            name: name.into(),
            size,
            cells: BTreeMap::new(),
            symmetrical: false,
            flippable: false,
            ground_only: false,
            empty: false,
            spawnables: Vec::new(),
        }
    }

    /// The designated empty module: one subcell with `EMPTY` on every face
    pub fn empty_space(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: Dimensions::UNIT,
            cells: BTreeMap::from([(
                Position::ORIGIN,
                uniform_faces(Connector::EMPTY_HORIZONTAL, Connector::EMPTY_VERTICAL),
            )]),
            symmetrical: true,
            flippable: false,
            ground_only: false,
            empty: true,
            spawnables: Vec::new(),
        }
    }

    /// Module name, unique within a library
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounding box in subcells
    pub const fn size(&self) -> Dimensions {
        self.size
    }

    /// Face tables of the occupied subcells keyed by offset
    pub const fn cells(&self) -> &BTreeMap<Position, FaceTable> {
        &self.cells
    }

    /// Connector on one face of one subcell
    pub fn connector_at(&self, offset: Position, direction: Direction) -> Option<Connector> {
        self.cells
            .get(&offset)
            .and_then(|faces| faces.get(direction.index()).copied().flatten())
    }

    /// Whether rotations of this module look identical (informational)
    pub const fn is_symmetrical(&self) -> bool {
        self.symmetrical
    }

    /// Whether the mirrored orientations take part in the solve
    pub const fn is_flippable(&self) -> bool {
        self.flippable
    }

    /// Whether the module may only be placed with its origin on the bottom layer
    pub const fn is_ground_only(&self) -> bool {
        self.ground_only
    }

    /// Whether this is the no-op module excluded from the solved output
    pub const fn is_empty(&self) -> bool {
        self.empty
    }

    /// Visual variants with their weights
    pub fn spawnables(&self) -> &[Spawnable] {
        &self.spawnables
    }

    /// Pick a visual variant by weight, or `None` when the module has none
    pub fn select_spawnable<R: Rng>(&self, selector: &mut RandomSelector<R>) -> Option<&Spawnable> {
        if self.spawnables.is_empty() {
            return None;
        }
        let weights: Vec<f64> = self.spawnables.iter().map(|s| s.weight).collect();
        self.spawnables.get(selector.weighted_choice(&weights))
    }
}

/// Collects the parts of a module and validates them on `build`
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    name: String,
    size: Dimensions,
    cells: BTreeMap<Position, FaceTable>,
    symmetrical: bool,
    flippable: bool,
    ground_only: bool,
    empty: bool,
    spawnables: Vec<Spawnable>,
}

impl ModuleBuilder {
    /// Add or replace the face table of an occupied subcell
    #[must_use]
    pub fn cell(mut self, offset: Position, faces: FaceTable) -> Self {
        self.cells.insert(offset, faces);
        self
    }

    /// Set one face, marking the subcell occupied if it is not yet
    #[must_use]
    pub fn face(mut self, offset: Position, direction: Direction, connector: Connector) -> Self {
        let faces = self.cells.entry(offset).or_insert([None; 6]);
        if let Some(slot) = faces.get_mut(direction.index()) {
            *slot = Some(connector);
        }
        self
    }

    /// Mark rotations as visually identical
    #[must_use]
    pub const fn symmetrical(mut self, value: bool) -> Self {
        self.symmetrical = value;
        self
    }

    /// Include mirrored orientations
    #[must_use]
    pub const fn flippable(mut self, value: bool) -> Self {
        self.flippable = value;
        self
    }

    /// Restrict the origin to the bottom layer
    #[must_use]
    pub const fn ground_only(mut self, value: bool) -> Self {
        self.ground_only = value;
        self
    }

    /// Mark as the empty module
    #[must_use]
    pub const fn empty(mut self, value: bool) -> Self {
        self.empty = value;
        self
    }

    /// Append a weighted visual variant
    #[must_use]
    pub fn spawnable(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.spawnables.push(Spawnable {
            name: name.into(),
            weight,
        });
        self
    }

    /// Validate and freeze the definition
    ///
    /// # Errors
    ///
    /// Returns `InvalidModule` if:
    /// - The name is empty or the module has no subcells
    /// - A subcell offset lies outside the bounding box
    /// - A boundary face lacks a connector, or an internal face has one
    /// - A connector of the wrong family sits on a face
    /// - A spawn weight is negative or not finite
    pub fn build(self) -> Result<ModuleDefinition> {
        let name = self.name.as_str();
        if name.trim().is_empty() {
            return Err(invalid_module(name, &"module name must not be empty"));
        }
        if self.cells.is_empty() {
            return Err(invalid_module(name, &"module has no occupied subcells"));
        }

        for (&offset, faces) in &self.cells {
            if !self.size.contains(offset) {
                return Err(invalid_module(
                    name,
                    &format!("subcell {offset} lies outside the {} bounding box", self.size),
                ));
            }
            for (direction, face) in Direction::ALL.iter().zip(faces) {
                let boundary = !self.cells.contains_key(&offset.step(*direction));
                match (boundary, face) {
                    (true, None) => {
                        return Err(invalid_module(
                            name,
                            &format!(
                                "boundary face {direction} of subcell {offset} has no connector"
                            ),
                        ));
                    }
                    (false, Some(connector)) => {
                        return Err(invalid_module(
                            name,
                            &format!(
                                "internal face {direction} of subcell {offset} \
                                 carries connector {connector}"
                            ),
                        ));
                    }
                    (true, Some(connector))
                        if connector.is_vertical() != direction.is_vertical() =>
                    {
                        return Err(invalid_module(
                            name,
                            &format!("connector {connector} does not belong on a {direction} face"),
                        ));
                    }
                    _ => {}
                }
            }
        }

        if let Some(spawnable) = self
            .spawnables
            .iter()
            .find(|s| !s.weight.is_finite() || s.weight < 0.0)
        {
            return Err(invalid_module(
                name,
                &format!(
                    "spawnable '{}' has invalid weight {}",
                    spawnable.name, spawnable.weight
                ),
            ));
        }

        Ok(ModuleDefinition {
            name: self.name,
            size: self.size,
            cells: self.cells,
            symmetrical: self.symmetrical,
            flippable: self.flippable,
            ground_only: self.ground_only,
            empty: self.empty,
            spawnables: self.spawnables,
        })
    }
}
