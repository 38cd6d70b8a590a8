//! Compile serialized module blueprints against a connector catalog
//!
//! A blueprint lists the occupied subcells and, for each boundary face,
//! either a connector written out in canonical form or the face's 2-D
//! cross-section. Cross-sections are resolved through the catalog so that
//! every module compiled in one run shares connector ids.

use crate::connector::{Connector, ConnectorCatalog, CrossSection};
use crate::io::error::{Result, invalid_module};
use crate::module::definition::{FaceTable, ModuleDefinition, Spawnable};
use crate::module::library::ModuleLibrary;
use crate::spatial::{Dimensions, Direction, Position};
use log::debug;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How one boundary face is described
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaceSpec {
    /// Canonical connector id such as `h3f` or `v2x-1`
    Connector(Connector),
    /// Projected boundary points, resolved by the catalog
    Section(CrossSection),
}

/// One occupied subcell of a blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellBlueprint {
    /// Offset inside the module bounding box
    pub offset: Position,
    /// Boundary faces; internal faces are left out
    #[serde(default)]
    pub faces: BTreeMap<Direction, FaceSpec>,
}

/// Serialized form of a module definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleBlueprint {
    /// Unique module name
    pub name: String,
    /// Bounding box in subcells
    #[serde(default = "unit_size")]
    pub size: Dimensions,
    /// Occupied subcells
    #[serde(default)]
    pub cells: Vec<CellBlueprint>,
    /// Rotations look identical
    #[serde(default)]
    pub symmetrical: bool,
    /// Mirrored orientations take part in the solve
    #[serde(default)]
    pub flippable: bool,
    /// Origin restricted to the bottom layer
    #[serde(default)]
    pub ground_only: bool,
    /// The no-op module; with no cells listed it becomes one all-`EMPTY` subcell
    #[serde(default)]
    pub empty: bool,
    /// Weighted visual variants
    #[serde(default)]
    pub spawnables: Vec<Spawnable>,
}

const fn unit_size() -> Dimensions {
    Dimensions::UNIT
}

/// Turns blueprints into validated definitions
pub struct ModuleCompiler<'a> {
    catalog: &'a mut ConnectorCatalog,
}

impl<'a> ModuleCompiler<'a> {
    /// Compile against the given catalog, which grows as new shapes appear
    pub const fn new(catalog: &'a mut ConnectorCatalog) -> Self {
        Self { catalog }
    }

    /// Compile every blueprint into one library, keeping their order
    ///
    /// # Errors
    ///
    /// Returns the first compilation error, or an error on duplicate names
    pub fn compile_all(&mut self, blueprints: &[ModuleBlueprint]) -> Result<ModuleLibrary> {
        let mut library = ModuleLibrary::new();
        for blueprint in blueprints {
            library.push(self.compile(blueprint)?)?;
        }
        Ok(library)
    }

    /// Compile one blueprint
    ///
    /// The occupancy mask decides which faces are boundary faces. Internal
    /// faces are checked before any cross-section reaches the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A subcell offset lies outside the bounding box or is listed twice
    /// - A face is given for an internal face
    /// - A cross-section is empty or malformed
    /// - The resulting definition fails validation
    pub fn compile(&mut self, blueprint: &ModuleBlueprint) -> Result<ModuleDefinition> {
        let name = blueprint.name.as_str();
        if blueprint.empty && blueprint.cells.is_empty() {
            return Ok(ModuleDefinition::empty_space(name));
        }

        let occupancy = Self::occupancy(blueprint)?;
        let is_occupied = |offset: Position| {
            blueprint
                .size
                .index_of(offset)
                .and_then(|index| occupancy.get(index))
                .copied()
                .unwrap_or(false)
        };

        for cell in &blueprint.cells {
            if let Some(direction) = cell
                .faces
                .keys()
                .find(|direction| is_occupied(cell.offset.step(**direction)))
            {
                return Err(invalid_module(
                    name,
                    &format!(
                        "face {direction} of subcell {} is internal and cannot carry a connector",
                        cell.offset
                    ),
                ));
            }
        }

        let mut builder = ModuleDefinition::builder(name, blueprint.size)
            .symmetrical(blueprint.symmetrical)
            .flippable(blueprint.flippable)
            .ground_only(blueprint.ground_only)
            .empty(blueprint.empty);

        for cell in &blueprint.cells {
            let mut faces: FaceTable = [None; 6];
            for (direction, spec) in &cell.faces {
                let connector = match spec {
                    FaceSpec::Connector(connector) => *connector,
                    FaceSpec::Section(section) => self.catalog.connector_for(*direction, section)?,
                };
                if let Some(slot) = faces.get_mut(direction.index()) {
                    *slot = Some(connector);
                }
            }
            builder = builder.cell(cell.offset, faces);
        }

        for spawnable in &blueprint.spawnables {
            builder = builder.spawnable(spawnable.name.clone(), spawnable.weight);
        }

        let definition = builder.build()?;
        debug!(
            "compiled module '{name}': {} subcells in {}",
            definition.cells().len(),
            definition.size()
        );
        Ok(definition)
    }

    fn occupancy(blueprint: &ModuleBlueprint) -> Result<Array3<bool>> {
        let mut occupancy = Array3::from_elem(blueprint.size.shape(), false);
        for cell in &blueprint.cells {
            let index = blueprint.size.index_of(cell.offset).ok_or_else(|| {
                invalid_module(
                    &blueprint.name,
                    &format!(
                        "subcell {} lies outside the {} bounding box",
                        cell.offset, blueprint.size
                    ),
                )
            })?;
            match occupancy.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(invalid_module(
                        &blueprint.name,
                        &format!("subcell {} is listed twice", cell.offset),
                    ));
                }
            }
        }
        Ok(occupancy)
    }
}
