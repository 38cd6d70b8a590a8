//! Read the final placements out of a fully collapsed grid

use crate::{
    algorithm::cell::CandidateId,
    algorithm::propagation::SolverGrid,
    algorithm::selection::RandomSelector,
    io::error::{AlgorithmError, Result},
    module::{ModuleId, ModuleLibrary},
    spatial::{Dimensions, Position},
};
use ndarray::Array3;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

/// One solved, non-empty module instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Library id of the definition
    pub module: ModuleId,
    /// Definition name
    pub name: String,
    /// Grid coordinate of the origin subcell
    pub position: Position,
    /// Quarter turns about +Y
    pub rotation: u8,
    /// Whether the mirrored orientation was used
    pub flipped: bool,
    /// Bounding box after the transform
    pub size: Dimensions,
    /// Visual variant picked for this instance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawnable: Option<String>,
}

/// The solved grid: placements plus a per-coordinate lookup
#[derive(Debug, Clone, Serialize)]
pub struct SolvedGrid {
    dimensions: Dimensions,
    placements: Vec<Placement>,
    #[serde(skip)]
    occupancy: Array3<Option<usize>>,
}

impl SolvedGrid {
    /// Collect one placement per surviving non-empty candidate
    ///
    /// Placements are ordered by the first coordinate they cover, scanning x,
    /// then y, then z. Spawnables are drawn from `selector`.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if a cell is empty, `Unresolved` if a cell
    /// still holds several candidates
    pub fn from_grid<R: Rng>(
        grid: &SolverGrid,
        library: &ModuleLibrary,
        selector: &mut RandomSelector<R>,
    ) -> Result<Self> {
        if let Some(position) = grid.contradiction() {
            return Err(AlgorithmError::Contradiction { position });
        }

        let dimensions = grid.dimensions();
        let mut placements = Vec::new();
        let mut placement_of: HashMap<CandidateId, usize> = HashMap::new();
        let mut occupancy = Array3::from_elem(dimensions.shape(), None);

        for position in dimensions.positions() {
            let mut ids = grid
                .cell(position)
                .into_iter()
                .flat_map(|cell| cell.candidate_ids());
            let (Some(id), None) = (ids.next(), ids.next()) else {
                return match grid.candidate_count(position) {
                    0 => Err(AlgorithmError::Contradiction { position }),
                    remaining => Err(AlgorithmError::Unresolved {
                        position,
                        remaining,
                    }),
                };
            };

            let slot = match placement_of.get(&id) {
                Some(&index) => Some(index),
                None => {
                    let candidate = grid.candidate(id).ok_or_else(|| AlgorithmError::UnknownModule {
                        name: id.to_string(),
                    })?;
                    let definition = library.get(candidate.module()).ok_or_else(|| {
                        AlgorithmError::UnknownModule {
                            name: candidate.module().to_string(),
                        }
                    })?;
                    if definition.is_empty() {
                        None
                    } else {
                        let index = placements.len();
                        placements.push(Placement {
                            module: candidate.module(),
                            name: definition.name().to_string(),
                            position: candidate.position(),
                            rotation: candidate.rotation(),
                            flipped: candidate.is_flipped(),
                            size: candidate.size(),
                            spawnable: definition
                                .select_spawnable(selector)
                                .map(|s| s.name.clone()),
                        });
                        placement_of.insert(id, index);
                        Some(index)
                    }
                }
            };

            if let Some(cell) = dimensions
                .index_of(position)
                .and_then(|index| occupancy.get_mut(index))
            {
                *cell = slot;
            }
        }

        Ok(Self {
            dimensions,
            placements,
            occupancy,
        })
    }

    /// Grid extent
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// All non-empty placements
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement covering a coordinate, `None` for empty space or outside the grid
    pub fn placement_at(&self, position: Position) -> Option<&Placement> {
        self.dimensions
            .index_of(position)
            .and_then(|index| self.occupancy.get(index))
            .copied()
            .flatten()
            .and_then(|slot| self.placements.get(slot))
    }
}
