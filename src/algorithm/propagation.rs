//! Candidate grid with cascading arc-consistency removal
//!
//! Every grid coordinate owns a [`Cell`]. Oriented modules live once in a
//! shared pool and are present in all cells they cover at the same time, so
//! removing one from any cell removes it everywhere. When a cell's tally for
//! some face connector reaches zero, the neighbor across that face can no
//! longer keep candidates expecting the matching connector; that negative
//! constraint is queued and the queue is drained before the operation returns.

use crate::{
    algorithm::bitset::CandidateBitset,
    algorithm::cell::{CandidateId, Cell, CellState},
    algorithm::selection::RandomSelector,
    connector::Connector,
    io::error::{AlgorithmError, Result, invalid_parameter},
    module::{ModuleId, OrientedModule},
    spatial::{Dimensions, Direction, Position},
};
use log::{trace, warn};
use ndarray::Array3;
use rand::Rng;
use std::collections::{HashMap, VecDeque};

/// Pending removal: at `position`, drop candidates showing `forbidden` on `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegativeConstraint {
    /// Cell to narrow
    pub position: Position,
    /// Face of that cell
    pub direction: Direction,
    /// Connector that lost its last partner across the face
    pub forbidden: Connector,
}

/// Fields that tell pooled modules apart, without the face table
///
/// Transform chains can reach the same fields with different tables, so a
/// key may hold several ids and lookups compare the full module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PlacementKey {
    module: ModuleId,
    position: Position,
    rotation: u8,
    flipped: bool,
}

impl PlacementKey {
    const fn of(module: &OrientedModule) -> Self {
        Self {
            module: module.module(),
            position: module.position(),
            rotation: module.rotation(),
            flipped: module.is_flipped(),
        }
    }
}

/// Per-coordinate candidate sets over a fixed extent
///
/// The first contradiction is sticky: once a cell runs out of candidates, the
/// cascade that caused it is still drained, and every later mutating call
/// returns the same `Contradiction` without touching the grid.
#[derive(Debug, Clone)]
pub struct SolverGrid {
    dimensions: Dimensions,
    cells: Array3<Cell>,
    pool: Vec<OrientedModule>,
    index: HashMap<PlacementKey, Vec<CandidateId>>,
    present: CandidateBitset,
    pending: VecDeque<NegativeConstraint>,
    contradiction: Option<Position>,
}

impl SolverGrid {
    /// Create a grid whose cells hold no candidates
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: Array3::from_shape_simple_fn(dimensions.shape(), Cell::new),
            pool: Vec::new(),
            index: HashMap::new(),
            present: CandidateBitset::new(),
            pending: VecDeque::new(),
            contradiction: None,
        }
    }

    /// Grid extent
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Cell at a coordinate
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.dimensions
            .index_of(position)
            .and_then(|index| self.cells.get(index))
    }

    /// Pooled oriented module for an id
    pub fn candidate(&self, id: CandidateId) -> Option<&OrientedModule> {
        self.pool.get(id.0)
    }

    /// Id of an oriented module if it is currently present
    pub fn find_candidate(&self, module: &OrientedModule) -> Option<CandidateId> {
        self.pooled_id(module)
            .filter(|id| self.present.contains(id.0))
    }

    fn pooled_id(&self, module: &OrientedModule) -> Option<CandidateId> {
        self.index.get(&PlacementKey::of(module)).and_then(|ids| {
            ids.iter()
                .copied()
                .find(|id| self.pool.get(id.0) == Some(module))
        })
    }

    /// Present candidates of a cell
    pub fn candidates_at(&self, position: Position) -> impl Iterator<Item = &OrientedModule> + '_ {
        self.cell(position)
            .into_iter()
            .flat_map(Cell::candidate_ids)
            .filter_map(|id| self.pool.get(id.0))
    }

    /// Number of present candidates of a cell, 0 outside the grid
    pub fn candidate_count(&self, position: Position) -> usize {
        self.cell(position).map_or(0, Cell::candidate_count)
    }

    /// Number of distinct oriented modules present anywhere
    pub fn present_count(&self) -> usize {
        self.present.count()
    }

    /// Decision state of a cell
    pub fn state(&self, position: Position) -> Option<CellState> {
        self.cell(position).map(Cell::state)
    }

    /// First cell that ran out of candidates, if any
    pub const fn contradiction(&self) -> Option<Position> {
        self.contradiction
    }

    /// Whether every cell holds exactly one candidate
    pub fn is_solved(&self) -> bool {
        self.contradiction.is_none()
            && self.cells.iter().all(|cell| cell.candidate_count() == 1)
    }

    /// Add an oriented module to every cell it covers
    ///
    /// Adding a candidate that is already present is a no-op returning its id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlacement` if the bounding box leaves the grid, or the
    /// sticky contradiction
    pub fn add_candidate(&mut self, module: OrientedModule) -> Result<CandidateId> {
        self.ensure_consistent()?;
        if !module.fits(self.dimensions) {
            return Err(AlgorithmError::InvalidPlacement {
                module: module.module().to_string(),
                position: module.position(),
                reason: format!(
                    "{} footprint leaves the {} grid",
                    module.size(),
                    self.dimensions
                ),
            });
        }

        let id = match self.pooled_id(&module) {
            Some(id) => id,
            None => {
                let id = CandidateId(self.pool.len());
                self.index
                    .entry(PlacementKey::of(&module))
                    .or_default()
                    .push(id);
                self.pool.push(module);
                id
            }
        };
        if !self.present.insert(id.0) {
            return Ok(id);
        }

        if let Some(module) = self.pool.get(id.0) {
            let origin = module.position();
            for (offset, faces) in module.cells() {
                let position = origin.offset_by(*offset);
                if let Some(cell) = self
                    .dimensions
                    .index_of(position)
                    .and_then(|index| self.cells.get_mut(index))
                {
                    cell.insert(id, faces);
                }
            }
        }
        Ok(id)
    }

    /// Remove a candidate from every cell it covers and propagate
    ///
    /// Returns `Ok(false)` without any effect if the candidate is not present.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if any cell runs out of candidates
    pub fn remove_candidate(&mut self, id: CandidateId) -> Result<bool> {
        self.ensure_consistent()?;
        if !self.present.contains(id.0) {
            return Ok(false);
        }
        self.detach(id);
        self.drain()?;
        Ok(true)
    }

    /// Keep only candidates at `position` showing `required` on face `direction`
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid, or
    /// `Contradiction` if any cell runs out of candidates
    pub fn apply_positive_constraint(
        &mut self,
        position: Position,
        direction: Direction,
        required: Connector,
    ) -> Result<()> {
        self.ensure_consistent()?;
        self.ensure_inside(position)?;
        self.retain_at(position, |module| {
            module.connector_at_cell(position, direction) == Some(required)
        });
        self.drain()
    }

    /// Drop candidates at `position` showing `forbidden` on face `direction`
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid, or
    /// `Contradiction` if any cell runs out of candidates
    pub fn apply_negative_constraint(
        &mut self,
        position: Position,
        direction: Direction,
        forbidden: Connector,
    ) -> Result<()> {
        self.ensure_consistent()?;
        self.ensure_inside(position)?;
        self.retain_at(position, |module| {
            module.connector_at_cell(position, direction) != Some(forbidden)
        });
        self.drain()
    }

    /// Force an oriented module into place
    ///
    /// The module is added, then every other candidate of the cells it covers
    /// is removed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlacement` before any change if the module does not
    /// fit, or `Contradiction` if propagation empties a cell
    pub fn set_module(&mut self, module: OrientedModule) -> Result<CandidateId> {
        let id = self.add_candidate(module)?;
        self.commit(id);
        self.drain()?;
        Ok(id)
    }

    /// Pick one candidate at `position` uniformly and remove the others
    ///
    /// The chosen candidate also becomes the only one in the other cells it
    /// covers. Cells with zero or one candidate are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid, or
    /// `Contradiction` if propagation empties a cell
    pub fn collapse<R: Rng>(
        &mut self,
        position: Position,
        selector: &mut RandomSelector<R>,
    ) -> Result<Option<CandidateId>> {
        self.ensure_consistent()?;
        self.ensure_inside(position)?;

        let candidates: Vec<CandidateId> = self
            .cell(position)
            .map(|cell| cell.candidate_ids().collect())
            .unwrap_or_default();
        if candidates.len() <= 1 {
            return Ok(candidates.first().copied());
        }

        let chosen = selector
            .pick_index(candidates.len())
            .and_then(|index| candidates.get(index).copied());
        if let Some(id) = chosen {
            trace!("collapse {position}: kept {id} of {}", candidates.len());
            self.commit(id);
            self.drain()?;
        }
        Ok(chosen)
    }

    /// Remove every candidate with a face no neighbor candidate can mate
    ///
    /// Run once after the grid is populated. Afterwards every face of every
    /// present candidate has a matching candidate across it, and the cascade
    /// rules keep it that way. Faces on the grid boundary are left to the
    /// border constraints. Returns the number of candidates removed.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if a cell is or becomes empty
    pub fn establish_support(&mut self) -> Result<usize> {
        self.ensure_consistent()?;

        if let Some(position) = self
            .dimensions
            .positions()
            .find(|position| self.candidate_count(*position) == 0)
        {
            self.record_contradiction(position);
            return Err(AlgorithmError::Contradiction { position });
        }

        let mut victims = Vec::new();
        for id in self.present.iter().map(CandidateId) {
            let Some(module) = self.pool.get(id.0) else { continue };
            if !self.is_supported(module) {
                victims.push(id);
            }
        }

        let removed = victims.len();
        for id in victims {
            if self.present.contains(id.0) {
                self.detach(id);
            }
        }
        self.drain()?;
        Ok(removed)
    }

    fn is_supported(&self, module: &OrientedModule) -> bool {
        module.cells().iter().all(|(offset, faces)| {
            let position = module.position().offset_by(*offset);
            Direction::ALL.iter().zip(faces).all(|(direction, face)| {
                let Some(connector) = face else { return true };
                self.cell(position.step(*direction)).is_none_or(|neighbor| {
                    neighbor.connector_count(direction.opposite(), connector.mate()) > 0
                })
            })
        })
    }

    fn ensure_consistent(&self) -> Result<()> {
        match self.contradiction {
            Some(position) => Err(AlgorithmError::Contradiction { position }),
            None => Ok(()),
        }
    }

    fn ensure_inside(&self, position: Position) -> Result<()> {
        if self.dimensions.contains(position) {
            Ok(())
        } else {
            Err(invalid_parameter(
                "position",
                &position,
                &format!("outside the {} grid", self.dimensions),
            ))
        }
    }

    fn record_contradiction(&mut self, position: Position) {
        if self.contradiction.is_none() {
            warn!("contradiction: cell {position} has no remaining candidates");
            self.contradiction = Some(position);
        }
    }

    /// Keep candidates of one cell matching a predicate, detaching the rest
    fn retain_at(&mut self, position: Position, keep: impl Fn(&OrientedModule) -> bool) {
        let victims: Vec<CandidateId> = self
            .cell(position)
            .into_iter()
            .flat_map(Cell::candidate_ids)
            .filter(|id| self.pool.get(id.0).is_some_and(|module| !keep(module)))
            .collect();
        for id in victims {
            if self.present.contains(id.0) {
                self.detach(id);
            }
        }
    }

    /// Make `id` the only candidate of every cell it covers
    fn commit(&mut self, id: CandidateId) {
        let covered: Vec<Position> = self
            .pool
            .get(id.0)
            .map(|module| module.covered_positions().collect())
            .unwrap_or_default();
        for position in covered {
            let victims: Vec<CandidateId> = self
                .cell(position)
                .into_iter()
                .flat_map(Cell::candidate_ids)
                .filter(|other| *other != id)
                .collect();
            for other in victims {
                if self.present.contains(other.0) {
                    self.detach(other);
                }
            }
        }
    }

    /// Remove a present candidate from its cells and queue the fallout
    fn detach(&mut self, id: CandidateId) {
        self.present.remove(id.0);
        let Some(module) = self.pool.get(id.0) else { return };
        let origin = module.position();

        for (offset, faces) in module.cells() {
            let position = origin.offset_by(*offset);
            let Some(cell) = self
                .dimensions
                .index_of(position)
                .and_then(|index| self.cells.get_mut(index))
            else {
                continue;
            };

            let exhausted = cell.remove(id, faces);
            if cell.is_empty() && self.contradiction.is_none() {
                warn!("contradiction: cell {position} has no remaining candidates");
                self.contradiction = Some(position);
            }
            for (direction, connector) in exhausted {
                let neighbor = position.step(direction);
                if self.dimensions.contains(neighbor) {
                    self.pending.push_back(NegativeConstraint {
                        position: neighbor,
                        direction: direction.opposite(),
                        forbidden: connector.mate(),
                    });
                }
            }
        }
    }

    /// Apply queued negative constraints until none are left
    fn drain(&mut self) -> Result<()> {
        while let Some(constraint) = self.pending.pop_front() {
            let NegativeConstraint {
                position,
                direction,
                forbidden,
            } = constraint;
            self.retain_at(position, |module| {
                module.connector_at_cell(position, direction) != Some(forbidden)
            });
        }
        self.ensure_consistent()
    }
}
