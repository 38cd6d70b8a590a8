use crate::{
    algorithm::extraction::SolvedGrid,
    algorithm::propagation::SolverGrid,
    algorithm::selection::RandomSelector,
    connector::Connector,
    io::error::{AlgorithmError, Result},
    io::prefill::ManualPlacement,
    module::{ModuleLibrary, OrientedModule},
    spatial::{Dimensions, Direction, Position},
};
use indexmap::IndexSet;
use log::{debug, info, trace, warn};
use ndarray::Array3;
use rand::{Rng, rngs::StdRng};

/// Connectors required on the outside faces of the grid
///
/// `bottom` applies to the `-Y` faces of the lowest layer and `top` to the
/// `+Y` faces of the highest. Perimeter `±X`/`±Z` faces require `ground` on
/// the lowest layer and `side` above it. `None` leaves a face unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderConstraints {
    /// Required on `-Y` of the bottom layer
    pub bottom: Option<Connector>,
    /// Required on `+Y` of the top layer
    pub top: Option<Connector>,
    /// Required on the perimeter above the bottom layer
    pub side: Option<Connector>,
    /// Required on the perimeter of the bottom layer
    pub ground: Option<Connector>,
}

impl BorderConstraints {
    /// No border constraints at all
    pub const fn none() -> Self {
        Self {
            bottom: None,
            top: None,
            side: None,
            ground: None,
        }
    }

    /// Solid floor, open sky, open sides and water at ground level
    pub const fn island() -> Self {
        Self {
            bottom: Some(Connector::FULL_VERTICAL),
            top: Some(Connector::EMPTY_VERTICAL),
            side: Some(Connector::EMPTY_HORIZONTAL),
            ground: Some(Connector::WATER_HORIZONTAL),
        }
    }
}

/// Frontier-driven collapse over a populated candidate grid
///
/// Construction populates every cell with every orientation of every module
/// that fits there and then removes unsupported candidates. Each step pops a
/// random frontier coordinate, collapses it and pushes its unexplored
/// neighbors, so the solved region grows outward from the first coordinate.
pub struct Solver<'a, R: Rng = StdRng> {
    library: &'a ModuleLibrary,
    grid: SolverGrid,
    selector: RandomSelector<R>,
    explored: Array3<bool>,
    explored_count: usize,
    frontier: IndexSet<Position>,
}

impl<'a> Solver<'a, StdRng> {
    /// Create a seeded solver
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if some cell has no supported candidate
    pub fn new(library: &'a ModuleLibrary, dimensions: Dimensions, seed: u64) -> Result<Self> {
        Self::with_selector(library, dimensions, RandomSelector::new(seed))
    }
}

impl<'a, R: Rng> Solver<'a, R> {
    /// Create a solver drawing randomness from `selector`
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if some cell has no supported candidate
    pub fn with_selector(
        library: &'a ModuleLibrary,
        dimensions: Dimensions,
        selector: RandomSelector<R>,
    ) -> Result<Self> {
        let mut grid = SolverGrid::new(dimensions);
        Self::populate(&mut grid, library)?;
        let populated = grid.present_count();
        let removed = grid.establish_support()?;
        info!(
            "populated {dimensions} grid with {populated} candidates, {removed} unsupported removed"
        );

        Ok(Self {
            library,
            grid,
            selector,
            explored: Array3::from_elem(dimensions.shape(), false),
            explored_count: 0,
            frontier: IndexSet::new(),
        })
    }

    fn populate(grid: &mut SolverGrid, library: &ModuleLibrary) -> Result<()> {
        let dimensions = grid.dimensions();
        for (id, definition) in library.iter() {
            let flips: &[bool] = if definition.is_flippable() {
                &[false, true]
            } else {
                &[false]
            };
            let orientations: Vec<OrientedModule> = flips
                .iter()
                .flat_map(|&flipped| {
                    (0..4).map(move |rotation| {
                        OrientedModule::new(id, definition, Position::ORIGIN, rotation, flipped)
                    })
                })
                .collect();

            for position in dimensions.positions() {
                if definition.is_ground_only() && position.y != 0 {
                    continue;
                }
                for orientation in &orientations {
                    let candidate = orientation.moved_to(position);
                    if candidate.fits(dimensions) {
                        grid.add_candidate(candidate)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Library the solver draws modules from
    pub const fn library(&self) -> &'a ModuleLibrary {
        self.library
    }

    /// Read-only view of the candidate grid
    pub const fn grid(&self) -> &SolverGrid {
        &self.grid
    }

    /// Number of explored coordinates
    pub const fn explored_count(&self) -> usize {
        self.explored_count
    }

    /// Coordinates queued for exploration, in insertion order
    pub fn frontier(&self) -> impl Iterator<Item = Position> + '_ {
        self.frontier.iter().copied()
    }

    /// Require border connectors on the outside faces of the grid
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if a border cell runs out of candidates
    pub fn apply_border_constraints(&mut self, border: &BorderConstraints) -> Result<()> {
        let dimensions = self.grid.dimensions();
        let top_layer = dimensions.y() as i32 - 1;

        for position in dimensions.positions() {
            if let (0, Some(bottom)) = (position.y, border.bottom) {
                self.grid
                    .apply_positive_constraint(position, Direction::NegY, bottom)?;
            }
            if let (true, Some(top)) = (position.y == top_layer, border.top) {
                self.grid
                    .apply_positive_constraint(position, Direction::PosY, top)?;
            }

            let perimeter = if position.y == 0 { border.ground } else { border.side };
            let Some(required) = perimeter else { continue };
            for direction in Direction::HORIZONTAL {
                if !dimensions.contains(position.step(direction)) {
                    self.grid
                        .apply_positive_constraint(position, direction, required)?;
                }
            }
        }
        debug!("applied border constraints {border:?}");
        Ok(())
    }

    /// Force a module with a rotation at a coordinate
    ///
    /// # Errors
    ///
    /// Returns `UnknownModule`, `InvalidPlacement` if the footprint leaves the
    /// grid, or `Contradiction`
    pub fn set_module(&mut self, position: Position, module: &str, rotation: u8) -> Result<()> {
        self.apply_override(&ManualPlacement {
            position,
            module: module.to_string(),
            rotation,
            flipped: false,
        })
    }

    /// Force a manual placement and grow the frontier around it
    ///
    /// # Errors
    ///
    /// Returns `UnknownModule`, `InvalidPlacement` if the footprint leaves the
    /// grid, or `Contradiction`
    pub fn apply_override(&mut self, placement: &ManualPlacement) -> Result<()> {
        let id = self.library.resolve(&placement.module)?;
        let definition = self
            .library
            .get(id)
            .ok_or_else(|| AlgorithmError::UnknownModule {
                name: placement.module.clone(),
            })?;
        let oriented = OrientedModule::new(
            id,
            definition,
            placement.position,
            placement.rotation,
            placement.flipped,
        );
        let dimensions = self.grid.dimensions();
        if !oriented.fits(dimensions) {
            return Err(AlgorithmError::InvalidPlacement {
                module: placement.module.clone(),
                position: placement.position,
                reason: format!(
                    "{} footprint leaves the {dimensions} grid",
                    oriented.size()
                ),
            });
        }

        self.grid.set_module(oriented)?;
        debug!(
            "override '{}' at {} (rotation {}, flipped {})",
            placement.module, placement.position, placement.rotation, placement.flipped
        );
        self.explore(placement.position);
        Ok(())
    }

    /// Perform one collapse, returning `false` once every coordinate is explored
    ///
    /// An empty frontier with unexplored coordinates left is reseeded with a
    /// random unexplored coordinate.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if the collapse empties a cell
    pub fn step(&mut self) -> Result<bool> {
        if self.frontier.is_empty() && !self.seed_frontier() {
            return Ok(false);
        }

        let Some(position) = self
            .selector
            .pick_index(self.frontier.len())
            .and_then(|index| self.frontier.shift_remove_index(index))
        else {
            return Ok(false);
        };

        self.explore(position);
        let chosen = self.grid.collapse(position, &mut self.selector).inspect_err(|e| {
            warn!("solve stopped at {position}: {e}");
        })?;
        if let Some(candidate) = chosen.and_then(|id| self.grid.candidate(id)) {
            trace!(
                "explored {position}: module {} rotation {}",
                candidate.module(),
                candidate.rotation()
            );
        }
        Ok(true)
    }

    /// Run steps until every coordinate is explored
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if a collapse empties a cell
    pub fn solve(&mut self) -> Result<()> {
        self.solve_observed(|_, _| {})
    }

    /// Run to completion, reporting `(explored, total)` after each step
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if a collapse empties a cell
    pub fn solve_observed(&mut self, mut observer: impl FnMut(usize, usize)) -> Result<()> {
        let total = self.grid.dimensions().cell_count();
        while self.step()? {
            observer(self.explored_count, total);
        }
        info!("solved {} grid", self.grid.dimensions());
        Ok(())
    }

    /// Read the placements out of the solved grid
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` or `Unresolved` if the grid is not solved
    pub fn extract(&mut self) -> Result<SolvedGrid> {
        SolvedGrid::from_grid(&self.grid, self.library, &mut self.selector)
    }

    /// Pick a random unexplored coordinate as the new frontier
    fn seed_frontier(&mut self) -> bool {
        let unexplored: Vec<Position> = self
            .grid
            .dimensions()
            .positions()
            .filter(|position| !self.is_explored(*position))
            .collect();
        match self
            .selector
            .pick_index(unexplored.len())
            .and_then(|index| unexplored.get(index))
        {
            Some(&position) => {
                self.frontier.insert(position);
                true
            }
            None => false,
        }
    }

    fn is_explored(&self, position: Position) -> bool {
        self.grid
            .dimensions()
            .index_of(position)
            .and_then(|index| self.explored.get(index))
            .copied()
            .unwrap_or(true)
    }

    /// Mark a coordinate explored and queue its unexplored neighbors
    fn explore(&mut self, position: Position) {
        let dimensions = self.grid.dimensions();
        if let Some(flag) = dimensions
            .index_of(position)
            .and_then(|index| self.explored.get_mut(index))
        {
            if !*flag {
                *flag = true;
                self.explored_count += 1;
            }
        }
        self.frontier.shift_remove(&position);

        for direction in Direction::ALL {
            let neighbor = position.step(direction);
            if dimensions.contains(neighbor) && !self.is_explored(neighbor) {
                self.frontier.insert(neighbor);
            }
        }
    }
}
