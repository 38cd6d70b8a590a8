//! Manual placements applied before the collapse loop starts

use crate::algorithm::executor::Solver;
use crate::io::error::{Result, invalid_parameter};
use crate::module::ModuleLibrary;
use crate::spatial::Position;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Single forced module placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualPlacement {
    /// Grid coordinate of the module origin
    pub position: Position,
    /// Library name of the module
    pub module: String,
    /// Quarter turns about +Y, in `0..4`
    #[serde(default)]
    pub rotation: u8,
    /// Whether the mirrored orientation is used
    #[serde(default)]
    pub flipped: bool,
}

/// Ordered queue of manual placements
#[derive(Debug, Clone, Default)]
pub struct PrefillData {
    /// Placements in application order
    pub placement_queue: VecDeque<ManualPlacement>,
}

impl PrefillData {
    /// Queue placements in the given order
    pub fn new(placements: impl IntoIterator<Item = ManualPlacement>) -> Self {
        Self {
            placement_queue: placements.into_iter().collect(),
        }
    }

    /// Check every placement against a library before any is applied
    ///
    /// # Errors
    ///
    /// Returns `UnknownModule` for a missing name, or an error for a rotation
    /// outside `0..4`
    pub fn validate(&self, library: &ModuleLibrary) -> Result<()> {
        for placement in &self.placement_queue {
            library.resolve(&placement.module)?;
            if placement.rotation > 3 {
                return Err(invalid_parameter(
                    "rotation",
                    &placement.rotation,
                    &"rotation must be 0, 1, 2 or 3",
                ));
            }
        }
        Ok(())
    }

    /// Number of queued placements
    pub fn len(&self) -> usize {
        self.placement_queue.len()
    }

    /// Whether no placement is queued
    pub fn is_empty(&self) -> bool {
        self.placement_queue.is_empty()
    }

    /// Get the next placement from the queue
    pub fn next_placement(&mut self) -> Option<ManualPlacement> {
        self.placement_queue.pop_front()
    }

    /// Apply every queued placement to a solver in order, emptying the queue
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the solver
    pub fn apply_to<R: Rng>(&mut self, solver: &mut Solver<'_, R>) -> Result<()> {
        let mut applied = 0;
        while let Some(placement) = self.next_placement() {
            solver.apply_override(&placement)?;
            applied += 1;
        }
        debug!("applied {applied} manual placements");
        Ok(())
    }
}
