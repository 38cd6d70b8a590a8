use crate::{
    algorithm::bitset::CandidateBitset,
    connector::Connector,
    module::FaceTable,
    spatial::Direction,
};
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Index of an oriented module in the grid's candidate pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CandidateId(pub(crate) usize);

impl CandidateId {
    /// Id for a pool index; a grid treats ids it never handed out as absent
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the candidate pool
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candidate {}", self.0)
    }
}

/// How far a cell has been decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Several candidates remain and none has been removed yet
    Unconstrained,
    /// Some candidates were removed; this many remain
    Narrowed(usize),
    /// Exactly one candidate remains
    Collapsed(CandidateId),
    /// No candidate remains
    Contradiction,
}

/// Candidate set of one grid coordinate with per-face connector tallies
///
/// Every candidate ever inserted keeps a local slot, in insertion order, and
/// presence is a bit per slot. Storage follows the cell's own candidates, not
/// the size of the grid-wide pool.
///
/// `counts[d][c]` is the number of present candidates whose face in
/// direction `d` at this cell shows connector `c`. A tally that drops to zero
/// is reported to the caller so the neighbor across `d` can be narrowed.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    slots: IndexSet<CandidateId>,
    present: CandidateBitset,
    counts: [HashMap<Connector, u32>; 6],
    narrowed: bool,
}

impl Cell {
    /// Create a cell without candidates
    pub fn new() -> Self {
        Self::default()
    }

    /// Present candidate ids in the order they first arrived
    ///
    /// Pool ids are handed out in increasing order, so this is ascending.
    pub fn candidate_ids(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.present
            .iter()
            .filter_map(|slot| self.slots.get_index(slot).copied())
    }

    /// Number of present candidates
    pub fn candidate_count(&self) -> usize {
        self.present.count()
    }

    /// Whether no candidate is left
    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    /// Whether a candidate is present
    pub fn contains(&self, id: CandidateId) -> bool {
        self.slots
            .get_index_of(&id)
            .is_some_and(|slot| self.present.contains(slot))
    }

    /// Number of present candidates showing `connector` on face `direction`
    pub fn connector_count(&self, direction: Direction, connector: Connector) -> u32 {
        self.counts
            .get(direction.index())
            .and_then(|tally| tally.get(&connector))
            .copied()
            .unwrap_or(0)
    }

    /// All non-zero tallies of one face
    pub fn connector_counts(
        &self,
        direction: Direction,
    ) -> impl Iterator<Item = (Connector, u32)> + '_ {
        self.counts
            .get(direction.index())
            .into_iter()
            .flat_map(|tally| tally.iter().map(|(&connector, &count)| (connector, count)))
    }

    /// Current decision state
    pub fn state(&self) -> CellState {
        match self.present.count() {
            0 => CellState::Contradiction,
            1 => self
                .candidate_ids()
                .next()
                .map_or(CellState::Contradiction, CellState::Collapsed),
            n if self.narrowed => CellState::Narrowed(n),
            _ => CellState::Unconstrained,
        }
    }

    /// Add a candidate with the faces it shows at this cell
    ///
    /// Returns `false` and leaves the tallies alone if it was already present.
    pub(crate) fn insert(&mut self, id: CandidateId, faces: &FaceTable) -> bool {
        let (slot, _) = self.slots.insert_full(id);
        if !self.present.insert(slot) {
            return false;
        }
        for (tally, face) in self.counts.iter_mut().zip(faces) {
            if let Some(connector) = face {
                *tally.entry(*connector).or_insert(0) += 1;
            }
        }
        true
    }

    /// Remove a candidate with the faces it shows at this cell
    ///
    /// Returns the `(direction, connector)` tallies that dropped to zero.
    pub(crate) fn remove(
        &mut self,
        id: CandidateId,
        faces: &FaceTable,
    ) -> Vec<(Direction, Connector)> {
        let mut exhausted = Vec::new();
        let Some(slot) = self.slots.get_index_of(&id) else {
            return exhausted;
        };
        if !self.present.remove(slot) {
            return exhausted;
        }
        self.narrowed = true;
        let faces_by_direction = Direction::ALL.iter().zip(self.counts.iter_mut()).zip(faces);
        for ((direction, tally), face) in faces_by_direction {
            let Some(connector) = face else { continue };
            if let Some(count) = tally.get_mut(connector) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    tally.remove(connector);
                    exhausted.push((*direction, *connector));
                }
            }
        }
        exhausted
    }
}
