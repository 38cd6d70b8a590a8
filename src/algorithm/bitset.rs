use bitvec::prelude::*;
use std::fmt;

/// Growable bitset of candidate indices
///
/// Uses 0-based indexing. The grid indexes it by pool id, a cell by its
/// local slot. Inserting past the end grows the set; queries past the end
/// report absence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateBitset {
    bits: BitVec,
}

impl CandidateBitset {
    /// Create a bitset with no candidates present
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id, returning whether it was newly added
    pub fn insert(&mut self, id: usize) -> bool {
        if id >= self.bits.len() {
            self.bits.resize(id + 1, false);
        }
        let was_present = self.contains(id);
        self.bits.set(id, true);
        !was_present
    }

    /// Remove an id, returning whether it was present
    pub fn remove(&mut self, id: usize) -> bool {
        let was_present = self.contains(id);
        if was_present {
            self.bits.set(id, false);
        }
        was_present
    }

    /// Test membership
    pub fn contains(&self, id: usize) -> bool {
        self.bits.get(id).as_deref() == Some(&true)
    }

    /// Test if no ids are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count ids in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Present ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl fmt::Display for CandidateBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<usize> = self.iter().collect();
        write!(f, "CandidateBitset({} candidates: {ids:?})", self.count())
    }
}
