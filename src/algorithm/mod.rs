/// Growable bitset for candidate membership
pub mod bitset;
/// Per-coordinate candidate sets and connector tallies
pub mod cell;
/// Frontier-driven solve orchestration
pub mod executor;
/// Placement extraction from a solved grid
pub mod extraction;
/// Candidate grid and constraint propagation
pub mod propagation;
/// Seeded random selection
pub mod selection;
