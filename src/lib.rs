//! Propagation-based wave function collapse over a 3-D voxel grid
//!
//! Modules are tile-like blocks whose faces expose connectors derived from
//! their boundary geometry. Every grid cell starts with every orientation of
//! every module that fits, and collapsing cells one at a time cascades
//! removals until touching faces everywhere agree.

#![forbid(unsafe_code)]

/// Candidate grid, propagation and the frontier solver
pub mod algorithm;
/// Connector ids and the cross-section catalog
pub mod connector;
/// Input/output operations and error handling
pub mod io;
/// Module definitions, libraries and orientation transforms
pub mod module;
/// Directions, coordinates and extents
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
