//! Spatial primitives shared by the solver and the module transforms
//!
//! This module contains:
//! - Face directions and their neighbor offsets
//! - Grid coordinates and bounded extents

/// Face directions and neighbor offsets
pub mod direction;
/// Grid coordinates and bounded extents
pub mod grid;

pub use direction::Direction;
pub use grid::{Dimensions, Position};
