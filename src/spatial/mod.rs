//! Spatial data structures shared by labeling and sampling
//!
//! This module contains:
//! - Dense grids, coordinates and sampling regions
//! - Neighborhood policies
//! - Integer line rasterization

/// Grid and region types
pub mod grid;
/// Integer line rasterization
pub mod line;
/// Four- and eight-cell neighborhoods
pub mod neighborhood;

pub use grid::{BinaryGrid, FragmentGrid, MaskGrid, Region};
