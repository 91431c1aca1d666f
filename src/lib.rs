//! Probability that two random points fall into the same habitat fragment
//!
//! Patch cells of a categorical raster are grouped into fragments (connected
//! components, optionally joined across small gaps), then a Monte-Carlo
//! estimator samples point pairs over the whole map or a moving window.

#![forbid(unsafe_code)]

/// Fragment labeling, probability sampling and windowed analysis
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Random stream utilities
pub mod math;
/// Grids, regions, neighborhoods and line rasterization
pub mod spatial;

pub use io::error::{AnalysisError, Result};
