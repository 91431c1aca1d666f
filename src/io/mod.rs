//! Input/output boundary of the analysis

/// Plain-text raster reading and writing
pub mod ascii;
/// Command-line parsing and run orchestration
pub mod cli;
/// Named constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Grayscale image rasters
pub mod image;
/// Stage progress display
pub mod progress;
/// Raster source and sink abstractions
pub mod raster;
