//! Error types for raster input, configuration and analysis

use std::fmt;
use std::path::PathBuf;

/// Main error type for all analysis operations
#[derive(Debug)]
pub enum AnalysisError {
    /// Failed to decode an image raster from the filesystem
    RasterLoad {
        /// Path to the raster file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// ASCII grid content is malformed
    RasterParse {
        /// Path to the raster file
        path: PathBuf,
        /// One-based line number of the offending line
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// Raster exists but its layout can't be used as a category map
    UnsupportedFormat {
        /// Path to the raster file
        path: PathBuf,
        /// Explanation of why the layout is rejected
        reason: String,
    },

    /// Analysis parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Two grids that must share a shape don't
    DimensionMismatch {
        /// Which grid was being checked
        what: &'static str,
        /// Expected dimensions (rows, cols)
        expected: (usize, usize),
        /// Actual dimensions (rows, cols)
        found: (usize, usize),
    },

    /// A row index outside the raster was requested or written
    RowOutOfRange {
        /// Requested row
        row: usize,
        /// Number of rows in the raster
        rows: usize,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RasterLoad { path, source } => {
                write!(f, "Failed to load raster '{}': {source}", path.display())
            }
            Self::RasterParse { path, line, reason } => {
                write!(
                    f,
                    "Malformed raster '{}' at line {line}: {reason}",
                    path.display()
                )
            }
            Self::UnsupportedFormat { path, reason } => {
                write!(f, "Unsupported raster '{}': {reason}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DimensionMismatch {
                what,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{what} has size {}x{} but {}x{} was expected",
                    found.0, found.1, expected.0, expected.1
                )
            }
            Self::RowOutOfRange { row, rows } => {
                write!(f, "Row {row} is out of range (raster has {rows} rows)")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RasterLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
