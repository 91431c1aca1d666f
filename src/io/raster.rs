//! Row-oriented raster input and output
//!
//! Analysis code never touches files directly. Inputs are anything that can
//! hand out category rows, outputs anything that accepts probability rows.

use crate::algorithm::window::WindowedGrid;
use crate::io::error::{AnalysisError, Result};
use crate::spatial::grid::{BinaryGrid, MaskGrid};
use indicatif::ProgressBar;
use ndarray::Array2;

/// Raster read one row at a time; `None` cells are null
pub trait RasterSource {
    /// Raster dimensions (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Category values of `row`, 0 being the top row
    ///
    /// # Errors
    ///
    /// Returns an error if the row is out of range or can't be read
    fn read_row(&self, row: usize) -> Result<Vec<Option<i32>>>;
}

/// Raster written one row at a time; `None` cells are written as null
pub trait RasterSink {
    /// Write the values of `row`
    ///
    /// # Errors
    ///
    /// Returns an error if the row is out of order or the write fails
    fn put_row(&mut self, row: usize, values: &[Option<f64>]) -> Result<()>;

    /// Flush any buffered output
    ///
    /// # Errors
    ///
    /// Returns an error if the final write fails
    fn finish(&mut self) -> Result<()>;
}

/// Category raster held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRaster {
    cells: Array2<Option<i32>>,
}

impl CategoryRaster {
    /// Wrap a category array
    pub const fn new(cells: Array2<Option<i32>>) -> Self {
        Self { cells }
    }

    /// Build from non-null categories
    pub fn from_values(values: &Array2<i32>) -> Self {
        Self {
            cells: values.mapv(Some),
        }
    }

    /// Underlying category array
    pub const fn cells(&self) -> &Array2<Option<i32>> {
        &self.cells
    }
}

impl RasterSource for CategoryRaster {
    fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    fn read_row(&self, row: usize) -> Result<Vec<Option<i32>>> {
        let rows = self.cells.nrows();
        if row >= rows {
            return Err(AnalysisError::RowOutOfRange { row, rows });
        }
        Ok(self.cells.row(row).to_vec())
    }
}

/// Read every row of `source` into memory
///
/// # Errors
///
/// Returns an error if a row can't be read or has the wrong length
pub fn read_categories(
    source: &dyn RasterSource,
    progress: &ProgressBar,
) -> Result<Array2<Option<i32>>> {
    let (rows, cols) = source.dimensions();
    progress.set_length(rows as u64);

    let mut cells = Array2::from_elem((rows, cols), None);
    for (row, mut target) in cells.rows_mut().into_iter().enumerate() {
        let values = source.read_row(row)?;
        if values.len() != cols {
            return Err(AnalysisError::DimensionMismatch {
                what: "raster row",
                expected: (1, cols),
                found: (1, values.len()),
            });
        }
        for (slot, value) in target.iter_mut().zip(values) {
            *slot = value;
        }
        progress.inc(1);
    }

    Ok(cells)
}

/// Read `source` and classify its cells against `key_value`
///
/// # Errors
///
/// Returns an error if the raster can't be read
pub fn read_binary(
    source: &dyn RasterSource,
    key_value: i32,
    progress: &ProgressBar,
) -> Result<BinaryGrid> {
    let categories = read_categories(source, progress)?;
    Ok(BinaryGrid::from_categories(&categories, key_value))
}

/// Read a mask that must match `dims`; no source means an unrestricted mask
///
/// # Errors
///
/// Returns an error if the mask can't be read or its shape differs from `dims`
pub fn read_mask(
    source: Option<&dyn RasterSource>,
    dims: (usize, usize),
    progress: &ProgressBar,
) -> Result<MaskGrid> {
    let Some(source) = source else {
        return Ok(MaskGrid::unrestricted(dims));
    };

    let found = source.dimensions();
    if found != dims {
        return Err(AnalysisError::DimensionMismatch {
            what: "mask raster",
            expected: dims,
            found,
        });
    }

    let categories = read_categories(source, progress)?;
    Ok(MaskGrid::from_categories(&categories))
}

/// Stream a windowed result to `sink` in row order
///
/// # Errors
///
/// Returns an error if the sink rejects a row
pub fn write_windowed(
    grid: &WindowedGrid,
    sink: &mut dyn RasterSink,
    progress: &ProgressBar,
) -> Result<()> {
    progress.set_length(grid.dims().0 as u64);
    for (row, values) in grid.values().rows().into_iter().enumerate() {
        sink.put_row(row, &values.to_vec())?;
        progress.inc(1);
    }
    sink.finish()
}
