//! Dense grids shared by labeling and sampling
//!
//! All grids are row-major `ndarray` arrays indexed `[row, col]`. They are
//! built once at the I/O boundary and only read afterwards, which is what
//! lets the windowed analyzer share them across worker threads.

use ndarray::Array2;

/// Fragment id stored for background cells
pub const NO_FRAGMENT: i32 = -1;

/// Row/column position of a cell
///
/// Ordering is row-major, matching the scan order used everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coords {
    /// Row index, 0 at the top of the grid
    pub row: usize,
    /// Column index, 0 at the left of the grid
    pub col: usize,
}

impl Coords {
    /// Create a coordinate pair
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index form accepted by `ndarray`
    pub const fn index(self) -> [usize; 2] {
        [self.row, self.col]
    }

    /// Signed form used by the line rasterizer
    pub const fn signed(self) -> [i64; 2] {
        [self.row as i64, self.col as i64]
    }

    /// Squared Euclidean distance between cell centers
    pub const fn distance_squared(self, other: Self) -> u64 {
        let dr = self.row.abs_diff(other.row) as u64;
        let dc = self.col.abs_diff(other.col) as u64;
        dr * dr + dc * dc
    }
}

/// Patch/background classification of every cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryGrid {
    cells: Array2<u8>,
}

impl BinaryGrid {
    /// Wrap an array of 0/1 values; any non-zero entry counts as patch
    pub fn from_array(cells: Array2<u8>) -> Self {
        Self {
            cells: cells.mapv(|v| u8::from(v != 0)),
        }
    }

    /// Classify raw categories against the key value; null cells are background
    pub fn from_categories(categories: &Array2<Option<i32>>, key_value: i32) -> Self {
        Self {
            cells: categories.mapv(|v| u8::from(v == Some(key_value))),
        }
    }

    /// Build from a predicate over `[row, col]`
    pub fn from_fn(dims: (usize, usize), mut is_patch: impl FnMut([usize; 2]) -> bool) -> Self {
        Self {
            cells: Array2::from_shape_fn(dims, |(row, col)| u8::from(is_patch([row, col]))),
        }
    }

    /// Grid dimensions (rows, cols)
    pub fn dims(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Whether the cell is a patch cell; out-of-range cells are background
    pub fn is_patch(&self, cell: [usize; 2]) -> bool {
        self.cells.get(cell).is_some_and(|&v| v == 1)
    }

    /// Number of patch cells
    pub fn patch_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 1).count()
    }

    /// Underlying 0/1 array
    pub const fn cells(&self) -> &Array2<u8> {
        &self.cells
    }
}

/// Cells where random points may be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskGrid {
    cells: Array2<u8>,
}

impl MaskGrid {
    /// A mask allowing every cell
    pub fn unrestricted(dims: (usize, usize)) -> Self {
        Self {
            cells: Array2::ones(dims),
        }
    }

    /// Wrap an array where non-zero entries allow sampling
    pub fn from_array(cells: Array2<u8>) -> Self {
        Self {
            cells: cells.mapv(|v| u8::from(v != 0)),
        }
    }

    /// Convert raw mask categories; zero and null cells are excluded
    pub fn from_categories(categories: &Array2<Option<i32>>) -> Self {
        Self {
            cells: categories.mapv(|v| u8::from(v.is_some_and(|c| c != 0))),
        }
    }

    /// Grid dimensions (rows, cols)
    pub fn dims(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Whether a point may be placed on the cell
    pub fn allows(&self, cell: [usize; 2]) -> bool {
        self.cells.get(cell).is_some_and(|&v| v == 1)
    }
}

/// Owning fragment of every cell, `NO_FRAGMENT` for background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentGrid {
    ids: Array2<i32>,
}

impl FragmentGrid {
    /// A grid with every cell set to `NO_FRAGMENT`
    pub fn empty(dims: (usize, usize)) -> Self {
        Self {
            ids: Array2::from_elem(dims, NO_FRAGMENT),
        }
    }

    /// Wrap raw ids; negative values are normalised to `NO_FRAGMENT`
    pub fn from_array(ids: Array2<i32>) -> Self {
        Self {
            ids: ids.mapv(|v| v.max(NO_FRAGMENT)),
        }
    }

    /// Grid dimensions (rows, cols)
    pub fn dims(&self) -> (usize, usize) {
        self.ids.dim()
    }

    /// Raw id at a cell, `NO_FRAGMENT` for background or out-of-range cells
    pub fn raw(&self, cell: [usize; 2]) -> i32 {
        self.ids.get(cell).copied().unwrap_or(NO_FRAGMENT)
    }

    /// Fragment id at a cell, if any
    pub fn fragment_at(&self, cell: [usize; 2]) -> Option<usize> {
        usize::try_from(self.raw(cell)).ok()
    }

    /// Underlying id array
    pub const fn ids(&self) -> &Array2<i32> {
        &self.ids
    }

    pub(crate) fn set(&mut self, cell: [usize; 2], id: i32) {
        if let Some(slot) = self.ids.get_mut(cell) {
            *slot = id;
        }
    }
}

/// Rectangular block of cells sampled as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Top row
    pub row: usize,
    /// Left column
    pub col: usize,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl Region {
    /// Create a region from its top-left corner and size
    pub const fn new(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self {
            row,
            col,
            rows,
            cols,
        }
    }

    /// The whole grid
    pub const fn whole(dims: (usize, usize)) -> Self {
        Self::new(0, 0, dims.0, dims.1)
    }

    /// Square window of side `size` with top-left corner `[row, col]`
    pub const fn window(row: usize, col: usize, size: usize) -> Self {
        Self::new(row, col, size, size)
    }

    /// Intersection with a grid of `dims`
    #[must_use]
    pub fn clipped(self, dims: (usize, usize)) -> Self {
        let row = self.row.min(dims.0);
        let col = self.col.min(dims.1);
        let rows = self.rows.min(dims.0 - row);
        let cols = self.cols.min(dims.1 - col);
        Self::new(row, col, rows, cols)
    }

    /// Number of cells
    pub const fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the region covers no cells
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `[row, col]` lies inside the region
    pub const fn contains(&self, cell: [usize; 2]) -> bool {
        cell[0] >= self.row
            && cell[0] < self.row + self.rows
            && cell[1] >= self.col
            && cell[1] < self.col + self.cols
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = [usize; 2]> {
        let (row, col, cols) = (self.row, self.col, self.cols);
        (row..row + self.rows).flat_map(move |r| (col..col + cols).map(move |c| [r, c]))
    }
}
