use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over the cells of a grid
///
/// Cells are addressed by `[row, col]` and stored row-major.
/// Provides O(1) membership testing for flood-fill bookkeeping.
#[derive(Clone, Debug)]
pub struct CellBitset {
    bits: BitVec,
    dims: (usize, usize),
}

impl CellBitset {
    /// Create a bitset with no cells present
    pub fn new(dims: (usize, usize)) -> Self {
        Self {
            bits: bitvec![0; dims.0 * dims.1],
            dims,
        }
    }

    /// Insert a cell, returning whether it was newly added
    ///
    /// Out-of-range cells are ignored and reported as not added.
    pub fn insert(&mut self, cell: [usize; 2]) -> bool {
        let Some(index) = self.index(cell) else {
            return false;
        };
        let was_set = self.bits.replace(index, true);
        !was_set
    }

    /// Test cell membership
    pub fn contains(&self, cell: [usize; 2]) -> bool {
        self.index(cell)
            .is_some_and(|index| self.bits.get(index).is_some_and(|bit| *bit))
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all member cells in row-major order
    pub fn to_vec(&self) -> Vec<[usize; 2]> {
        let cols = self.dims.1;
        self.bits
            .iter_ones()
            .map(|index| [index / cols, index % cols])
            .collect()
    }

    const fn index(&self, cell: [usize; 2]) -> Option<usize> {
        if cell[0] < self.dims.0 && cell[1] < self.dims.1 {
            Some(cell[0] * self.dims.1 + cell[1])
        } else {
            None
        }
    }
}

impl fmt::Display for CellBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CellBitset({} of {}x{} cells)",
            self.count(),
            self.dims.0,
            self.dims.1
        )
    }
}
