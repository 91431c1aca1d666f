//! Cell neighborhood policies for connected-component labeling

use std::fmt;

const FOUR: [[isize; 2]; 4] = [[-1, 0], [0, -1], [0, 1], [1, 0]];
const EIGHT: [[isize; 2]; 8] = [
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// Which neighbors of a cell count as touching it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Edge-sharing neighbors only (rook's case)
    #[default]
    Four,
    /// Edge- and corner-sharing neighbors (queen's case)
    Eight,
}

impl Connectivity {
    /// Row/column offsets of the neighbors
    pub const fn offsets(self) -> &'static [[isize; 2]] {
        match self {
            Self::Four => &FOUR,
            Self::Eight => &EIGHT,
        }
    }

    /// In-bounds neighbors of `[row, col]` in a grid of `dims` (rows, cols)
    pub fn neighbors(
        self,
        cell: [usize; 2],
        dims: (usize, usize),
    ) -> impl Iterator<Item = [usize; 2]> {
        self.offsets()
            .iter()
            .filter_map(move |&offset| offset_cell(cell, offset, dims))
    }

    /// Parse the numeric form used on the command line ("4" or "8")
    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            _ => None,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Four => write!(f, "4"),
            Self::Eight => write!(f, "8"),
        }
    }
}

/// Apply a signed offset to a cell, returning `None` outside the grid
pub fn offset_cell(
    cell: [usize; 2],
    offset: [isize; 2],
    dims: (usize, usize),
) -> Option<[usize; 2]> {
    let row = cell[0].checked_add_signed(offset[0])?;
    let col = cell[1].checked_add_signed(offset[1])?;
    (row < dims.0 && col < dims.1).then_some([row, col])
}
