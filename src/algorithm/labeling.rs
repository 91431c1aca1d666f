//! Fragment labeling of patch cells
//!
//! Labeling runs in three passes:
//! 1. connected components by explicit-stack flood fill, ids in row-major
//!    discovery order
//! 2. optional distance merge of components whose boundary cells lie within
//!    the merge distance of each other (see [`crate::algorithm::merge`])
//! 3. dense renumbering of the merged groups by first appearance

use crate::algorithm::bitset::CellBitset;
use crate::algorithm::disjoint::DisjointSets;
use crate::algorithm::merge::merge_within_distance;
use crate::io::configuration::DEFAULT_CONNECTIVITY;
use crate::spatial::grid::{BinaryGrid, Coords, FragmentGrid, NO_FRAGMENT};
use crate::spatial::neighborhood::Connectivity;
use ndarray::Array2;

/// A group of patch cells treated as one habitat fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Dense identifier, `0..fragment_count`
    pub id: usize,
    /// Member cells in row-major order
    pub cells: Vec<Coords>,
}

impl Fragment {
    /// Number of cells in the fragment
    pub fn area(&self) -> usize {
        self.cells.len()
    }
}

/// Parameters of the labeling passes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOptions {
    /// Largest gap, in cell-center distance, bridged between fragments
    ///
    /// Zero (or any non-positive value) disables merging.
    pub merge_distance: f64,
    /// Neighborhood used by the connected-component pass
    pub connectivity: Connectivity,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            merge_distance: 0.0,
            connectivity: DEFAULT_CONNECTIVITY,
        }
    }
}

/// Output of the labeler: per-cell ids plus the fragment list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeling {
    /// Fragment id of every cell
    pub ids: FragmentGrid,
    /// Fragments ordered by id
    pub fragments: Vec<Fragment>,
}

impl Labeling {
    /// Number of fragments
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Total number of labeled cells
    pub fn labeled_cells(&self) -> usize {
        self.fragments.iter().map(Fragment::area).sum()
    }
}

/// Connected components before renumbering
#[derive(Debug, Clone)]
pub struct Components {
    /// Provisional component id of every cell, `NO_FRAGMENT` for background
    pub ids: Array2<i32>,
    /// Cells of each component in row-major order, indexed by provisional id
    pub cells: Vec<Vec<Coords>>,
}

/// Partition the patch cells of `binary` into fragments
pub fn label(binary: &BinaryGrid, options: &LabelOptions) -> Labeling {
    let components = connected_components(binary.cells(), &0, options.connectivity);
    let groups = merge_within_distance(binary, &components, options.merge_distance);
    finalize(binary.dims(), components, groups)
}

/// Relabel an existing id grid, treating each id as its own category
///
/// Cells sharing an id but not connected under `connectivity` end up in
/// different fragments.
pub fn label_classes(ids: &FragmentGrid, connectivity: Connectivity) -> Labeling {
    let components = connected_components(ids.ids(), &NO_FRAGMENT, connectivity);
    let groups = DisjointSets::new(components.cells.len());
    finalize(ids.dims(), components, groups)
}

/// Group equal-valued, non-background cells into connected components
///
/// Uses an explicit work stack, so component size is bounded only by memory.
pub fn connected_components<T: PartialEq>(
    values: &Array2<T>,
    background: &T,
    connectivity: Connectivity,
) -> Components {
    let dims = values.dim();
    let mut visited = CellBitset::new(dims);
    let mut ids = Array2::from_elem(dims, NO_FRAGMENT);
    let mut cells = Vec::new();
    let mut stack = Vec::new();

    for ((row, col), value) in values.indexed_iter() {
        if value == background || !visited.insert([row, col]) {
            continue;
        }

        let id = cells.len() as i32;
        let mut members = Vec::new();
        stack.push([row, col]);

        while let Some(cell) = stack.pop() {
            if let Some(slot) = ids.get_mut(cell) {
                *slot = id;
            }
            members.push(Coords::new(cell[0], cell[1]));

            for neighbor in connectivity.neighbors(cell, dims) {
                if values.get(neighbor) == Some(value) && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        members.sort_unstable();
        cells.push(members);
    }

    Components { ids, cells }
}

// Renumber merged groups by first appearance of any member component
fn finalize(dims: (usize, usize), components: Components, mut groups: DisjointSets) -> Labeling {
    let mut dense_ids: Vec<Option<usize>> = vec![None; components.cells.len()];
    let mut fragments: Vec<Fragment> = Vec::new();

    for (provisional, members) in components.cells.into_iter().enumerate() {
        let root = groups.find(provisional);
        let id = if let Some(id) = dense_ids.get(root).copied().flatten() {
            id
        } else {
            let id = fragments.len();
            if let Some(slot) = dense_ids.get_mut(root) {
                *slot = Some(id);
            }
            fragments.push(Fragment {
                id,
                cells: Vec::new(),
            });
            id
        };

        if let Some(fragment) = fragments.get_mut(id) {
            fragment.cells.extend(members);
        }
    }

    let mut ids = FragmentGrid::empty(dims);
    for fragment in &mut fragments {
        fragment.cells.sort_unstable();
        for cell in &fragment.cells {
            ids.set(cell.index(), fragment.id as i32);
        }
    }

    Labeling { ids, fragments }
}
