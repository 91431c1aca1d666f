//! Distance merge of connected components
//!
//! Two components are joined when some pair of their boundary cells is at
//! most `merge_distance` apart (Euclidean, cell centers) and the rasterized
//! line between the pair crosses only background cells. Candidate pairs are
//! found by scanning the disk of radius `merge_distance` around each
//! boundary cell, which bounds the search to nearby cells only.
//!
//! A gap spanned by a third component is not a clear line, but the third
//! component is then itself within range of both ends and joins them
//! transitively.

use crate::algorithm::disjoint::DisjointSets;
use crate::algorithm::labeling::Components;
use crate::spatial::grid::{BinaryGrid, Coords};
use crate::spatial::line::rasterize_line;
use crate::spatial::neighborhood::{Connectivity, offset_cell};

/// Union the components of `components` lying within `merge_distance`
///
/// Returns singleton sets when the distance is not positive or there is
/// nothing to merge.
pub fn merge_within_distance(
    binary: &BinaryGrid,
    components: &Components,
    merge_distance: f64,
) -> DisjointSets {
    let mut groups = DisjointSets::new(components.cells.len());
    if !merge_distance.is_finite() || merge_distance <= 0.0 || components.cells.len() < 2 {
        return groups;
    }

    let dims = binary.dims();
    // No offset wider than the grid's longer side can land on a cell
    let reach = dims.0.max(dims.1).saturating_sub(1);
    let offsets = disk_offsets(merge_distance, reach);
    let mut remaining = components.cells.len();

    'scan: for (id, cells) in components.cells.iter().enumerate() {
        for &from in cells.iter().filter(|c| is_boundary(binary, c.index())) {
            for &offset in &offsets {
                let Some(to) = offset_cell(from.index(), offset, dims) else {
                    continue;
                };
                let Some(other) = components
                    .ids
                    .get(to)
                    .and_then(|&raw| usize::try_from(raw).ok())
                else {
                    continue;
                };

                // Each unordered pair is tested from its lower id only
                if other <= id || groups.connected(id, other) || !is_boundary(binary, to) {
                    continue;
                }

                if gap_is_clear(binary, from, Coords::new(to[0], to[1])) && groups.union(id, other)
                {
                    remaining -= 1;
                    if remaining == 1 {
                        break 'scan;
                    }
                }
            }
        }
    }

    groups
}

/// Offsets within Euclidean distance `radius`, nearest first, origin excluded
///
/// The integer radius is capped at `cap` so huge distances stay bounded by
/// the grid extent.
pub fn disk_offsets(radius: f64, cap: usize) -> Vec<[isize; 2]> {
    if !radius.is_finite() || radius <= 0.0 {
        return Vec::new();
    }

    let reach = (radius.floor() as usize).min(cap) as isize;
    let limit = radius * radius;
    let mut offsets = Vec::new();
    for dr in -reach..=reach {
        for dc in -reach..=reach {
            if (dr, dc) != (0, 0) && ((dr * dr + dc * dc) as f64) <= limit {
                offsets.push([dr, dc]);
            }
        }
    }
    offsets.sort_by_key(|&[dr, dc]| (dr * dr + dc * dc, dr, dc));
    offsets
}

/// Patch cell with a background or off-grid 4-neighbor
pub fn is_boundary(binary: &BinaryGrid, cell: [usize; 2]) -> bool {
    if !binary.is_patch(cell) {
        return false;
    }
    Connectivity::Four.offsets().iter().any(|&offset| {
        offset_cell(cell, offset, binary.dims()).is_none_or(|neighbor| !binary.is_patch(neighbor))
    })
}

/// Whether every cell strictly between `from` and `to` is background
pub fn gap_is_clear(binary: &BinaryGrid, from: Coords, to: Coords) -> bool {
    let ends = [from.signed(), to.signed()];
    rasterize_line(from.signed(), to.signed())
        .filter(|cell| !ends.contains(cell))
        .all(|[row, col]| {
            match (usize::try_from(row), usize::try_from(col)) {
                (Ok(row), Ok(col)) => !binary.is_patch([row, col]),
                _ => true,
            }
        })
}
