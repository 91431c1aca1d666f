//! Tests for connected-component labeling and dense renumbering

#[cfg(test)]
mod tests {
    use patchprob::algorithm::labeling::{LabelOptions, Labeling, label, label_classes};
    use patchprob::spatial::grid::{BinaryGrid, Coords, NO_FRAGMENT};
    use patchprob::spatial::neighborhood::Connectivity;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn grid(rows: &[&str]) -> BinaryGrid {
        let lines: Vec<Vec<u8>> = rows.iter().map(|row| row.bytes().collect()).collect();
        let dims = (lines.len(), lines.first().map_or(0, Vec::len));
        BinaryGrid::from_fn(dims, |[row, col]| lines[row][col] == b'#')
    }

    fn four() -> LabelOptions {
        LabelOptions::default()
    }

    fn eight() -> LabelOptions {
        LabelOptions {
            connectivity: Connectivity::Eight,
            ..LabelOptions::default()
        }
    }

    // Every patch cell is labeled exactly once and background is unlabeled
    fn assert_partition(binary: &BinaryGrid, labeling: &Labeling) {
        assert_eq!(labeling.labeled_cells(), binary.patch_count());
        for (index, &id) in labeling.ids.ids().indexed_iter() {
            let cell = [index.0, index.1];
            if binary.is_patch(cell) {
                assert!(id >= 0, "patch cell {cell:?} unlabeled");
                let fragment = &labeling.fragments[id as usize];
                assert!(fragment.cells.contains(&Coords::new(cell[0], cell[1])));
            } else {
                assert_eq!(id, NO_FRAGMENT);
            }
        }
    }

    // Tests a solid block forms one fragment
    #[test]
    fn test_single_block() {
        let binary = grid(&[".....", ".###.", ".###.", ".###.", "....."]);
        let labeling = label(&binary, &four());

        assert_eq!(labeling.fragment_count(), 1);
        assert_eq!(labeling.fragments[0].area(), 9);
        assert_eq!(labeling.fragments[0].cells[0], Coords::new(1, 1));
        assert_eq!(labeling.ids.raw([0, 0]), NO_FRAGMENT);
        assert_eq!(labeling.ids.fragment_at([2, 2]), Some(0));
        assert_partition(&binary, &labeling);
    }

    // Tests an all-background grid has no fragments
    #[test]
    fn test_empty_grid() {
        let binary = grid(&["...", "..."]);
        let labeling = label(&binary, &four());
        assert_eq!(labeling.fragment_count(), 0);
        assert!(labeling.ids.ids().iter().all(|&id| id == NO_FRAGMENT));
    }

    // Tests diagonal contact splits under 4 and joins under 8 connectivity
    #[test]
    fn test_diagonal_connectivity() {
        let binary = grid(&["#..", ".#.", "..#"]);
        assert_eq!(label(&binary, &four()).fragment_count(), 3);
        assert_eq!(label(&binary, &eight()).fragment_count(), 1);
    }

    // Tests ids are dense and follow row-major first appearance
    #[test]
    fn test_dense_first_appearance_ids() {
        let binary = grid(&["..#.#", "#....", "#.##."]);
        let labeling = label(&binary, &four());

        assert_eq!(labeling.fragment_count(), 4);
        assert_eq!(labeling.ids.raw([0, 2]), 0);
        assert_eq!(labeling.ids.raw([0, 4]), 1);
        assert_eq!(labeling.ids.raw([1, 0]), 2);
        assert_eq!(labeling.ids.raw([2, 0]), 2);
        assert_eq!(labeling.ids.raw([2, 3]), 3);
        for (expected, fragment) in labeling.fragments.iter().enumerate() {
            assert_eq!(fragment.id, expected);
        }
    }

    // Tests a U shape is one fragment even though its arms meet late in the scan
    #[test]
    fn test_u_shape_single_fragment() {
        let binary = grid(&["#...#", "#...#", "#####"]);
        let labeling = label(&binary, &four());
        assert_eq!(labeling.fragment_count(), 1);
        assert_eq!(labeling.fragments[0].area(), 9);
    }

    // Tests a large solid grid labels as one fragment without recursion limits
    #[test]
    fn test_large_solid_grid() {
        let binary = BinaryGrid::from_fn((300, 300), |_| true);
        let labeling = label(&binary, &four());
        assert_eq!(labeling.fragment_count(), 1);
        assert_eq!(labeling.fragments[0].area(), 90_000);
    }

    // Tests partition and connectivity hold on random grids
    #[test]
    fn test_random_grid_invariants() {
        let mut rng = StdRng::seed_from_u64(17);
        for connectivity in [Connectivity::Four, Connectivity::Eight] {
            let binary = BinaryGrid::from_fn((24, 31), |_| rng.random_bool(0.45));
            let options = LabelOptions {
                connectivity,
                ..LabelOptions::default()
            };
            let labeling = label(&binary, &options);
            assert_partition(&binary, &labeling);

            // Neighboring patch cells always share an id
            for (index, &id) in labeling.ids.ids().indexed_iter() {
                if id == NO_FRAGMENT {
                    continue;
                }
                for neighbor in connectivity.neighbors([index.0, index.1], binary.dims()) {
                    if binary.is_patch(neighbor) {
                        assert_eq!(labeling.ids.raw(neighbor), id);
                    }
                }
            }
        }
    }

    // Tests relabeling an existing labeling is a no-op
    #[test]
    fn test_relabel_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(5);
        let binary = BinaryGrid::from_fn((16, 16), |_| rng.random_bool(0.5));
        let labeling = label(&binary, &four());
        let again = label_classes(&labeling.ids, Connectivity::Four);
        assert_eq!(again, labeling);
    }

    // Tests equal ids that are not connected are split by relabeling
    #[test]
    fn test_label_classes_splits_disconnected_ids() {
        use patchprob::spatial::grid::FragmentGrid;

        let ids = FragmentGrid::from_array(ndarray::array![[4, -1, 4], [4, -1, 7]]);
        let labeling = label_classes(&ids, Connectivity::Four);
        assert_eq!(labeling.fragment_count(), 3);
        assert_eq!(labeling.ids.raw([0, 0]), 0);
        assert_eq!(labeling.ids.raw([0, 2]), 1);
        assert_eq!(labeling.ids.raw([1, 2]), 2);
    }
}
