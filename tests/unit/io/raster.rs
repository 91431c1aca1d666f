//! Tests for row-oriented raster sources and sinks

#[cfg(test)]
mod tests {
    use indicatif::ProgressBar;
    use ndarray::{Array2, array};
    use patchprob::AnalysisError;
    use patchprob::algorithm::window::{Analysis, AnalysisParams, analyze};
    use patchprob::io::raster::{
        CategoryRaster, RasterSink, RasterSource, read_binary, read_categories, read_mask,
        write_windowed,
    };
    use patchprob::spatial::grid::{FragmentGrid, MaskGrid};

    // Source whose rows are one cell short
    struct ShortRows;

    impl RasterSource for ShortRows {
        fn dimensions(&self) -> (usize, usize) {
            (2, 3)
        }

        fn read_row(&self, _row: usize) -> patchprob::Result<Vec<Option<i32>>> {
            Ok(vec![Some(1), Some(1)])
        }
    }

    #[derive(Default)]
    struct CollectRows {
        rows: Vec<(usize, Vec<Option<f64>>)>,
        finished: bool,
    }

    impl RasterSink for CollectRows {
        fn put_row(&mut self, row: usize, values: &[Option<f64>]) -> patchprob::Result<()> {
            self.rows.push((row, values.to_vec()));
            Ok(())
        }

        fn finish(&mut self) -> patchprob::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    // Tests in-memory rasters hand out rows and reject bad indices
    #[test]
    fn test_category_raster_rows() {
        let raster = CategoryRaster::from_values(&array![[1, 2], [3, 4], [5, 6]]);
        assert_eq!(raster.dimensions(), (3, 2));
        assert_eq!(raster.read_row(1).expect("row 1"), vec![Some(3), Some(4)]);
        assert!(matches!(
            raster.read_row(3),
            Err(AnalysisError::RowOutOfRange { row: 3, rows: 3 })
        ));
    }

    // Tests reading classifies against the key value
    #[test]
    fn test_read_binary() {
        let raster = CategoryRaster::new(array![[Some(7), None], [Some(1), Some(7)]]);
        let binary = read_binary(&raster, 7, &ProgressBar::hidden()).expect("readable");
        assert_eq!(binary.cells(), &array![[1_u8, 0], [0, 1]]);
    }

    // Tests rows of the wrong length are rejected
    #[test]
    fn test_short_rows_rejected() {
        let result = read_categories(&ShortRows, &ProgressBar::hidden());
        assert!(matches!(
            result,
            Err(AnalysisError::DimensionMismatch {
                what: "raster row",
                ..
            })
        ));
    }

    // Tests mask reading with and without a source
    #[test]
    fn test_read_mask() {
        let bar = ProgressBar::hidden();
        assert_eq!(
            read_mask(None, (2, 2), &bar).expect("no mask"),
            MaskGrid::unrestricted((2, 2))
        );

        let source = CategoryRaster::new(array![[Some(1), Some(0)], [None, Some(3)]]);
        let mask = read_mask(Some(&source), (2, 2), &bar).expect("matching mask");
        assert!(mask.allows([0, 0]));
        assert!(!mask.allows([0, 1]));
        assert!(!mask.allows([1, 0]));
        assert!(mask.allows([1, 1]));

        assert!(matches!(
            read_mask(Some(&source), (3, 2), &bar),
            Err(AnalysisError::DimensionMismatch {
                what: "mask raster",
                ..
            })
        ));
    }

    // Tests windowed results are written in row order and finished
    #[test]
    fn test_write_windowed() {
        let ids = FragmentGrid::from_array(Array2::zeros((4, 3)));
        let params = AnalysisParams {
            trials: 10,
            window_size: Some(3),
            patch_only: false,
            seed: 1,
        };
        let Analysis::Windowed(grid) = analyze(
            &ids,
            &MaskGrid::unrestricted((4, 3)),
            &params,
            &ProgressBar::hidden(),
        ) else {
            panic!("expected a windowed result");
        };

        let mut sink = CollectRows::default();
        write_windowed(&grid, &mut sink, &ProgressBar::hidden()).expect("sink accepts rows");

        assert!(sink.finished);
        assert_eq!(sink.rows.len(), 4);
        assert_eq!(sink.rows[0], (0, vec![None, None, None]));
        assert_eq!(sink.rows[1], (1, vec![None, Some(1.0), None]));
        assert_eq!(sink.rows[3].0, 3);
    }
}
