//! Whole-grid and sliding-window probability analysis
//!
//! In windowed mode every `w × w` window that fits inside the grid is sampled
//! independently and its value is stored at the window center, so the result
//! has the input's shape with null margins of `w / 2` cells on the top and
//! left (and `w - 1 - w / 2` on the bottom and right).

use crate::algorithm::sampler::{SampleOptions, SampleOutcome, sample};
use crate::math::streams::stream_rng;
use crate::spatial::grid::{FragmentGrid, MaskGrid, Region};
use indicatif::ProgressBar;
use ndarray::{Array2, ArrayView2, Axis, Slice};
use rayon::prelude::*;

/// Parameters of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisParams {
    /// Point pairs drawn per estimate
    pub trials: usize,
    /// Window side; `None` or `Some(0)` analyzes the whole grid at once
    pub window_size: Option<usize>,
    /// Only place points on patch cells
    pub patch_only: bool,
    /// Run seed from which every window's random stream is derived
    pub seed: u64,
}

impl AnalysisParams {
    /// Window side if the run is windowed
    pub fn window(&self) -> Option<usize> {
        self.window_size.filter(|&size| size > 0)
    }

    const fn sample_options(&self) -> SampleOptions {
        SampleOptions {
            trials: self.trials,
            patch_only: self.patch_only,
        }
    }
}

/// Result of an analysis run
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// One estimate over the whole grid
    Whole(SampleOutcome),
    /// One estimate per window position
    Windowed(WindowedGrid),
}

impl Analysis {
    /// Probability of a whole-grid run, `None` for windowed runs or null results
    pub fn scalar(&self) -> Option<f64> {
        match self {
            Self::Whole(outcome) => outcome.probability(),
            Self::Windowed(_) => None,
        }
    }

    /// Trials discarded because a point could not be placed within the redraw limit
    pub const fn skipped_trials(&self) -> usize {
        match self {
            Self::Whole(outcome) => outcome.skipped,
            Self::Windowed(grid) => grid.skipped_trials,
        }
    }
}

/// Per-window probabilities placed at window centers
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedGrid {
    values: Array2<Option<f64>>,
    window: usize,
    skipped_trials: usize,
}

impl WindowedGrid {
    /// Values in input shape; `None` marks margins and windows without counted trials
    pub const fn values(&self) -> &Array2<Option<f64>> {
        &self.values
    }

    /// Dimensions (rows, cols), equal to the input grid's
    pub fn dims(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Window side
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Null rows/columns before the first window center
    pub const fn margin(&self) -> usize {
        self.window / 2
    }

    /// Number of window positions (rows, cols): `(rows - w + 1, cols - w + 1)`
    pub fn window_counts(&self) -> (usize, usize) {
        let (rows, cols) = self.dims();
        window_counts((rows, cols), self.window)
    }

    /// The block of window centers, one value per window position
    pub fn interior(&self) -> ArrayView2<'_, Option<f64>> {
        let (ny, nx) = self.window_counts();
        let m = self.margin();
        let (rows, cols) = if ny == 0 || nx == 0 {
            (0..0, 0..0)
        } else {
            (m..m + ny, m..m + nx)
        };
        self.values
            .slice_axis(Axis(0), Slice::from(rows))
            .slice_axis_move(Axis(1), Slice::from(cols))
    }

    /// Trials skipped across all windows
    pub const fn skipped_trials(&self) -> usize {
        self.skipped_trials
    }
}

/// Window positions (rows, cols) fitting a grid of `dims`
pub const fn window_counts(dims: (usize, usize), window: usize) -> (usize, usize) {
    (
        (dims.0 + 1).saturating_sub(window),
        (dims.1 + 1).saturating_sub(window),
    )
}

/// Run the estimator over the whole grid or every window position
///
/// `progress` advances once per window row; pass a hidden bar to stay silent.
pub fn analyze(
    ids: &FragmentGrid,
    mask: &MaskGrid,
    params: &AnalysisParams,
    progress: &ProgressBar,
) -> Analysis {
    let options = params.sample_options();

    let Some(window) = params.window() else {
        let mut rng = stream_rng(params.seed, 0);
        let outcome = sample(ids, mask, Region::whole(ids.dims()), &options, &mut rng);
        progress.inc(1);
        return Analysis::Whole(outcome);
    };

    let dims = ids.dims();
    let (ny, nx) = window_counts(dims, window);
    progress.set_length(ny as u64);

    // Rows of windows run in parallel; each window owns its random stream
    let rows: Vec<Vec<SampleOutcome>> = (0..ny)
        .into_par_iter()
        .map(|wr| {
            let row = (0..nx)
                .map(|wc| {
                    let mut rng = stream_rng(params.seed, (wr * nx + wc) as u64);
                    sample(ids, mask, Region::window(wr, wc, window), &options, &mut rng)
                })
                .collect();
            progress.inc(1);
            row
        })
        .collect();

    let margin = window / 2;
    let mut values = Array2::from_elem(dims, None);
    let mut skipped_trials = 0;
    for (wr, row) in rows.into_iter().enumerate() {
        for (wc, outcome) in row.into_iter().enumerate() {
            skipped_trials += outcome.skipped;
            if let Some(slot) = values.get_mut([wr + margin, wc + margin]) {
                *slot = outcome.probability();
            }
        }
    }

    Analysis::Windowed(WindowedGrid {
        values,
        window,
        skipped_trials,
    })
}
