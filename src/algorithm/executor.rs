use crate::{
    algorithm::labeling::{LabelOptions, label},
    algorithm::window::{Analysis, AnalysisParams, analyze},
    io::configuration::DEFAULT_CONNECTIVITY,
    io::error::{AnalysisError, Result, invalid_parameter},
    io::progress::ProgressManager,
    io::raster::{RasterSource, read_binary, read_mask},
    spatial::grid::{BinaryGrid, MaskGrid},
    spatial::neighborhood::Connectivity,
};

/// Parameters of a complete analysis run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Category value marking patch cells
    pub key_value: i32,
    /// Point pairs drawn per estimate
    pub trials: usize,
    /// Window side; `None` or `Some(0)` analyzes the whole grid
    pub window_size: Option<usize>,
    /// Largest gap bridged between fragments; zero disables merging
    pub merge_distance: f64,
    /// Only place points on patch cells
    pub patch_only: bool,
    /// Neighborhood of the connected-component pass
    pub connectivity: Connectivity,
    /// Run seed
    pub seed: u64,
}

impl AnalysisConfig {
    /// Whole-grid configuration with merging disabled
    pub const fn new(key_value: i32, trials: usize, seed: u64) -> Self {
        Self {
            key_value,
            trials,
            window_size: None,
            merge_distance: 0.0,
            patch_only: false,
            connectivity: DEFAULT_CONNECTIVITY,
            seed,
        }
    }

    /// Check parameters before any raster is touched
    ///
    /// # Errors
    ///
    /// Returns an error if the trial count is zero or the merge distance is
    /// negative or not finite
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(invalid_parameter(
                "trials",
                &self.trials,
                &"at least one trial is required",
            ));
        }
        if !self.merge_distance.is_finite() || self.merge_distance < 0.0 {
            return Err(invalid_parameter(
                "distance",
                &self.merge_distance,
                &"must be a finite, non-negative number",
            ));
        }
        Ok(())
    }

    /// Whether the run produces a result grid
    pub fn is_windowed(&self) -> bool {
        self.window_size.is_some_and(|size| size > 0)
    }

    /// Options for the labeler
    pub const fn label_options(&self) -> LabelOptions {
        LabelOptions {
            merge_distance: self.merge_distance,
            connectivity: self.connectivity,
        }
    }

    /// Options for the windowed analyzer
    pub const fn analysis_params(&self) -> AnalysisParams {
        AnalysisParams {
            trials: self.trials,
            window_size: self.window_size,
            patch_only: self.patch_only,
            seed: self.seed,
        }
    }
}

/// Summary and result of a run
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisReport {
    /// Grid dimensions (rows, cols)
    pub dimensions: (usize, usize),
    /// Number of cells matching the key value
    pub patch_cells: usize,
    /// Number of fragments after merging
    pub fragment_count: usize,
    /// Probability estimate(s)
    pub analysis: Analysis,
}

/// Read, label and sample a category raster
#[derive(Clone, Debug)]
pub struct ProbabilityAnalysis {
    config: AnalysisConfig,
}

impl ProbabilityAnalysis {
    /// Create an analysis from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run on raster sources
    ///
    /// # Errors
    ///
    /// Returns an error if a raster can't be read or the mask shape differs
    /// from the input
    pub fn run(
        &self,
        input: &dyn RasterSource,
        mask: Option<&dyn RasterSource>,
        progress: &ProgressManager,
    ) -> Result<AnalysisReport> {
        let dims = input.dimensions();

        let bar = progress.stage("Reading map", dims.0 as u64);
        let binary = read_binary(input, self.config.key_value, &bar)?;
        bar.finish();

        let mask_grid = if let Some(source) = mask {
            let bar = progress.stage("Reading mask", dims.0 as u64);
            let grid = read_mask(Some(source), dims, &bar)?;
            bar.finish();
            grid
        } else {
            MaskGrid::unrestricted(dims)
        };

        self.run_grids(&binary, &mask_grid, progress)
    }

    /// Run on grids already in memory
    ///
    /// # Errors
    ///
    /// Returns an error if the mask shape differs from the binary grid
    pub fn run_grids(
        &self,
        binary: &BinaryGrid,
        mask: &MaskGrid,
        progress: &ProgressManager,
    ) -> Result<AnalysisReport> {
        let dimensions = binary.dims();
        if mask.dims() != dimensions {
            return Err(AnalysisError::DimensionMismatch {
                what: "mask grid",
                expected: dimensions,
                found: mask.dims(),
            });
        }

        let labeling = label(binary, &self.config.label_options());
        progress.message(&format!(
            "Found {} fragment(s) in {} patch cell(s)",
            labeling.fragment_count(),
            labeling.labeled_cells()
        ));

        let bar = progress.stage("Performing analysis", 1);
        let analysis = analyze(
            &labeling.ids,
            mask,
            &self.config.analysis_params(),
            &bar,
        );
        bar.finish();

        Ok(AnalysisReport {
            dimensions,
            patch_cells: labeling.labeled_cells(),
            fragment_count: labeling.fragment_count(),
            analysis,
        })
    }
}
