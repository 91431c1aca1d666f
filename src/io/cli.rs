//! Command-line interface for the patch co-occurrence analysis

use crate::algorithm::executor::{AnalysisConfig, AnalysisReport, ProbabilityAnalysis};
use crate::algorithm::window::{Analysis, WindowedGrid};
use crate::io::ascii::{AsciiGridWriter, read_ascii_grid};
use crate::io::configuration::{DEFAULT_CONNECTIVITY, OUTPUT_PRECISION};
use crate::io::error::{AnalysisError, Result, invalid_parameter};
use crate::io::image::{is_image_path, read_category_image};
use crate::io::progress::ProgressManager;
use crate::io::raster::{CategoryRaster, RasterSource, write_windowed};
use crate::math::streams::clock_seed;
use crate::spatial::neighborhood::Connectivity;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "patchprob")]
#[command(
    author,
    version,
    about = "Probability of two random points falling in the same patch"
)]
/// Command-line arguments for the analysis tool
pub struct Cli {
    /// Category raster to analyze (ASCII grid or grayscale image)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output ASCII grid, required with --size
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Mask raster; points are only placed on non-zero cells
    #[arg(short, long)]
    pub mask: Option<PathBuf>,

    /// Category value of the patches
    #[arg(short, long, allow_negative_numbers = true)]
    pub keyval: i32,

    /// Number of point pairs drawn per estimate
    #[arg(short = 'n', long)]
    pub trials: usize,

    /// Side of the moving window; omit or 0 for a single whole-map estimate
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Maximum distance at which two patches are seen as one
    #[arg(short, long)]
    pub distance: Option<f64>,

    /// Only place test points in patches
    #[arg(short, long)]
    pub patch_only: bool,

    /// Cell neighborhood for connecting patch cells (4 or 8)
    #[arg(short, long, default_value_t = DEFAULT_CONNECTIVITY, value_parser = parse_connectivity)]
    pub connectivity: Connectivity,

    /// Random seed; taken from the clock when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_connectivity(value: &str) -> std::result::Result<Connectivity, String> {
    value
        .parse::<u8>()
        .ok()
        .and_then(Connectivity::from_count)
        .ok_or_else(|| format!("connectivity must be 4 or 8, got '{value}'"))
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Analysis configuration for the given run seed
    pub fn analysis_config(&self, seed: u64) -> AnalysisConfig {
        AnalysisConfig {
            window_size: self.size,
            merge_distance: self.distance.unwrap_or(0.0),
            patch_only: self.patch_only,
            connectivity: self.connectivity,
            ..AnalysisConfig::new(self.keyval, self.trials, seed)
        }
    }
}

/// Open a category raster, choosing the reader from the file extension
///
/// # Errors
///
/// Returns an error if the file is missing or can't be parsed
pub fn open_raster(path: &Path) -> Result<CategoryRaster> {
    if !path.is_file() {
        return Err(AnalysisError::FileSystem {
            path: path.to_path_buf(),
            operation: "open raster",
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "raster map not found"),
        });
    }

    if is_image_path(path) {
        read_category_image(path)
    } else {
        read_ascii_grid(path)
    }
}

/// Console line for a whole-map result
pub fn format_scalar(value: Option<f64>) -> String {
    value.map_or_else(
        || "output = null".to_string(),
        |v| format!("output = {v:.precision$}", precision = OUTPUT_PRECISION),
    )
}

/// Runs one analysis from command-line arguments
pub struct FileProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl FileProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = ProgressManager::new(!cli.should_show_progress());
        Self {
            cli,
            progress_manager,
        }
    }

    /// Validate arguments, run the analysis and emit the result
    ///
    /// Every parameter and both rasters are checked before sampling starts.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is invalid, a raster can't be read,
    /// or the output can't be written
    // Allow print for the whole-map result, which is the tool's output
    #[allow(clippy::print_stdout)]
    pub fn process(&mut self) -> Result<AnalysisReport> {
        let seed = self.cli.seed.unwrap_or_else(clock_seed);
        let analysis = ProbabilityAnalysis::new(self.cli.analysis_config(seed))?;

        let output = if analysis.config().is_windowed() {
            let path = self.cli.output.clone().ok_or_else(|| {
                invalid_parameter("output", &"<none>", &"required when --size is set")
            })?;
            Some(path)
        } else {
            None
        };

        let input = open_raster(&self.cli.input)?;
        let mask = self.cli.mask.as_deref().map(open_raster).transpose()?;

        if self.cli.seed.is_none() {
            self.progress_manager.message(&format!("Using seed {seed}"));
        }

        let report = analysis.run(
            &input,
            mask.as_ref().map(|m| m as &dyn RasterSource),
            &self.progress_manager,
        )?;

        let skipped = report.analysis.skipped_trials();
        if skipped > 0 {
            self.progress_manager.message(&format!(
                "{skipped} trial(s) skipped: no eligible point within the redraw limit"
            ));
        }

        match &report.analysis {
            Analysis::Whole(outcome) => println!("{}", format_scalar(outcome.probability())),
            Analysis::Windowed(grid) => {
                if let Some(path) = output.as_deref() {
                    self.write_grid(grid, path)?;
                }
            }
        }

        self.progress_manager.finish();
        Ok(report)
    }

    fn write_grid(&self, grid: &WindowedGrid, path: &Path) -> Result<()> {
        let mut writer = AsciiGridWriter::create(path, grid.dims())?;
        let bar = self
            .progress_manager
            .stage("Writing output", grid.dims().0 as u64);
        write_windowed(grid, &mut writer, &bar)?;
        bar.finish();
        Ok(())
    }
}
