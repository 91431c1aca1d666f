//! Analysis constants and runtime configuration defaults

use crate::spatial::neighborhood::Connectivity;

// Neighborhood used when the caller doesn't choose one
/// Default connectivity for the connected-component pass
pub const DEFAULT_CONNECTIVITY: Connectivity = Connectivity::Four;

// Resampling caps for mask and patch-only point selection
/// Lower bound on redraws while searching for an eligible point
pub const MIN_RESAMPLE_ATTEMPTS: usize = 64;
/// Redraws allowed per cell of the sampled region
pub const RESAMPLE_ATTEMPTS_PER_CELL: usize = 4;

// Output settings
/// Token written for null cells in ASCII grids
pub const NULL_TOKEN: &str = "*";
/// Decimal places written for probabilities
pub const OUTPUT_PRECISION: usize = 6;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Number of redraws allowed when picking one point in a region of `area` cells
pub const fn resample_limit(area: usize) -> usize {
    let scaled = area.saturating_mul(RESAMPLE_ATTEMPTS_PER_CELL);
    if scaled > MIN_RESAMPLE_ATTEMPTS {
        scaled
    } else {
        MIN_RESAMPLE_ATTEMPTS
    }
}
