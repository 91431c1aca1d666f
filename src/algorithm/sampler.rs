//! Monte-Carlo estimate of two random points sharing a fragment
//!
//! Each trial draws two points uniformly from the region. Points on masked-out
//! cells (and, in patch-only mode, on background cells) are redrawn up to
//! [`resample_limit`] times; a trial whose points can't be placed is skipped
//! and left out of the denominator. Two background points never count as a
//! success.

use crate::io::configuration::resample_limit;
use crate::spatial::grid::{FragmentGrid, MaskGrid, NO_FRAGMENT, Region};
use rand::Rng;

/// Parameters of one probability estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOptions {
    /// Number of point pairs to draw
    pub trials: usize,
    /// Only place points on patch cells
    pub patch_only: bool,
}

/// Tally of one probability estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleOutcome {
    /// Trials whose points landed in the same fragment
    pub successes: usize,
    /// Trials where both points were placed
    pub counted: usize,
    /// Trials abandoned because no eligible point was found
    pub skipped: usize,
}

impl SampleOutcome {
    /// Fraction of counted trials that succeeded, `None` if none were counted
    pub fn probability(&self) -> Option<f64> {
        (self.counted > 0).then(|| self.successes as f64 / self.counted as f64)
    }

    /// Outcome where every trial was skipped
    pub const fn all_skipped(trials: usize) -> Self {
        Self {
            successes: 0,
            counted: 0,
            skipped: trials,
        }
    }
}

/// Estimate the same-fragment probability within `region`
///
/// The region is clipped to the grid first. An empty region, or one without
/// any unmasked patch cell, yields an outcome with every trial skipped.
pub fn sample<R: Rng>(
    ids: &FragmentGrid,
    mask: &MaskGrid,
    region: Region,
    options: &SampleOptions,
    rng: &mut R,
) -> SampleOutcome {
    let region = region.clipped(ids.dims());
    let eligible = |cell: [usize; 2]| {
        mask.allows(cell) && (!options.patch_only || ids.raw(cell) != NO_FRAGMENT)
    };

    // Without a reachable patch cell no trial can succeed, so none are counted
    let has_patch = region
        .cells()
        .any(|cell| mask.allows(cell) && ids.raw(cell) != NO_FRAGMENT);
    if region.is_empty() || !has_patch {
        return SampleOutcome::all_skipped(options.trials);
    }

    let limit = resample_limit(region.area());
    let mut outcome = SampleOutcome::default();

    for _ in 0..options.trials {
        let Some(first) = draw_point(rng, region, limit, eligible) else {
            outcome.skipped += 1;
            continue;
        };
        let Some(second) = draw_point(rng, region, limit, eligible) else {
            outcome.skipped += 1;
            continue;
        };

        outcome.counted += 1;
        let id = ids.raw(first);
        if id != NO_FRAGMENT && id == ids.raw(second) {
            outcome.successes += 1;
        }
    }

    outcome
}

/// Uniform draw from `region`, redrawn until `eligible` or `limit` attempts pass
fn draw_point<R: Rng>(
    rng: &mut R,
    region: Region,
    limit: usize,
    eligible: impl Fn([usize; 2]) -> bool,
) -> Option<[usize; 2]> {
    (0..limit).find_map(|_| {
        let cell = [
            region.row + rng.random_range(0..region.rows),
            region.col + rng.random_range(0..region.cols),
        ];
        eligible(cell).then_some(cell)
    })
}
