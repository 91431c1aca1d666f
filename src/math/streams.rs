//! Independent random streams derived from one run seed
//!
//! Every sampling unit (the whole grid, or one window) gets its own `StdRng`
//! seeded from the run seed and the unit's index. Streams don't depend on
//! evaluation order, so parallel and sequential runs produce the same values.

use rand::{SeedableRng, rngs::StdRng};
use std::time::{SystemTime, UNIX_EPOCH};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer
pub const fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of stream `index` under the run seed `seed`
pub const fn stream_seed(seed: u64, index: u64) -> u64 {
    splitmix64(seed ^ splitmix64(index.wrapping_mul(GOLDEN_GAMMA)))
}

/// Generator for stream `index` under the run seed `seed`
pub fn stream_rng(seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(stream_seed(seed, index))
}

/// Seed taken from the wall clock, for runs without an explicit seed
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            splitmix64(elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()).rotate_left(32))
        })
}
