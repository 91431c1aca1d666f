/// Visited-cell bitset for flood fills
pub mod bitset;
/// Union-find over provisional fragments
pub mod disjoint;
/// Configured end-to-end analysis runs
pub mod executor;
/// Connected-component labeling of patch cells
pub mod labeling;
/// Distance-based merging of nearby fragments
pub mod merge;
/// Monte-Carlo same-fragment estimator
pub mod sampler;
/// Whole-map and moving-window analysis
pub mod window;
