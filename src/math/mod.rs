//! Mathematical utilities for the estimator

/// Reproducible per-window random number streams
pub mod streams;
