//! Analysis algorithms for market time series.
//!
//! - [`extrema`] - local peak and trough detection against both neighbours
//! - [`population`] - population totals across a region selection
//!
//! Everything here is pure CPU work over in-memory data: no I/O and no
//! shared state, so results are reproducible for a given dataset.

pub mod extrema;
pub mod population;

use std::time::{Duration, Instant};

pub use extrema::{
    detect_extrema, ExtremaDetector, ExtremumKind, ExtremumPoint, NeighborDetector,
    DEFAULT_THRESHOLD,
};
pub use population::PopulationSummary;

/// Helper function to measure execution time of an analysis step
pub fn timed_analyze<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
