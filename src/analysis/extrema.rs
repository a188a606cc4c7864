//! Local peak and trough detection.
//!
//! A point is extremal when it beats both immediate neighbours by more than a
//! relative threshold. Comparisons are strict, so a point sitting exactly on
//! the threshold boundary is not reported.

use chrono::NaiveDate;
use serde::Serialize;

use crate::format::format_grouped;
use crate::parsers::TimeSeries;

/// Default relative threshold (3%)
pub const DEFAULT_THRESHOLD: f64 = 0.03;

/// Minimum series length that can contain an interior point
pub const MIN_SERIES_LEN: usize = 3;

/// Direction of a local extremum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ExtremumKind {
    Peak,
    Trough,
}

/// A detected extremum, referencing its position in the annotated series
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExtremumPoint {
    pub index: usize,
    pub date: NaiveDate,
    pub value: f64,
    pub kind: ExtremumKind,
}

impl ExtremumPoint {
    /// Annotation text shown next to the marker
    pub fn label(&self) -> String {
        format_grouped(self.value)
    }
}

/// Detector seam used by the render pipeline.
///
/// Implementations must be pure: the same series and threshold always yield
/// the same points.
pub trait ExtremaDetector: Send + Sync {
    fn detect(&self, series: &TimeSeries, threshold: f64) -> Vec<ExtremumPoint>;
}

/// Three-point neighbour comparison detector
#[derive(Clone, Copy, Debug, Default)]
pub struct NeighborDetector;

impl ExtremaDetector for NeighborDetector {
    fn detect(&self, series: &TimeSeries, threshold: f64) -> Vec<ExtremumPoint> {
        detect_extrema(series, threshold)
    }
}

/// Scan every interior point of `series` and return peaks and troughs in index order.
///
/// Series shorter than [`MIN_SERIES_LEN`] yield nothing. Any window containing a
/// missing or non-finite value is skipped.
pub fn detect_extrema(series: &TimeSeries, threshold: f64) -> Vec<ExtremumPoint> {
    let points = series.points();
    if points.len() < MIN_SERIES_LEN {
        return Vec::new();
    }

    points
        .windows(3)
        .enumerate()
        .filter_map(|(i, window)| {
            let prev = finite(window[0].value)?;
            let curr = finite(window[1].value)?;
            let next = finite(window[2].value)?;

            classify(prev, curr, next, threshold).map(|kind| ExtremumPoint {
                index: i + 1,
                date: window[1].date,
                value: curr,
                kind,
            })
        })
        .collect()
}

/// Classify `curr` against its neighbours. Peak is tested first.
pub fn classify(prev: f64, curr: f64, next: f64, threshold: f64) -> Option<ExtremumKind> {
    let above = 1.0 + threshold;
    let below = 1.0 - threshold;

    if curr > prev * above && curr > next * above {
        Some(ExtremumKind::Peak)
    } else if curr < prev * below && curr < next * below {
        Some(ExtremumKind::Trough)
    } else {
        None
    }
}

#[inline]
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
