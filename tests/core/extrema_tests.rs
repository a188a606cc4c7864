//! Tests for peak and trough detection
//!
//! Tests cover:
//! - Short and monotonic series
//! - Threshold boundaries
//! - Missing values around a candidate point
//! - Label formatting

#[path = "../common/mod.rs"]
mod common;

use common::start_date;
use estateview::analysis::{
    detect_extrema, ExtremaDetector, ExtremumKind, NeighborDetector, DEFAULT_THRESHOLD,
};
use estateview::parsers::TimeSeries;

fn series(values: &[f64]) -> TimeSeries {
    let values: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    TimeSeries::from_values(start_date(), &values)
}

// ============================================
// Degenerate Series
// ============================================

#[test]
fn test_short_series_have_no_extrema() {
    for values in [&[][..], &[100.0][..], &[100.0, 200.0][..]] {
        assert!(detect_extrema(&series(values), DEFAULT_THRESHOLD).is_empty());
    }
}

#[test]
fn test_monotonic_series_have_no_extrema() {
    let rising: Vec<f64> = (0..50).map(|i| 100.0 * 1.1_f64.powi(i)).collect();
    let falling: Vec<f64> = rising.iter().rev().copied().collect();

    assert!(detect_extrema(&series(&rising), DEFAULT_THRESHOLD).is_empty());
    assert!(detect_extrema(&series(&falling), DEFAULT_THRESHOLD).is_empty());
}

#[test]
fn test_flat_series_has_no_extrema() {
    assert!(detect_extrema(&series(&[5.0; 10]), DEFAULT_THRESHOLD).is_empty());
}

// ============================================
// Classification
// ============================================

#[test]
fn test_peak_example() {
    let found = detect_extrema(&series(&[100.0, 110.0, 95.0]), 0.03);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].index, 1);
    assert_eq!(found[0].value, 110.0);
    assert_eq!(found[0].kind, ExtremumKind::Peak);
    assert_eq!(found[0].date, start_date().succ_opt().unwrap());
}

#[test]
fn test_trough_example() {
    let found = detect_extrema(&series(&[100.0, 96.0, 105.0]), 0.03);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].index, 1);
    assert_eq!(found[0].kind, ExtremumKind::Trough);
}

#[test]
fn test_small_wiggles_below_threshold_are_ignored() {
    // 102 is above both neighbours but not by more than 3%
    assert!(detect_extrema(&series(&[100.0, 102.0, 100.0]), 0.03).is_empty());
    // Same series with a 1% threshold is a peak
    assert_eq!(detect_extrema(&series(&[100.0, 102.0, 100.0]), 0.01).len(), 1);
}

#[test]
fn test_one_sided_spike_is_not_extremal() {
    // Beats the left neighbour by far, the right one not at all
    assert!(detect_extrema(&series(&[100.0, 150.0, 149.0]), 0.03).is_empty());
}

#[test]
fn test_results_in_index_order() {
    let found = detect_extrema(
        &series(&[100.0, 120.0, 90.0, 130.0, 80.0, 100.0]),
        DEFAULT_THRESHOLD,
    );

    let indices: Vec<usize> = found.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
    let kinds: Vec<ExtremumKind> = found.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ExtremumKind::Peak,
            ExtremumKind::Trough,
            ExtremumKind::Peak,
            ExtremumKind::Trough
        ]
    );
}

// ============================================
// Missing Values
// ============================================

#[test]
fn test_missing_neighbour_skips_candidate() {
    let values = [Some(100.0), Some(150.0), None, Some(100.0), Some(150.0), Some(100.0)];
    let found = detect_extrema(
        &TimeSeries::from_values(start_date(), &values),
        DEFAULT_THRESHOLD,
    );

    // Index 1 has a missing right neighbour, index 3 a missing left one
    let indices: Vec<usize> = found.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![4]);
}

#[test]
fn test_nan_values_are_not_extremal() {
    let found = detect_extrema(&series(&[100.0, f64::NAN, 100.0, 200.0, 100.0]), DEFAULT_THRESHOLD);

    let indices: Vec<usize> = found.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![3]);
}

// ============================================
// Detector Trait and Labels
// ============================================

#[test]
fn test_neighbor_detector_matches_function() {
    let s = series(&[100.0, 110.0, 95.0, 96.0, 120.0]);
    assert_eq!(
        NeighborDetector.detect(&s, DEFAULT_THRESHOLD),
        detect_extrema(&s, DEFAULT_THRESHOLD)
    );
}

#[test]
fn test_label_groups_thousands() {
    let found = detect_extrema(&series(&[1_000_000.0, 1_234_567.4, 1_000_000.0]), 0.03);
    assert_eq!(found[0].label(), "1 234 567");
}
