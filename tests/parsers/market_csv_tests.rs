//! Market CSV parser tests
//!
//! Tests cover:
//! - Parsing the original column layout
//! - Alternative delimiters, headers and number formats
//! - Error reporting with line numbers

#[path = "../common/mod.rs"]
mod common;

use chrono::NaiveDate;

use common::{sample_csv, write_temp_file};
use estateview::parsers::{DatasetError, MarketCsv, Metric, Parseable};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn values(series: &estateview::parsers::TimeSeries) -> Vec<Option<f64>> {
    series.points().iter().map(|p| p.value).collect()
}

// ============================================
// Original Layout
// ============================================

#[test]
fn test_parse_sample() {
    let dataset = MarketCsv.parse(&sample_csv()).expect("Should parse");

    assert_eq!(dataset.region_names(), vec!["Москва", "Казань"]);

    let moscow = dataset.region("Москва").unwrap();
    let listings = moscow.series(Metric::ActiveListings).unwrap();
    assert_eq!(values(listings), vec![Some(100.0), Some(120.0), Some(90.0)]);
    assert_eq!(listings.points()[0].date, date(2024, 1, 1));
    assert_eq!(moscow.latest_population(), Some(13_020_000.0));

    let kazan = dataset.region("Казань").unwrap();
    assert_eq!(
        values(kazan.series(Metric::AvgExposureSecondary).unwrap()),
        vec![Some(40.0), Some(41.0), Some(40.0)]
    );
}

#[test]
fn test_every_metric_present() {
    let dataset = MarketCsv.parse(&sample_csv()).unwrap();
    for region in dataset.regions() {
        for metric in Metric::ALL {
            assert_eq!(region.series(metric).map(|s| s.len()), Some(3));
        }
    }
}

#[test]
fn test_date_range() {
    let dataset = MarketCsv.parse(&sample_csv()).unwrap();
    assert_eq!(
        dataset.date_range(),
        Some((date(2024, 1, 1), date(2024, 3, 1)))
    );
}

#[test]
fn test_unsorted_rows_are_sorted_by_date() {
    let csv = sample_csv();
    let mut lines: Vec<&str> = csv.lines().collect();
    lines[1..4].reverse();
    let dataset = MarketCsv.parse(&lines.join("\n")).unwrap();

    let listings = dataset
        .region("Москва")
        .and_then(|r| r.series(Metric::ActiveListings))
        .unwrap();
    assert_eq!(values(listings), vec![Some(100.0), Some(120.0), Some(90.0)]);
}

// ============================================
// Alternative Formats
// ============================================

#[test]
fn test_english_headers_semicolon_and_decimal_comma() {
    let header: Vec<&str> = ["Region", "Date", "Population"]
        .into_iter()
        .chain(Metric::ALL.iter().map(|m| m.label()))
        .collect();
    let csv = format!(
        "{}\nOmsk;01.02.2024;1 150 000;10;20;30;95 000,5;120 000;45\n",
        header.join(";")
    );

    let dataset = MarketCsv.parse(&csv).unwrap();
    let omsk = dataset.region("Omsk").unwrap();

    assert_eq!(omsk.latest_population(), Some(1_150_000.0));
    assert_eq!(
        values(omsk.series(Metric::AvgPriceSqmSecondary).unwrap()),
        vec![Some(95_000.5)]
    );
    assert_eq!(omsk.population().points()[0].date, date(2024, 2, 1));
}

#[test]
fn test_blank_cells_are_missing_values() {
    let csv = sample_csv().replace(
        "Москва,2024-02-01,13010000,120,",
        "Москва,2024-02-01,,,",
    );
    let dataset = MarketCsv.parse(&csv).unwrap();
    let moscow = dataset.region("Москва").unwrap();

    assert_eq!(
        values(moscow.series(Metric::ActiveListings).unwrap()),
        vec![Some(100.0), None, Some(90.0)]
    );
    assert_eq!(moscow.latest_population(), Some(13_020_000.0));
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let csv = format!("\u{feff}{}", sample_csv());
    assert_eq!(MarketCsv.parse(&csv).unwrap().len(), 2);
}

// ============================================
// Errors
// ============================================

#[test]
fn test_missing_metric_column() {
    let csv = "Регион,Дата,Население\nМосква,2024-01-01,1\n";
    let err = MarketCsv.parse(csv).unwrap_err();
    assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == Metric::ActiveListings.column_name()));
}

#[test]
fn test_invalid_date_reports_line() {
    let csv = sample_csv().replace("Москва,2024-02-01", "Москва,not-a-date");
    let err = MarketCsv.parse(&csv).unwrap_err();

    match err {
        DatasetError::InvalidDate { line, value } => {
            assert_eq!(line, 3);
            assert_eq!(value, "not-a-date");
        }
        other => panic!("Expected InvalidDate, got {:?}", other),
    }
}

#[test]
fn test_missing_region_reports_line() {
    let csv = sample_csv().replace("Казань,2024-01-01", ",2024-01-01");
    let err = MarketCsv.parse(&csv).unwrap_err();
    assert!(matches!(err, DatasetError::MissingRegion { line: 5 }));
}

#[test]
fn test_header_only_is_empty() {
    let csv = sample_csv();
    let header = csv.lines().next().unwrap();
    assert!(matches!(
        MarketCsv.parse(header).unwrap_err(),
        DatasetError::Empty
    ));
}

// ============================================
// File Loading
// ============================================

#[test]
fn test_load_file() {
    let path = write_temp_file("market-sample.csv", &sample_csv());
    let dataset = MarketCsv.load_file(&path).expect("Should load");
    assert_eq!(dataset.len(), 2);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("estateview-missing/market.csv");
    assert!(matches!(
        MarketCsv.load_file(&path).unwrap_err(),
        DatasetError::Io(_)
    ));
}
