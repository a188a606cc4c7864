//! End-to-end tests: CSV on disk through the render pipeline
//!
//! Tests for complete load and render cycles, JSON output and the
//! headless report binary.

#[path = "../common/mod.rs"]
mod common;

use std::process::Command;
use std::sync::Arc;

use common::{sample_csv, write_temp_file};
use estateview::analysis::ExtremumKind;
use estateview::parsers::{MarketCsv, Metric};
use estateview::render::{RenderConfig, Renderer};

fn sample_renderer() -> Renderer {
    let path = write_temp_file("render-sample.csv", &sample_csv());
    let dataset = MarketCsv.load_file(&path).expect("Should load");
    Renderer::new(Arc::new(dataset), RenderConfig::default()).expect("Valid config")
}

// ============================================
// Load and Render Cycle
// ============================================

#[test]
fn test_initial_view_renders_first_region() {
    let renderer = sample_renderer();
    let first = renderer.dataset().region_names()[0].clone();

    let result = renderer.render(&[first.as_str()], true).unwrap();

    assert_eq!(result.charts.len(), Metric::ALL.len());
    assert_eq!(
        result.charts[0].title,
        "Active listings in Москва"
    );
    assert_eq!(result.population_display(), "Population: 13 020 000");
}

#[test]
fn test_two_region_render_with_extrema() {
    let renderer = sample_renderer();
    let result = renderer.render(&["Москва", "Казань"], true).unwrap();

    let listings = &result.charts[0];
    let moscow = listings.traces[0].extrema.as_ref().unwrap();
    // 100, 120, 90
    assert_eq!(moscow.len(), 1);
    assert_eq!(moscow[0].kind, ExtremumKind::Peak);
    assert_eq!(moscow[0].label(), "120");

    let kazan = listings.traces[1].extrema.as_ref().unwrap();
    // 50, 45, 55
    assert_eq!(kazan.len(), 1);
    assert_eq!(kazan[0].kind, ExtremumKind::Trough);

    assert_eq!(result.population.total(), Some(14_322_000.0));
}

#[test]
fn test_render_result_serializes_to_json() {
    let renderer = sample_renderer();
    let result = renderer.render(&["Казань"], true).unwrap();

    let json: serde_json::Value = serde_json::to_value(&*result).unwrap();
    let charts = json["charts"].as_array().unwrap();

    assert_eq!(charts.len(), Metric::ALL.len());
    assert_eq!(charts[0]["traces"][0]["region"], "Казань");
    assert_eq!(charts[0]["traces"][0]["extrema"][0]["kind"], "Trough");
    assert_eq!(json["population"]["Total"]["total"], 1_302_000.0);
}

// ============================================
// Report Binary
// ============================================

#[test]
fn test_market_report_prints_json() {
    let path = write_temp_file("report-sample.csv", &sample_csv());

    let output = Command::new(env!("CARGO_BIN_EXE_market_report"))
        .arg(&path)
        .arg("Москва")
        .arg("Казань")
        .output()
        .expect("Failed to run market_report");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["population_display"], "Population: 14 322 000");
    assert_eq!(json["charts"].as_array().map(Vec::len), Some(Metric::ALL.len()));
}

#[test]
fn test_market_report_unknown_region_fails() {
    let path = write_temp_file("report-unknown.csv", &sample_csv());

    let output = Command::new(env!("CARGO_BIN_EXE_market_report"))
        .arg(&path)
        .arg("Atlantis")
        .output()
        .expect("Failed to run market_report");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Atlantis"));
}
