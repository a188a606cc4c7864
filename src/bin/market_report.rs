//! Headless report: render a region selection from a market CSV and print it as JSON.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use estateview::parsers::MarketCsv;
use estateview::render::{RenderConfig, RenderResult, Renderer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render market charts for a region selection as JSON", long_about = None)]
struct Cli {
    /// Market data CSV
    #[arg(value_hint = ValueHint::FilePath)]
    csv: PathBuf,

    /// Regions to render, in display order
    regions: Vec<String>,

    /// Skip peak and trough detection
    #[arg(long, action = ArgAction::SetTrue)]
    no_extrema: bool,

    /// Relative neighbour threshold for extrema (0.03 = 3%)
    #[arg(long)]
    threshold: Option<f64>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    population_display: String,
    #[serde(flatten)]
    result: &'a RenderResult,
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dataset = MarketCsv
        .load_file(&cli.csv)
        .with_context(|| format!("Failed to load {}", cli.csv.display()))?;

    let config = RenderConfig {
        threshold: cli.threshold.unwrap_or(RenderConfig::default().threshold),
        ..RenderConfig::default()
    };

    let renderer = Renderer::new(Arc::new(dataset), config)?;
    let result = renderer.render(&cli.regions, !cli.no_extrema)?;

    let report = Report {
        population_display: result.population_display(),
        result: &result,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
