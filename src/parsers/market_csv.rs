//! CSV ingestion for real estate market data.
//!
//! Expected layout: one row per (region, date) with a population column and
//! one numeric column per [`Metric`]. Headers may use the original Russian
//! names or their English equivalents.

use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::types::{
    Dataset, DatasetError, Metric, Parseable, Region, SeriesPoint, TimeSeries, METRIC_COUNT,
};

/// Accepted headers for the region identifier column
const REGION_HEADERS: &[&str] = &["Регион", "Region"];

/// Accepted headers for the date column
const DATE_HEADERS: &[&str] = &["Дата", "Date"];

/// Accepted headers for the population column
const POPULATION_HEADERS: &[&str] = &["Население", "Population"];

/// Date formats tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// First numeric token in a cell once whitespace has been removed
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?\d[\d.,]*(?:[eE][-+]?\d+)?").expect("Failed to compile number regex")
});

/// Column positions resolved from the header row
struct ColumnMap {
    region: usize,
    date: usize,
    population: usize,
    metrics: [usize; METRIC_COUNT],
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim();
                names.iter().any(|n| n.eq_ignore_ascii_case(h))
            })
        };

        let region =
            find(REGION_HEADERS).ok_or_else(|| DatasetError::MissingColumn(REGION_HEADERS[0].into()))?;
        let date =
            find(DATE_HEADERS).ok_or_else(|| DatasetError::MissingColumn(DATE_HEADERS[0].into()))?;
        let population = find(POPULATION_HEADERS)
            .ok_or_else(|| DatasetError::MissingColumn(POPULATION_HEADERS[0].into()))?;

        let mut metrics = [0; METRIC_COUNT];
        for metric in Metric::ALL {
            metrics[metric as usize] = headers
                .iter()
                .position(|h| Metric::from_header(h) == Some(metric))
                .ok_or_else(|| DatasetError::MissingColumn(metric.column_name().to_string()))?;
        }

        Ok(Self {
            region,
            date,
            population,
            metrics,
        })
    }
}

/// Rows collected for one region before series are built
#[derive(Default)]
struct RegionRows {
    population: Vec<SeriesPoint>,
    metrics: [Vec<SeriesPoint>; METRIC_COUNT],
}

/// Parser for market CSV exports
pub struct MarketCsv;

impl MarketCsv {
    /// Read and parse a CSV file from disk
    pub fn load_file(&self, path: &Path) -> Result<Dataset, DatasetError> {
        let contents = std::fs::read_to_string(path)?;
        let dataset = self.parse(&contents)?;
        tracing::info!(
            "Loaded {} regions from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }
}

impl Parseable for MarketCsv {
    fn parse(&self, file_contents: &str) -> Result<Dataset, DatasetError> {
        let contents = file_contents.trim_start_matches('\u{feff}');
        let delimiter = detect_delimiter(contents);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(contents.as_bytes());

        let columns = ColumnMap::resolve(reader.headers()?)?;

        let mut order: Vec<String> = Vec::new();
        let mut rows: HashMap<String, RegionRows> = HashMap::new();
        let mut row_count = 0usize;

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let region = record.get(columns.region).unwrap_or("").trim();
            if region.is_empty() {
                return Err(DatasetError::MissingRegion { line });
            }

            let raw_date = record.get(columns.date).unwrap_or("");
            let date = parse_date(raw_date).ok_or_else(|| DatasetError::InvalidDate {
                line,
                value: raw_date.to_string(),
            })?;

            let entry = rows.entry(region.to_string()).or_insert_with(|| {
                order.push(region.to_string());
                RegionRows::default()
            });

            entry.population.push(SeriesPoint {
                date,
                value: record.get(columns.population).and_then(parse_number),
            });

            for metric in Metric::ALL {
                let idx = metric as usize;
                entry.metrics[idx].push(SeriesPoint {
                    date,
                    value: record.get(columns.metrics[idx]).and_then(parse_number),
                });
            }

            row_count += 1;
        }

        if row_count == 0 {
            return Err(DatasetError::Empty);
        }

        let regions = order
            .into_iter()
            .filter_map(|name| {
                let collected = rows.remove(&name)?;
                let mut region = Region::new(name, TimeSeries::new(collected.population));
                for (metric, points) in Metric::ALL.into_iter().zip(collected.metrics) {
                    region = region.with_series(metric, TimeSeries::new(points));
                }
                Some(region)
            })
            .collect();

        tracing::debug!("Parsed {} market rows", row_count);

        Ok(Dataset::new(regions))
    }
}

/// Pick `;` when the header row uses it, otherwise `,`
fn detect_delimiter(contents: &str) -> u8 {
    let header = contents.lines().next().unwrap_or("");
    if header.matches(';').count() > header.matches(',').count() {
        b';'
    } else {
        b','
    }
}

/// Parse a calendar date, ignoring any time-of-day suffix
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Parse a numeric cell.
///
/// Tolerates digit-group spaces, currency symbols and a decimal comma.
/// Empty or unparseable cells are treated as missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
        .collect();
    if compact.is_empty() {
        return None;
    }

    let token = NUMBER_RE.find(&compact)?.as_str();

    let commas = token.matches(',').count();
    let dots = token.matches('.').count();
    let normalized = match (commas, dots) {
        (0, 0) | (0, 1) => token.to_string(),
        // Decimal comma
        (1, 0) => token.replace(',', "."),
        // Commas as thousands separators
        (_, 0) | (_, 1) => token.replace(',', ""),
        // Dots as thousands separators, optional decimal comma
        (0 | 1, _) => token.replace('.', "").replace(',', "."),
        _ => return None,
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
