use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use strum::{AsRefStr, EnumString};
use thiserror::Error;

/// Number of tracked metrics
pub const METRIC_COUNT: usize = 6;

/// Market metrics tracked per region.
///
/// The variant order is the order charts are rendered in.
#[derive(
    AsRefStr, Clone, Copy, Debug, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Metric {
    #[strum(serialize = "Активных объявлений о продаже")]
    ActiveListings,
    #[strum(serialize = "Активных объявлений, вторичка")]
    ActiveListingsSecondary,
    #[strum(serialize = "Активных объявлений, новостройки")]
    ActiveListingsNewBuild,
    #[strum(serialize = "Средняя стоимость м², вторичка")]
    AvgPriceSqmSecondary,
    #[strum(serialize = "Средняя стоимость м², новостройки")]
    AvgPriceSqmNewBuild,
    #[strum(serialize = "Средний срок экспозиции, вторичка")]
    AvgExposureSecondary,
}

impl Metric {
    /// All metrics in render order
    pub const ALL: [Metric; METRIC_COUNT] = [
        Metric::ActiveListings,
        Metric::ActiveListingsSecondary,
        Metric::ActiveListingsNewBuild,
        Metric::AvgPriceSqmSecondary,
        Metric::AvgPriceSqmNewBuild,
        Metric::AvgExposureSecondary,
    ];

    /// CSV column header for this metric
    pub fn column_name(&self) -> &str {
        self.as_ref()
    }

    /// Human-readable label used in chart titles
    pub fn label(&self) -> &'static str {
        match self {
            Metric::ActiveListings => "Active listings",
            Metric::ActiveListingsSecondary => "Active listings, secondary market",
            Metric::ActiveListingsNewBuild => "Active listings, new builds",
            Metric::AvgPriceSqmSecondary => "Average price per m², secondary market",
            Metric::AvgPriceSqmNewBuild => "Average price per m², new builds",
            Metric::AvgExposureSecondary => "Average days on market, secondary market",
        }
    }

    /// Resolve a CSV header, accepting either the original column name or the English label
    pub fn from_header(header: &str) -> Option<Metric> {
        let header = header.trim();
        header
            .parse::<Metric>()
            .ok()
            .or_else(|| Self::ALL.into_iter().find(|m| m.label().eq_ignore_ascii_case(header)))
    }
}

/// Errors that can occur while loading a market dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column missing: {0}")]
    MissingColumn(String),

    #[error("Line {line}: cannot parse date '{value}'")]
    InvalidDate { line: u64, value: String },

    #[error("Line {line}: region is empty")]
    MissingRegion { line: u64 },

    #[error("Dataset contains no rows")]
    Empty,
}

/// Trait for dataset parsers
pub trait Parseable {
    fn parse(&self, file_contents: &str) -> Result<Dataset, DatasetError>;
}

/// A single dated observation. `None` marks a missing value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Ordered observations for one (region, metric) pair.
///
/// Dates are strictly increasing once constructed.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Build a series, sorting by date. On a duplicate date the later point wins.
    pub fn new(mut points: Vec<SeriesPoint>) -> Self {
        // Stable sort keeps input order among equal dates
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<SeriesPoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => {
                    tracing::warn!("Duplicate observation for {}, keeping the later row", point.date);
                    *last = point;
                }
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    /// Convenience constructor for values on consecutive days starting at `start`
    pub fn from_values(start: NaiveDate, values: &[Option<f64>]) -> Self {
        let points = values
            .iter()
            .zip(start.iter_days())
            .map(|(&value, date)| SeriesPoint { date, value })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SeriesPoint> {
        self.points.get(index)
    }

    /// Last non-missing value
    pub fn last_value(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.value)
    }
}

/// A region with one series per metric plus its population series
#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    series: HashMap<Metric, Arc<TimeSeries>>,
    population: TimeSeries,
}

impl Region {
    pub fn new(name: impl Into<String>, population: TimeSeries) -> Self {
        Self {
            name: name.into(),
            series: HashMap::new(),
            population,
        }
    }

    /// Attach the series for a metric, replacing any previous one
    pub fn with_series(mut self, metric: Metric, series: TimeSeries) -> Self {
        self.series.insert(metric, Arc::new(series));
        self
    }

    pub fn series(&self, metric: Metric) -> Option<&Arc<TimeSeries>> {
        self.series.get(&metric)
    }

    pub fn population(&self) -> &TimeSeries {
        &self.population
    }

    /// Last recorded population, if the region has any population observations
    pub fn latest_population(&self) -> Option<f64> {
        self.population.last_value()
    }
}

/// Immutable market dataset, loaded once per session
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    regions: Vec<Region>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Build a dataset. Regions keep their given order; a repeated name replaces the earlier entry.
    pub fn new(regions: Vec<Region>) -> Self {
        let mut dataset = Self::default();
        for region in regions {
            match dataset.index.get(&region.name) {
                Some(&idx) => dataset.regions[idx] = region,
                None => {
                    dataset
                        .index
                        .insert(region.name.clone(), dataset.regions.len());
                    dataset.regions.push(region);
                }
            }
        }
        dataset
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.index.get(name).map(|&idx| &self.regions[idx])
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region names in first-appearance order
    pub fn region_names(&self) -> Vec<String> {
        self.regions.iter().map(|r| r.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Earliest and latest observation dates across every series
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.regions.iter().flat_map(|r| {
            r.series
                .values()
                .flat_map(|s| s.points().iter().map(|p| p.date))
                .chain(r.population.points().iter().map(|p| p.date))
        });

        dates.fold(None, |range, date| match range {
            None => Some((date, date)),
            Some((min, max)) => Some((min.min(date), max.max(date))),
        })
    }
}
