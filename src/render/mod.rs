//! Render pipeline: turns a region selection into chart descriptions.
//!
//! The [`Renderer`] owns an immutable [`Dataset`], an [`ExtremaDetector`] and
//! a [`SelectionCache`]. Any shell (desktop UI, headless report, tests) calls
//! [`Renderer::render`] with the selected regions and the extrema toggle and
//! displays whatever comes back.

pub mod cache;

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

use crate::analysis::{
    timed_analyze, ExtremaDetector, ExtremumPoint, NeighborDetector, PopulationSummary,
    DEFAULT_THRESHOLD,
};
use crate::parsers::{Dataset, Metric, Region, SeriesPoint, TimeSeries};

pub use cache::{CacheStats, SelectionCache, SelectionKey, DEFAULT_CACHE_CAPACITY};

/// Errors surfaced to the calling shell
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("Region '{region}' has no data for {}", .metric.label())]
    MetricNotFound { region: String, metric: Metric },

    #[error("Extrema threshold must be a positive finite fraction, got {0}")]
    InvalidThreshold(f64),
}

/// One region's line on a chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    pub region: String,
    pub series: Arc<TimeSeries>,
    /// Detected peaks and troughs; `None` when extrema display is off
    pub extrema: Option<Vec<ExtremumPoint>>,
}

/// Chart description for a single metric
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub metric: Metric,
    pub title: String,
    pub traces: Vec<Trace>,
}

/// Output of one render call
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderResult {
    pub charts: Vec<ChartSpec>,
    pub population: PopulationSummary,
}

impl RenderResult {
    /// Result for an empty selection
    pub fn no_selection() -> Self {
        Self {
            charts: Vec::new(),
            population: PopulationSummary::NoSelection,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn population_display(&self) -> String {
        self.population.display()
    }

    /// Region order of the traces
    pub fn region_order(&self) -> Vec<&str> {
        self.charts
            .first()
            .map(|chart| chart.traces.iter().map(|t| t.region.as_str()).collect())
            .unwrap_or_default()
    }

    /// Copy with traces (and titles) rearranged to follow `order`
    pub fn reordered(&self, order: &[String]) -> Self {
        let position: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let charts = self
            .charts
            .iter()
            .map(|chart| {
                let mut traces = chart.traces.clone();
                traces.sort_by_key(|t| {
                    position
                        .get(t.region.as_str())
                        .copied()
                        .unwrap_or(usize::MAX)
                });
                ChartSpec {
                    metric: chart.metric,
                    title: chart_title(chart.metric, order),
                    traces,
                }
            })
            .collect();

        Self {
            charts,
            population: self.population.clone(),
        }
    }

    /// Rough number of bytes held by this result. Diagnostic only.
    pub fn estimated_size(&self) -> usize {
        let traces: usize = self
            .charts
            .iter()
            .flat_map(|chart| chart.traces.iter())
            .map(|trace| {
                std::mem::size_of::<Trace>()
                    + trace.region.len()
                    + trace.series.len() * std::mem::size_of::<SeriesPoint>()
                    + trace
                        .extrema
                        .as_ref()
                        .map_or(0, |e| e.len() * std::mem::size_of::<ExtremumPoint>())
            })
            .sum();

        let titles: usize = self
            .charts
            .iter()
            .map(|chart| std::mem::size_of::<ChartSpec>() + chart.title.len())
            .sum();

        std::mem::size_of::<Self>() + titles + traces
    }
}

/// Chart title, e.g. "Active listings in Moscow, Kazan"
pub fn chart_title(metric: Metric, regions: &[String]) -> String {
    format!("{} in {}", metric.label(), regions.join(", "))
}

/// Renderer tuning
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderConfig {
    /// Relative neighbour threshold for extrema (0.03 = 3%)
    pub threshold: f64,
    /// Maximum cached selections; 0 disables caching
    pub cache_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.threshold.is_finite() && self.threshold > 0.0 {
            Ok(())
        } else {
            Err(RenderError::InvalidThreshold(self.threshold))
        }
    }
}

/// Render pipeline over one dataset
pub struct Renderer<D = NeighborDetector> {
    dataset: Arc<Dataset>,
    detector: D,
    threshold: f64,
    cache: SelectionCache,
}

impl Renderer<NeighborDetector> {
    pub fn new(dataset: Arc<Dataset>, config: RenderConfig) -> Result<Self, RenderError> {
        Self::with_detector(dataset, config, NeighborDetector)
    }
}

impl<D: ExtremaDetector> Renderer<D> {
    /// Build a renderer with a custom detector
    pub fn with_detector(
        dataset: Arc<Dataset>,
        config: RenderConfig,
        detector: D,
    ) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            dataset,
            detector,
            threshold: config.threshold,
            cache: SelectionCache::new(config.cache_capacity),
        })
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn cache(&self) -> &SelectionCache {
        &self.cache
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Render the selected regions.
    ///
    /// Regions are drawn in the given order; repeated names are collapsed.
    /// An empty selection returns [`RenderResult::no_selection`] without
    /// touching the cache.
    pub fn render<S: AsRef<str>>(
        &self,
        selected: &[S],
        show_extrema: bool,
    ) -> Result<Arc<RenderResult>, RenderError> {
        let order = dedup_selection(selected);
        if order.is_empty() {
            return Ok(Arc::new(RenderResult::no_selection()));
        }

        let regions = order
            .iter()
            .map(|name| {
                self.dataset
                    .region(name)
                    .ok_or_else(|| RenderError::RegionNotFound(name.clone()))
            })
            .collect::<Result<Vec<&Region>, _>>()?;

        let key = SelectionKey::new(order.iter().cloned(), show_extrema);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Render cache hit for {:?}", order);
            if cached.region_order() == order {
                return Ok(cached);
            }
            return Ok(Arc::new(cached.reordered(&order)));
        }

        let (result, elapsed) =
            timed_analyze(|| self.compute(&order, &regions, &key, show_extrema));
        let result = Arc::new(result?);

        tracing::debug!(
            "Rendered {} regions x {} metrics in {:?}",
            regions.len(),
            result.charts.len(),
            elapsed
        );

        self.cache.put(key, Arc::clone(&result));
        Ok(result)
    }

    fn compute(
        &self,
        order: &[String],
        regions: &[&Region],
        key: &SelectionKey,
        show_extrema: bool,
    ) -> Result<RenderResult, RenderError> {
        let mut charts = Vec::with_capacity(Metric::ALL.len());

        for metric in Metric::ALL {
            let traces = regions
                .iter()
                .map(|region| -> Result<Trace, RenderError> {
                    let series =
                        region
                            .series(metric)
                            .ok_or_else(|| RenderError::MetricNotFound {
                                region: region.name.clone(),
                                metric,
                            })?;

                    let extrema =
                        show_extrema.then(|| self.detector.detect(series, self.threshold));

                    Ok(Trace {
                        region: region.name.clone(),
                        series: Arc::clone(series),
                        extrema,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            charts.push(ChartSpec {
                metric,
                title: chart_title(metric, order),
                traces,
            });
        }

        // Sum in sorted key order so the total does not depend on selection order
        let population =
            PopulationSummary::from_regions(key.regions().filter_map(|n| self.dataset.region(n)));

        Ok(RenderResult { charts, population })
    }
}

/// Selected names with repeats removed, first occurrence kept
fn dedup_selection<S: AsRef<str>>(selected: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    selected
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
