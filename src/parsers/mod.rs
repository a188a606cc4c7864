pub mod market_csv;
pub mod types;

pub use market_csv::MarketCsv;
pub use types::{
    Dataset, DatasetError, Metric, Parseable, Region, SeriesPoint, TimeSeries, METRIC_COUNT,
};
