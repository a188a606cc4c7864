//! Population aggregation across a region selection.

use serde::Serialize;

use crate::format::format_grouped;
use crate::parsers::Region;

/// Population display shown beside the region selector
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PopulationSummary {
    /// Nothing selected; the shell shows a prompt instead
    NoSelection,
    /// Sum of the latest population of every selected region
    Total {
        total: f64,
        /// Number of selected regions with at least one population observation
        counted: usize,
        /// Number of selected regions
        regions: usize,
    },
}

impl PopulationSummary {
    /// Summarise the latest population of `regions`.
    ///
    /// Regions without any population observations contribute nothing.
    pub fn from_regions<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Self {
        let mut total = 0.0;
        let mut counted = 0;
        let mut selected = 0;

        for region in regions {
            selected += 1;
            match region.latest_population() {
                Some(population) => {
                    total += population;
                    counted += 1;
                }
                None => tracing::warn!("Region '{}' has no population data", region.name),
            }
        }

        if selected == 0 {
            return Self::NoSelection;
        }

        Self::Total {
            total,
            counted,
            regions: selected,
        }
    }

    /// Total population, if anything is selected
    pub fn total(&self) -> Option<f64> {
        match self {
            Self::NoSelection => None,
            Self::Total { total, .. } => Some(*total),
        }
    }

    /// Text for the population display
    pub fn display(&self) -> String {
        match self {
            Self::NoSelection => "No regions selected".to_string(),
            Self::Total { total, .. } => format!("Population: {}", format_grouped(*total)),
        }
    }
}
