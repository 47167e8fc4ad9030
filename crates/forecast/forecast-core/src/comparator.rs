//! Multi-model comparator
//!
//! Runs every requested model over the same series. A model that fails for
//! any reason is replaced by a placeholder table, so the comparison itself
//! never fails.

use crate::dispatcher::get_forecast;
use crate::placeholder::placeholder_table;
use forecast_api::ForecastConfig;
use forecast_spi::{ForecastTable, ModelKind, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Forecast tables in request order, fitted and substituted alike
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    tables: Vec<ForecastTable>,
}

impl Comparison {
    pub fn tables(&self) -> &[ForecastTable] {
        &self.tables
    }

    /// Tables substituted for failed models
    pub fn placeholders(&self) -> Vec<&ForecastTable> {
        self.tables.iter().filter(|t| t.is_placeholder()).collect()
    }

    /// Tables produced by fitted models
    pub fn fitted(&self) -> Vec<&ForecastTable> {
        self.tables.iter().filter(|t| !t.is_placeholder()).collect()
    }

    /// First table for `kind`
    pub fn get(&self, kind: ModelKind) -> Option<&ForecastTable> {
        self.tables.iter().find(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn into_tables(self) -> Vec<ForecastTable> {
        self.tables
    }
}

/// Run each of `kinds` in order, substituting placeholders for failures.
pub fn compare_models(
    series: &TimeSeries,
    kinds: &[ModelKind],
    horizon: usize,
    config: &ForecastConfig,
) -> Comparison {
    let tables: Vec<ForecastTable> = kinds
        .iter()
        .map(|&kind| match get_forecast(series, kind, horizon, config) {
            Ok(table) => table,
            Err(err) => {
                warn!(model = %kind, error = %err, "model failed, substituting placeholder");
                placeholder_table(series, kind, horizon, config.seed, err.to_string())
            }
        })
        .collect();

    let comparison = Comparison { tables };
    info!(
        models = comparison.len(),
        placeholders = comparison.placeholders().len(),
        horizon,
        "comparison complete"
    );
    comparison
}
