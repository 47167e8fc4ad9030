//! Forecast Consumer API
//!
//! Configuration types and builder for the forecasting layer. Every model
//! runs with a fixed, hand-tuned default configuration; the types here let
//! callers override those defaults from code or a JSON file.

pub mod builder;
pub mod config;

pub use builder::ForecastConfigBuilder;
pub use config::{
    ArimaConfig, ExponentialSmoothingConfig, ForecastConfig, GradientBoostingConfig, LstmConfig,
    ProphetConfig, RandomForestConfig, SvrConfig,
};

// Re-export SPI types
pub use forecast_spi::{
    Evaluation, EvaluationRecord, ForecastError, ForecastOrigin, ForecastPoint, ForecastTable,
    ModelKind, ModelRunner, Observation, Result, RunnerOutput, TimeSeries,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, ForecastConfigBuilder};
    pub use forecast_spi::{
        Evaluation, ForecastError, ForecastTable, ModelKind, Observation, Result, TimeSeries,
    };
}
