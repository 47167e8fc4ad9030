//! Forecast Service Provider Interface
//!
//! Shared vocabulary of the forecasting layer:
//!
//! - [`ModelKind`]: the fixed set of supported models
//! - [`TimeSeries`] / [`Observation`]: dated input series
//! - [`ForecastTable`]: normalized per-model output, fitted or placeholder
//! - [`Evaluation`]: per-model accuracy records
//! - [`ModelRunner`]: contract every model adapter implements
//! - [`ForecastError`]: error type for dispatch and I/O

pub mod contract;
pub mod error;
pub mod model;

pub use contract::{ModelRunner, RunnerOutput};
pub use error::{ForecastError, Result};
pub use model::{
    Evaluation, EvaluationRecord, ForecastOrigin, ForecastPoint, ForecastTable, ModelKind,
    Observation, TimeSeries,
};
