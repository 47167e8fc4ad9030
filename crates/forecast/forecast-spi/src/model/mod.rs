//! Model module containing the forecasting data structures.
//!
//! - [`ModelKind`] - supported model identifiers
//! - [`TimeSeries`] - dated observations
//! - [`ForecastTable`] - normalized forecast output
//! - [`Evaluation`] - accuracy records keyed by model label

mod evaluation;
mod forecast_table;
mod model_kind;
mod time_series;

pub use evaluation::{Evaluation, EvaluationRecord};
pub use forecast_table::{ForecastOrigin, ForecastPoint, ForecastTable};
pub use model_kind::ModelKind;
pub use time_series::{Observation, TimeSeries};
