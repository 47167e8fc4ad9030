//! Algorithm Service Provider Interface
//!
//! Contracts shared by every forecasting algorithm in amrcast:
//!
//! - [`Predictor`]: fit-then-predict interface over a univariate series
//! - [`IntervalPredictor`]: predictors that produce their own uncertainty bounds
//! - [`TsError`]: error type for algorithm operations
//! - [`PredictionInterval`]: point forecast with lower/upper bounds

pub mod contract;
pub mod error;
pub mod model;

pub use contract::{IntervalPredictor, Predictor};
pub use error::{Result, TsError};
pub use model::PredictionInterval;
