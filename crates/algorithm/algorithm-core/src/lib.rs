//! Algorithm Core Implementations
//!
//! Native forecasting algorithms behind the amrcast model dispatcher,
//! organized by category:
//!
//! - [`smoothing`]: exponential smoothing (level, trend, seasonal)
//! - [`regression`]: ARIMA and the Prophet-style additive regression
//! - [`ml`]: lag-window learners (LSTM, random forest, gradient boosting, SVR)
//! - [`utils`]: metrics, scaling, lag features and small linear algebra
//!
//! Model families other than ARIMA and exponential smoothing sit behind
//! cargo features (`prophet`, `lstm`, `ensemble`, `svr`), all enabled by
//! default.
//!
//! ## Example
//!
//! ```rust
//! use algorithm_core::prelude::*;
//!
//! let data: Vec<f64> = (1..=24).map(|x| 20.0 + 0.5 * x as f64).collect();
//! let mut model = Arima::new(1, 1, 0).unwrap();
//! model.fit(&data).unwrap();
//! let forecast = model.predict(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

pub mod ml;
pub mod regression;
pub mod smoothing;
pub mod utils;

pub use algorithm_spi::{IntervalPredictor, PredictionInterval, Predictor, Result, TsError};

pub use regression::Arima;
pub use smoothing::{ExponentialSmoothing, Seasonality, Trend};

#[cfg(feature = "prophet")]
pub use regression::Prophet;

#[cfg(feature = "lstm")]
pub use ml::Lstm;

#[cfg(feature = "ensemble")]
pub use ml::{GradientBoosting, RandomForest, RegressionTree, TreeParams};

#[cfg(feature = "svr")]
pub use ml::Svr;

/// Prelude module for convenient imports
pub mod prelude {
    pub use algorithm_spi::{IntervalPredictor, PredictionInterval, Predictor, Result, TsError};

    pub use crate::regression::Arima;
    pub use crate::smoothing::{ExponentialSmoothing, Seasonality, Trend};

    #[cfg(feature = "prophet")]
    pub use crate::regression::Prophet;

    #[cfg(feature = "lstm")]
    pub use crate::ml::Lstm;

    #[cfg(feature = "ensemble")]
    pub use crate::ml::{GradientBoosting, RandomForest};

    #[cfg(feature = "svr")]
    pub use crate::ml::Svr;
}
