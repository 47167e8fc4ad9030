//! Predictor traits for time series algorithms

use crate::error::Result;
use crate::model::PredictionInterval;

/// Common fit-predict interface for univariate forecasting algorithms
///
/// Every model the forecast dispatcher can run implements this trait.
/// Models consume evenly spaced observations and forecast `steps` periods
/// past the last one.
///
/// # Example
///
/// ```rust,ignore
/// use algorithm_spi::Predictor;
///
/// fn forecast<P: Predictor>(model: &mut P, history: &[f64], horizon: usize) -> algorithm_spi::Result<Vec<f64>> {
///     model.fit(history)?;
///     model.predict(horizon)
/// }
/// ```
pub trait Predictor {
    /// Fit the model to historical observations
    fn fit(&mut self, data: &[f64]) -> Result<()>;

    /// Forecast the next `steps` values
    fn predict(&self, steps: usize) -> Result<Vec<f64>>;

    /// Whether `fit` has succeeded
    fn is_fitted(&self) -> bool;

    /// Minimum number of observations `fit` accepts
    fn min_observations(&self) -> usize;

    /// One-step-ahead in-sample residuals from the last fit
    ///
    /// Used to derive prediction intervals for models that have no native
    /// uncertainty estimate. Empty when the model does not track them.
    fn residuals(&self) -> &[f64] {
        &[]
    }
}

/// Predictors that produce their own uncertainty bounds
pub trait IntervalPredictor: Predictor {
    /// Forecast `steps` values with bounds at the given confidence level
    fn predict_interval(&self, steps: usize, confidence_level: f64) -> Result<PredictionInterval>;
}
