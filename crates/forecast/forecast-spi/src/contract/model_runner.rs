//! Trait for model adapters

use crate::error::Result;
use crate::model::ModelKind;

/// Raw output of one model run, aligned step by step with the horizon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunnerOutput {
    pub forecast: Vec<f64>,
    pub lower: Option<Vec<f64>>,
    pub upper: Option<Vec<f64>>,
    /// In-sample one-step residuals, used for residual-based intervals
    pub residuals: Vec<f64>,
}

impl RunnerOutput {
    pub fn point(forecast: Vec<f64>, residuals: Vec<f64>) -> Self {
        Self {
            forecast,
            lower: None,
            upper: None,
            residuals,
        }
    }

    pub fn has_bounds(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}

/// Adapter wrapping one algorithm with a fixed configuration.
///
/// Runners see bare values; dates are attached by the dispatcher.
pub trait ModelRunner: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Shortest history the runner accepts
    fn min_observations(&self) -> usize;

    /// Fit on `history` and forecast `horizon` steps ahead
    fn run(&self, history: &[f64], horizon: usize) -> Result<RunnerOutput>;
}
