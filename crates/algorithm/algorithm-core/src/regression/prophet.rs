//! Prophet-style additive regression
//!
//! `y(t) = trend(t) + seasonality(t) + noise`
//!
//! - **Trend**: piecewise linear with potential changepoints spread over the
//!   first `changepoint_range` of the history. Rate adjustments at each
//!   changepoint are ridge-penalised, the Gaussian analogue of Prophet's
//!   sparse changepoint prior.
//! - **Seasonality**: Fourier series of the given period (12 for monthly data
//!   with a yearly cycle), fitted only when the history covers two cycles.
//! - **Uncertainty**: observation noise plus trend uncertainty from future
//!   rate changes drawn at the historical changepoint frequency and
//!   magnitude, giving bounds that widen with the horizon.
//!
//! Time is rescaled to `[0, 1]` over the history and `y` by its maximum
//! absolute value before fitting.
//!
//! ## Example
//!
//! ```rust
//! use algorithm_core::regression::Prophet;
//! use algorithm_core::{IntervalPredictor, Predictor};
//!
//! let data: Vec<f64> = (0..48)
//!     .map(|i| 25.0 + 0.3 * i as f64 + 2.0 * (i as f64 * std::f64::consts::PI / 6.0).cos())
//!     .collect();
//! let mut model = Prophet::new().with_seasonality(12.0, 3);
//! model.fit(&data).unwrap();
//! let interval = model.predict_interval(6, 0.8).unwrap();
//! assert!(interval.lower[5] < interval.forecast[5]);
//! ```

use crate::utils::linalg::ridge_least_squares;
use algorithm_spi::{IntervalPredictor, PredictionInterval, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const MIN_OBSERVATIONS: usize = 8;

/// Additive trend + seasonality model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prophet {
    n_changepoints: usize,
    changepoint_range: f64,
    changepoint_prior_scale: f64,
    seasonality_period: Option<f64>,
    fourier_order: usize,
    seasonality_prior_scale: f64,
    state: Option<FittedState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FittedState {
    n_obs: usize,
    y_scale: f64,
    /// Changepoint locations on the scaled time axis
    changepoints: Vec<f64>,
    seasonal: bool,
    coeffs: Vec<f64>,
    /// Residual standard deviation, scaled units
    sigma: f64,
    /// Mean absolute rate adjustment, scaled units
    mean_abs_delta: f64,
    /// Changepoints per unit of scaled time
    changepoint_rate: f64,
    residuals: Vec<f64>,
}

impl Default for Prophet {
    fn default() -> Self {
        Self::new()
    }
}

impl Prophet {
    /// Defaults: 25 changepoints over the first 80% of history, prior scale
    /// 0.05, no seasonality.
    pub fn new() -> Self {
        Self {
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_period: None,
            fourier_order: 0,
            seasonality_prior_scale: 10.0,
            state: None,
        }
    }

    pub fn with_changepoints(mut self, n: usize) -> Self {
        self.n_changepoints = n;
        self
    }

    pub fn with_changepoint_range(mut self, range: f64) -> Self {
        self.changepoint_range = range;
        self
    }

    pub fn with_changepoint_prior_scale(mut self, scale: f64) -> Self {
        self.changepoint_prior_scale = scale;
        self
    }

    /// Add a Fourier seasonality of `period` observations and `order` harmonics.
    pub fn with_seasonality(mut self, period: f64, order: usize) -> Self {
        self.seasonality_period = Some(period);
        self.fourier_order = order;
        self
    }

    pub fn with_seasonality_prior_scale(mut self, scale: f64) -> Self {
        self.seasonality_prior_scale = scale;
        self
    }

    pub fn without_seasonality(mut self) -> Self {
        self.seasonality_period = None;
        self.fourier_order = 0;
        self
    }

    /// Changepoint positions (scaled time) chosen by the last fit
    pub fn changepoints(&self) -> &[f64] {
        self.state
            .as_ref()
            .map(|s| s.changepoints.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the last fit included the seasonal component
    pub fn uses_seasonality(&self) -> bool {
        self.state.as_ref().map(|s| s.seasonal).unwrap_or(false)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0 < self.changepoint_range && self.changepoint_range <= 1.0) {
            return Err(TsError::invalid_parameter(
                "changepoint_range",
                "must be in (0, 1]",
            ));
        }
        if self.changepoint_prior_scale <= 0.0 {
            return Err(TsError::invalid_parameter(
                "changepoint_prior_scale",
                "must be positive",
            ));
        }
        if self.seasonality_prior_scale <= 0.0 {
            return Err(TsError::invalid_parameter(
                "seasonality_prior_scale",
                "must be positive",
            ));
        }
        if let Some(period) = self.seasonality_period {
            if period < 2.0 {
                return Err(TsError::invalid_parameter("period", "must be at least 2"));
            }
        }
        Ok(())
    }

    /// Fourier harmonics usable for a period (Nyquist bound).
    fn effective_order(&self, period: f64) -> usize {
        self.fourier_order.min((period / 2.0).floor() as usize)
    }

    fn design_row(&self, index: f64, t: f64, changepoints: &[f64], seasonal: bool) -> Vec<f64> {
        let mut row = Vec::with_capacity(2 + changepoints.len() + 2 * self.fourier_order);
        row.push(1.0);
        row.push(t);
        row.extend(changepoints.iter().map(|&s| (t - s).max(0.0)));
        if let (true, Some(period)) = (seasonal, self.seasonality_period) {
            for k in 1..=self.effective_order(period) {
                let angle = 2.0 * PI * k as f64 * index / period;
                row.push(angle.sin());
                row.push(angle.cos());
            }
        }
        row
    }

    fn select_changepoints(&self, n: usize) -> Vec<f64> {
        let span = ((n - 1) as f64 * self.changepoint_range).floor() as usize;
        let count = self.n_changepoints.min(span.saturating_sub(1));
        if count == 0 {
            return Vec::new();
        }
        let last = (n - 1) as f64;
        (1..=count)
            .map(|j| {
                let idx = (j as f64 * span as f64 / (count + 1) as f64).round();
                idx / last
            })
            .collect()
    }

    fn scaled_time(n_obs: usize, index: f64) -> f64 {
        index / (n_obs - 1) as f64
    }
}

impl Predictor for Prophet {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        self.validate()?;
        TsError::check_series(data, MIN_OBSERVATIONS)?;

        let n = data.len();
        let y_scale = data
            .iter()
            .map(|y| y.abs())
            .fold(0.0, f64::max)
            .max(1e-9);
        let y: Vec<f64> = data.iter().map(|v| v / y_scale).collect();

        let changepoints = self.select_changepoints(n);
        let seasonal = match self.seasonality_period {
            Some(period) => {
                self.effective_order(period) > 0 && n as f64 >= 2.0 * period
            }
            None => false,
        };

        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let idx = i as f64;
                self.design_row(idx, Self::scaled_time(n, idx), &changepoints, seasonal)
            })
            .collect();

        let n_cols = rows[0].len();
        let cp_penalty = 0.01 / self.changepoint_prior_scale.powi(2);
        let season_penalty = 0.01 / self.seasonality_prior_scale.powi(2);
        let mut penalty = vec![0.0, 0.0];
        penalty.extend(std::iter::repeat(cp_penalty).take(changepoints.len()));
        penalty.resize(n_cols, season_penalty);

        let coeffs = ridge_least_squares(&rows, &y, &penalty)?;

        let residuals_scaled: Vec<f64> = rows
            .iter()
            .zip(&y)
            .map(|(row, target)| target - dot(row, &coeffs))
            .collect();
        let sigma = (residuals_scaled.iter().map(|r| r * r).sum::<f64>()
            / (n.saturating_sub(n_cols).max(1)) as f64)
            .sqrt();

        let deltas = &coeffs[2..2 + changepoints.len()];
        let mean_abs_delta = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().map(|d| d.abs()).sum::<f64>() / deltas.len() as f64
        };
        let changepoint_rate = if changepoints.is_empty() {
            0.0
        } else {
            changepoints.len() as f64 / self.changepoint_range
        };

        tracing::debug!(
            n_obs = n,
            changepoints = changepoints.len(),
            seasonal,
            sigma,
            "fitted Prophet-style model"
        );

        self.state = Some(FittedState {
            n_obs: n,
            y_scale,
            changepoints,
            seasonal,
            coeffs,
            sigma,
            mean_abs_delta,
            changepoint_rate,
            residuals: residuals_scaled.iter().map(|r| r * y_scale).collect(),
        });
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let state = self.state.as_ref().ok_or(TsError::NotFitted)?;
        Ok((1..=steps)
            .map(|h| {
                let idx = (state.n_obs - 1 + h) as f64;
                let t = Self::scaled_time(state.n_obs, idx);
                let row = self.design_row(idx, t, &state.changepoints, state.seasonal);
                dot(&row, &state.coeffs) * state.y_scale
            })
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    fn min_observations(&self) -> usize {
        MIN_OBSERVATIONS
    }

    fn residuals(&self) -> &[f64] {
        self.state
            .as_ref()
            .map(|s| s.residuals.as_slice())
            .unwrap_or(&[])
    }
}

impl IntervalPredictor for Prophet {
    fn predict_interval(&self, steps: usize, confidence_level: f64) -> Result<PredictionInterval> {
        let state = self.state.as_ref().ok_or(TsError::NotFitted)?;
        let forecast = self.predict(steps)?;

        // Var[trend shift at Δ] = rate * 2λ² * Δ³ / 3 for Laplace(0, λ) rate changes
        let std_errors: Vec<f64> = (1..=steps)
            .map(|h| {
                let delta_t = h as f64 / (state.n_obs - 1) as f64;
                let trend_var = state.changepoint_rate
                    * 2.0
                    * state.mean_abs_delta.powi(2)
                    * delta_t.powi(3)
                    / 3.0;
                (state.sigma.powi(2) + trend_var).sqrt() * state.y_scale
            })
            .collect();

        Ok(PredictionInterval::symmetric(
            forecast,
            &std_errors,
            confidence_level,
        ))
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
