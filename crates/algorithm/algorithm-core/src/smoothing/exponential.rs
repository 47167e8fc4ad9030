//! Exponential smoothing in error-correction form
//!
//! One model covers the three classic variants:
//!
//! - **Simple (SES)**: level only, flat forecasts
//! - **Holt**: level plus additive (optionally damped) trend
//! - **Holt-Winters**: Holt plus additive seasonality
//!
//! ## Choosing Parameters
//!
//! - `alpha` (level): higher values react faster to recent observations
//! - `beta` (trend): trend smoothing, ignored without a trend component
//! - `gamma` (seasonal): seasonal smoothing, ignored without seasonality
//! - damping `phi` in (0, 1]: shrinks the trend as the horizon grows
//!
//! ## Example
//!
//! ```rust
//! use algorithm_core::smoothing::{ExponentialSmoothing, Trend, Seasonality};
//! use algorithm_core::Predictor;
//!
//! // Monthly resistance percentages with a yearly cycle
//! let data: Vec<f64> = (0..36)
//!     .map(|i| 30.0 + 0.2 * i as f64 + 3.0 * (i as f64 * std::f64::consts::PI / 6.0).sin())
//!     .collect();
//!
//! let mut model = ExponentialSmoothing::new(
//!     0.3, 0.1, 0.2, Trend::Additive, Seasonality::Additive { period: 12 },
//! ).unwrap();
//! model.fit(&data).unwrap();
//! assert_eq!(model.predict(12).unwrap().len(), 12);
//! ```

use algorithm_spi::{Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

/// Trend component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// No trend (level only)
    None,
    /// Linear additive trend
    Additive,
    /// Additive trend damped by `phi` per step
    Damped { phi: f64 },
}

impl Trend {
    fn phi(&self) -> f64 {
        match self {
            Trend::None => 0.0,
            Trend::Additive => 1.0,
            Trend::Damped { phi } => *phi,
        }
    }
}

/// Seasonal component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seasonality {
    /// No seasonal component
    None,
    /// Additive seasonality repeating every `period` observations
    Additive { period: usize },
}

impl Seasonality {
    fn period(&self) -> usize {
        match self {
            Seasonality::None => 1,
            Seasonality::Additive { period } => *period,
        }
    }
}

/// Exponential smoothing with optional trend and seasonality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExponentialSmoothing {
    alpha: f64,
    beta: f64,
    gamma: f64,
    trend: Trend,
    seasonality: Seasonality,
    level: f64,
    slope: f64,
    seasonal: Vec<f64>,
    /// Observations seen during fit, used to phase the seasonal index
    n_obs: usize,
    residuals: Vec<f64>,
    fitted: bool,
}

impl ExponentialSmoothing {
    /// Create a model with explicit components
    ///
    /// `beta` is only validated when a trend is present and `gamma` only when
    /// seasonality is present.
    pub fn new(
        alpha: f64,
        beta: f64,
        gamma: f64,
        trend: Trend,
        seasonality: Seasonality,
    ) -> Result<Self> {
        check_unit("alpha", alpha)?;
        if trend != Trend::None {
            check_unit("beta", beta)?;
        }
        if let Trend::Damped { phi } = trend {
            if !(0.0 < phi && phi <= 1.0) {
                return Err(TsError::invalid_parameter("phi", "must be in (0, 1]"));
            }
        }
        if let Seasonality::Additive { period } = seasonality {
            check_unit("gamma", gamma)?;
            if period < 2 {
                return Err(TsError::invalid_parameter("period", "must be at least 2"));
            }
        }

        Ok(Self {
            alpha,
            beta,
            gamma,
            trend,
            seasonality,
            level: 0.0,
            slope: 0.0,
            seasonal: vec![0.0; seasonality.period()],
            n_obs: 0,
            residuals: Vec::new(),
            fitted: false,
        })
    }

    /// Simple exponential smoothing (level only)
    pub fn simple(alpha: f64) -> Result<Self> {
        Self::new(alpha, 0.0, 0.0, Trend::None, Seasonality::None)
    }

    /// Holt's linear trend method
    pub fn holt(alpha: f64, beta: f64) -> Result<Self> {
        Self::new(alpha, beta, 0.0, Trend::Additive, Seasonality::None)
    }

    /// Additive Holt-Winters
    pub fn holt_winters(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        Self::new(
            alpha,
            beta,
            gamma,
            Trend::Additive,
            Seasonality::Additive { period },
        )
    }

    /// Current (level, slope)
    pub fn components(&self) -> (f64, f64) {
        (self.level, self.slope)
    }

    /// Seasonal offsets, one per position in the cycle
    pub fn seasonal_components(&self) -> &[f64] {
        &self.seasonal
    }

    /// Configured trend component
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Configured seasonal component
    pub fn seasonality(&self) -> Seasonality {
        self.seasonality
    }

    fn has_seasonality(&self) -> bool {
        matches!(self.seasonality, Seasonality::Additive { .. })
    }

    /// Initialise state and return the index of the first observation to smooth.
    fn initialize(&mut self, data: &[f64]) -> usize {
        let period = self.seasonality.period();

        if self.has_seasonality() {
            let first = mean(&data[..period]);
            let second = mean(&data[period..2 * period]);
            self.slope = if self.trend == Trend::None {
                0.0
            } else {
                (second - first) / period as f64
            };
            // `first` sits at the centre of the opening cycle
            let centre = (period - 1) as f64 / 2.0;
            for (i, s) in self.seasonal.iter_mut().enumerate() {
                *s = data[i] - (first + self.slope * (i as f64 - centre));
            }
            self.level = first + self.slope * centre;
            period
        } else {
            self.level = data[0];
            self.slope = if self.trend == Trend::None {
                0.0
            } else {
                data[1] - data[0]
            };
            self.seasonal = vec![0.0];
            1
        }
    }
}

impl Predictor for ExponentialSmoothing {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        TsError::check_series(data, self.min_observations())?;

        let period = self.seasonality.period();
        let phi = self.trend.phi();
        let start = self.initialize(data);
        self.residuals = Vec::with_capacity(data.len() - start);

        for (t, &y) in data.iter().enumerate().skip(start) {
            let idx = t % period;
            let season = self.seasonal[idx];
            let prev_level = self.level;
            let damped_slope = phi * self.slope;

            self.residuals.push(y - (prev_level + damped_slope + season));

            self.level = self.alpha * (y - season) + (1.0 - self.alpha) * (prev_level + damped_slope);
            if self.trend != Trend::None {
                self.slope = self.beta * (self.level - prev_level) + (1.0 - self.beta) * damped_slope;
            }
            if self.has_seasonality() {
                self.seasonal[idx] = self.gamma * (y - self.level) + (1.0 - self.gamma) * season;
            }
        }

        if !self.level.is_finite() || !self.slope.is_finite() {
            return Err(TsError::NumericalError(
                "smoothing state diverged".to_string(),
            ));
        }

        self.n_obs = data.len();
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }

        let period = self.seasonality.period();
        let phi = self.trend.phi();
        let mut cumulative_phi = 0.0;
        let mut phi_power = 1.0;

        Ok((1..=steps)
            .map(|h| {
                phi_power *= phi;
                cumulative_phi += phi_power;
                let season = self.seasonal[(self.n_obs + h - 1) % period];
                self.level + cumulative_phi * self.slope + season
            })
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn min_observations(&self) -> usize {
        match (self.seasonality, self.trend) {
            (Seasonality::Additive { period }, _) => 2 * period,
            (Seasonality::None, Trend::None) => 2,
            (Seasonality::None, _) => 3,
        }
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if 0.0 < value && value < 1.0 {
        Ok(())
    } else {
        Err(TsError::invalid_parameter(
            name,
            "must be between 0 and 1 (exclusive)",
        ))
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
