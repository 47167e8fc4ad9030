//! Runners for the statistical models: ARIMA, exponential smoothing and
//! the Prophet-style additive regression.

use super::fit_predict;
use algorithm_core::{Arima, ExponentialSmoothing, Seasonality, Trend};
use forecast_api::{ArimaConfig, ExponentialSmoothingConfig};
use forecast_spi::{ForecastError, ModelKind, ModelRunner, Result, RunnerOutput};

#[derive(Debug, Clone, Copy)]
pub struct ArimaRunner {
    config: ArimaConfig,
}

impl ArimaRunner {
    pub fn new(config: ArimaConfig) -> Self {
        Self { config }
    }
}

impl ModelRunner for ArimaRunner {
    fn kind(&self) -> ModelKind {
        ModelKind::Arima
    }

    fn min_observations(&self) -> usize {
        self.config.p + self.config.d + self.config.q + 10
    }

    fn run(&self, history: &[f64], horizon: usize) -> Result<RunnerOutput> {
        let ArimaConfig { p, d, q } = self.config;
        let model =
            Arima::new(p, d, q).map_err(|e| ForecastError::from_algorithm(self.kind(), e))?;
        fit_predict(self.kind(), model, history, horizon)
    }
}

/// Holt-Winters when two seasonal cycles are available, otherwise Holt
/// (three or more points) or simple smoothing.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialSmoothingRunner {
    config: ExponentialSmoothingConfig,
}

impl ExponentialSmoothingRunner {
    pub fn new(config: ExponentialSmoothingConfig) -> Self {
        Self { config }
    }

    fn components(&self, n: usize) -> (Trend, Seasonality) {
        let period = self.config.seasonal_period;
        let trend = match (self.config.trend, self.config.damping) {
            (false, _) => Trend::None,
            _ if n < 3 => Trend::None,
            (true, Some(phi)) => Trend::Damped { phi },
            (true, None) => Trend::Additive,
        };
        let seasonality = if period >= 2 && n >= 2 * period {
            Seasonality::Additive { period }
        } else {
            Seasonality::None
        };
        (trend, seasonality)
    }
}

impl ModelRunner for ExponentialSmoothingRunner {
    fn kind(&self) -> ModelKind {
        ModelKind::ExponentialSmoothing
    }

    fn min_observations(&self) -> usize {
        2
    }

    fn run(&self, history: &[f64], horizon: usize) -> Result<RunnerOutput> {
        let (trend, seasonality) = self.components(history.len());
        tracing::debug!(?trend, ?seasonality, "exponential smoothing components");
        let model = ExponentialSmoothing::new(
            self.config.alpha,
            self.config.beta,
            self.config.gamma,
            trend,
            seasonality,
        )
        .map_err(|e| ForecastError::from_algorithm(self.kind(), e))?;
        fit_predict(self.kind(), model, history, horizon)
    }
}

#[cfg(feature = "prophet")]
pub use prophet::ProphetRunner;

#[cfg(feature = "prophet")]
mod prophet {
    use algorithm_core::{IntervalPredictor, Predictor, Prophet};
    use forecast_api::ProphetConfig;
    use forecast_spi::{ForecastError, ModelKind, ModelRunner, Result, RunnerOutput};

    /// Always returns bounds at the configured confidence level
    #[derive(Debug, Clone, Copy)]
    pub struct ProphetRunner {
        config: ProphetConfig,
        confidence_level: f64,
    }

    impl ProphetRunner {
        pub fn new(config: ProphetConfig, confidence_level: f64) -> Self {
            Self {
                config,
                confidence_level,
            }
        }

        fn model(&self) -> Prophet {
            Prophet::new()
                .with_changepoints(self.config.n_changepoints)
                .with_changepoint_range(self.config.changepoint_range)
                .with_changepoint_prior_scale(self.config.changepoint_prior_scale)
                .with_seasonality(self.config.seasonality_period, self.config.fourier_order)
                .with_seasonality_prior_scale(self.config.seasonality_prior_scale)
        }
    }

    impl ModelRunner for ProphetRunner {
        fn kind(&self) -> ModelKind {
            ModelKind::Prophet
        }

        fn min_observations(&self) -> usize {
            self.model().min_observations()
        }

        fn run(&self, history: &[f64], horizon: usize) -> Result<RunnerOutput> {
            let to_err = |e| ForecastError::from_algorithm(ModelKind::Prophet, e);
            let mut model = self.model();
            model.fit(history).map_err(to_err)?;
            let interval = model
                .predict_interval(horizon, self.confidence_level)
                .map_err(to_err)?;
            Ok(RunnerOutput {
                forecast: interval.forecast,
                lower: Some(interval.lower),
                upper: Some(interval.upper),
                residuals: model.residuals().to_vec(),
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_prophet_runner_returns_bounds() {
            let history: Vec<f64> = (0..36).map(|i| 10.0 + 0.5 * i as f64).collect();
            let runner = ProphetRunner::new(ProphetConfig::default(), 0.9);
            let out = runner.run(&history, 4).unwrap();
            assert!(out.has_bounds());
            assert_eq!(out.lower.as_ref().map(Vec::len), Some(4));
            assert_eq!(runner.min_observations(), 8);
        }
    }
}
