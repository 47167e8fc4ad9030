//! Forecast configuration builder.

use crate::config::{
    ArimaConfig, ExponentialSmoothingConfig, ForecastConfig, GradientBoostingConfig, LstmConfig,
    ProphetConfig, RandomForestConfig, SvrConfig,
};
use forecast_spi::{ModelKind, Result};

/// Fluent builder for [`ForecastConfig`].
///
/// ```rust
/// use forecast_api::{ForecastConfigBuilder, ModelKind};
///
/// let config = ForecastConfigBuilder::new()
///     .horizon(6)
///     .models([ModelKind::Arima, ModelKind::ExponentialSmoothing])
///     .intervals(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.horizon, 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForecastConfigBuilder {
    config: ForecastConfig,
}

impl ForecastConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from JSON.
    pub fn from_config(config: ForecastConfig) -> Self {
        Self { config }
    }

    // ========== Run settings ==========

    pub fn horizon(mut self, horizon: usize) -> Self {
        self.config.horizon = horizon;
        self
    }

    pub fn models<I>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = ModelKind>,
    {
        self.config.models = models.into_iter().collect();
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    pub fn intervals(mut self, enabled: bool) -> Self {
        self.config.intervals = enabled;
        self
    }

    pub fn holdout(mut self, holdout: usize) -> Self {
        self.config.holdout = holdout;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    // ========== Model settings ==========

    pub fn arima(mut self, config: ArimaConfig) -> Self {
        self.config.arima = config;
        self
    }

    pub fn exponential_smoothing(mut self, config: ExponentialSmoothingConfig) -> Self {
        self.config.exponential_smoothing = config;
        self
    }

    pub fn prophet(mut self, config: ProphetConfig) -> Self {
        self.config.prophet = config;
        self
    }

    pub fn lstm(mut self, config: LstmConfig) -> Self {
        self.config.lstm = config;
        self
    }

    pub fn random_forest(mut self, config: RandomForestConfig) -> Self {
        self.config.random_forest = config;
        self
    }

    pub fn gradient_boosting(mut self, config: GradientBoostingConfig) -> Self {
        self.config.gradient_boosting = config;
        self
    }

    pub fn svr(mut self, config: SvrConfig) -> Self {
        self.config.svr = config;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<ForecastConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
