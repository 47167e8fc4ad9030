//! Forecast configuration
//!
//! Defaults reproduce the fixed per-model settings. Every struct is
//! `#[serde(default)]`, so a JSON file only needs the fields it changes.

use forecast_spi::{ForecastError, ModelKind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ARIMA(p, d, q) orders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArimaConfig {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

impl Default for ArimaConfig {
    fn default() -> Self {
        Self { p: 1, d: 1, q: 1 }
    }
}

/// Holt-Winters smoothing
///
/// The seasonal component is used only when the history covers two full
/// `seasonal_period` cycles; otherwise the runner falls back to Holt's
/// linear trend (or simple smoothing when `trend` is off).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExponentialSmoothingConfig {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub seasonal_period: usize,
    pub trend: bool,
    /// Damping factor for the trend; `None` keeps it undamped
    pub damping: Option<f64>,
}

impl Default for ExponentialSmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.2,
            seasonal_period: 12,
            trend: true,
            damping: None,
        }
    }
}

/// Piecewise-linear trend with Fourier seasonality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProphetConfig {
    pub n_changepoints: usize,
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
    /// Seasonal period in observations (12 for monthly data)
    pub seasonality_period: f64,
    pub fourier_order: usize,
    pub seasonality_prior_scale: f64,
}

impl Default for ProphetConfig {
    fn default() -> Self {
        Self {
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_period: 12.0,
            fourier_order: 3,
            seasonality_prior_scale: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LstmConfig {
    pub lag: usize,
    pub hidden: usize,
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for LstmConfig {
    fn default() -> Self {
        Self {
            lag: 12,
            hidden: 16,
            epochs: 100,
            learning_rate: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub lag: usize,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 8,
            min_samples_leaf: 1,
            lag: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientBoostingConfig {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub lag: usize,
}

impl Default for GradientBoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            lag: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvrConfig {
    pub c: f64,
    pub epsilon: f64,
    /// RBF width; `None` uses `1 / lag`
    pub gamma: Option<f64>,
    pub lag: usize,
}

impl Default for SvrConfig {
    fn default() -> Self {
        Self {
            c: 10.0,
            epsilon: 0.05,
            gamma: None,
            lag: 12,
        }
    }
}

/// Top-level configuration for dispatch, comparison and backtesting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Steps to forecast
    pub horizon: usize,
    /// Models to compare, in output order
    pub models: Vec<ModelKind>,
    /// Coverage of the prediction bounds (e.g. 0.95)
    pub confidence_level: f64,
    /// Attach residual-based bounds to models without native intervals
    pub intervals: bool,
    /// Points held out for backtesting
    pub holdout: usize,
    /// Seed for model initialisation and placeholder noise
    pub seed: u64,
    pub arima: ArimaConfig,
    pub exponential_smoothing: ExponentialSmoothingConfig,
    pub prophet: ProphetConfig,
    pub lstm: LstmConfig,
    pub random_forest: RandomForestConfig,
    pub gradient_boosting: GradientBoostingConfig,
    pub svr: SvrConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 12,
            models: ModelKind::ALL.to_vec(),
            confidence_level: 0.95,
            intervals: false,
            holdout: 12,
            seed: 42,
            arima: ArimaConfig::default(),
            exponential_smoothing: ExponentialSmoothingConfig::default(),
            prophet: ProphetConfig::default(),
            lstm: LstmConfig::default(),
            random_forest: RandomForestConfig::default(),
            gradient_boosting: GradientBoostingConfig::default(),
            svr: SvrConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Parse JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ForecastError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
            .map_err(|e| ForecastError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ForecastError::Config(e.to_string()))
    }

    /// Check top-level settings.
    ///
    /// Model parameters are validated by the models themselves when they run,
    /// so a bad model setting fails only that model.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::InvalidHorizon);
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::Config(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }
        if self.models.is_empty() {
            return Err(ForecastError::Config("no models selected".to_string()));
        }
        Ok(())
    }
}
