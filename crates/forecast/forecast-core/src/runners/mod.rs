//! Model runners
//!
//! One adapter per [`ModelKind`], each wrapping an algorithm from
//! `algorithm-core` with its configured defaults. Model families compiled
//! out of this build (cargo features `prophet`, `lstm`, `ensemble`, `svr`)
//! resolve to [`ForecastError::ModelUnavailable`].

mod learners;
mod statistical;

#[cfg(feature = "lstm")]
pub use learners::LstmRunner;
#[cfg(feature = "ensemble")]
pub use learners::{GradientBoostingRunner, RandomForestRunner};
#[cfg(feature = "svr")]
pub use learners::SvrRunner;
#[cfg(feature = "prophet")]
pub use statistical::ProphetRunner;
pub use statistical::{ArimaRunner, ExponentialSmoothingRunner};

use algorithm_core::Predictor;
use forecast_api::ForecastConfig;
use forecast_spi::{ForecastError, ModelKind, ModelRunner, Result, RunnerOutput};

/// Build the runner for `kind` from `config`.
pub fn runner_for(kind: ModelKind, config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    match kind {
        ModelKind::Arima => Ok(Box::new(ArimaRunner::new(config.arima))),
        ModelKind::ExponentialSmoothing => Ok(Box::new(ExponentialSmoothingRunner::new(
            config.exponential_smoothing,
        ))),
        ModelKind::Prophet => prophet(config),
        ModelKind::Lstm => lstm(config),
        ModelKind::RandomForest | ModelKind::GradientBoosting => ensemble(kind, config),
        ModelKind::Svr => svr(config),
    }
}

/// Whether the model family is compiled into this build
pub fn is_available(kind: ModelKind) -> bool {
    match kind {
        ModelKind::Arima | ModelKind::ExponentialSmoothing => true,
        ModelKind::Prophet => cfg!(feature = "prophet"),
        ModelKind::Lstm => cfg!(feature = "lstm"),
        ModelKind::RandomForest | ModelKind::GradientBoosting => cfg!(feature = "ensemble"),
        ModelKind::Svr => cfg!(feature = "svr"),
    }
}

/// Models compiled into this build, in display order
pub fn available_models() -> Vec<ModelKind> {
    ModelKind::ALL
        .into_iter()
        .filter(|k| is_available(*k))
        .collect()
}

#[cfg(feature = "prophet")]
fn prophet(config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    Ok(Box::new(ProphetRunner::new(
        config.prophet,
        config.confidence_level,
    )))
}

#[cfg(not(feature = "prophet"))]
fn prophet(_config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    Err(ForecastError::ModelUnavailable {
        model: ModelKind::Prophet,
    })
}

#[cfg(feature = "lstm")]
fn lstm(config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    Ok(Box::new(LstmRunner::new(config.lstm, config.seed)))
}

#[cfg(not(feature = "lstm"))]
fn lstm(_config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    Err(ForecastError::ModelUnavailable {
        model: ModelKind::Lstm,
    })
}

#[cfg(feature = "ensemble")]
fn ensemble(kind: ModelKind, config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    if kind == ModelKind::RandomForest {
        Ok(Box::new(RandomForestRunner::new(
            config.random_forest,
            config.seed,
        )))
    } else {
        Ok(Box::new(GradientBoostingRunner::new(
            config.gradient_boosting,
            config.seed,
        )))
    }
}

#[cfg(not(feature = "ensemble"))]
fn ensemble(kind: ModelKind, _config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    Err(ForecastError::ModelUnavailable { model: kind })
}

#[cfg(feature = "svr")]
fn svr(config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    Ok(Box::new(SvrRunner::new(config.svr)))
}

#[cfg(not(feature = "svr"))]
fn svr(_config: &ForecastConfig) -> Result<Box<dyn ModelRunner>> {
    Err(ForecastError::ModelUnavailable {
        model: ModelKind::Svr,
    })
}

/// Fit `model` on `history` and forecast `horizon` steps.
pub(crate) fn fit_predict<P: Predictor>(
    kind: ModelKind,
    mut model: P,
    history: &[f64],
    horizon: usize,
) -> Result<RunnerOutput> {
    model
        .fit(history)
        .map_err(|e| ForecastError::from_algorithm(kind, e))?;
    let forecast = model
        .predict(horizon)
        .map_err(|e| ForecastError::from_algorithm(kind, e))?;
    Ok(RunnerOutput::point(forecast, model.residuals().to_vec()))
}
