//! Forecast error types

use crate::model::ModelKind;
use algorithm_spi::TsError;
use thiserror::Error;

/// Errors that can occur during dispatch, evaluation and forecast I/O
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Model identifier outside the supported set
    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    /// Model family compiled out of this build
    #[error("Model '{model}' is not available in this build")]
    ModelUnavailable { model: ModelKind },

    /// Series shorter than the model minimum
    #[error("Insufficient data for {model}: need at least {required} points, got {actual}")]
    InsufficientData {
        model: ModelKind,
        required: usize,
        actual: usize,
    },

    /// Zero-length forecast horizon
    #[error("Forecast horizon must be at least 1")]
    InvalidHorizon,

    /// Any other failure inside a model
    #[error("Algorithm error: {0}")]
    Algorithm(#[from] TsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ForecastError {
    /// Attach the model to algorithm errors that lack it.
    pub fn from_algorithm(model: ModelKind, err: TsError) -> Self {
        match err {
            TsError::InsufficientData { required, actual } => ForecastError::InsufficientData {
                model,
                required,
                actual,
            },
            other => ForecastError::Algorithm(other),
        }
    }
}
