//! Forecast Core
//!
//! Core implementations for the forecasting layer:
//! - Model runners wrapping every supported algorithm
//! - Single-model dispatch ([`get_forecast`])
//! - Failure-isolating multi-model comparison ([`compare_models`])
//! - Holdout evaluation and backtesting ([`evaluate_forecasts`], [`backtest`])
//! - Residual-based prediction intervals and date arithmetic
//! - CSV/JSON export of forecast tables and evaluation results

pub mod calendar;
pub mod comparator;
pub mod confidence;
pub mod dispatcher;
pub mod evaluator;
pub mod export;
pub mod placeholder;
pub mod runners;

pub use calendar::Frequency;
pub use comparator::{compare_models, Comparison};
pub use dispatcher::get_forecast;
pub use evaluator::{backtest, evaluate_forecasts, train_test_split, BacktestReport};
pub use export::{
    read_forecast_csv, read_forecast_csv_file, write_evaluation_json, write_forecast_csv,
    write_forecast_csv_file,
};
pub use placeholder::placeholder_table;
pub use runners::{available_models, is_available, runner_for};

// Re-export from API for convenience
pub use forecast_api::{
    ArimaConfig, ExponentialSmoothingConfig, ForecastConfig, ForecastConfigBuilder,
    GradientBoostingConfig, LstmConfig, ProphetConfig, RandomForestConfig, SvrConfig,
};

// Re-export SPI types
pub use forecast_spi::{
    Evaluation, EvaluationRecord, ForecastError, ForecastOrigin, ForecastPoint, ForecastTable,
    ModelKind, ModelRunner, Observation, Result, RunnerOutput, TimeSeries,
};
