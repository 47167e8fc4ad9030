//! Forecast Facade
//!
//! High-level API for AMR surveillance forecasting. Re-exports all public
//! types from the forecast stack for convenient usage.
//!
//! ```no_run
//! use forecast_facade::prelude::*;
//!
//! # fn run(series: TimeSeries) -> Result<()> {
//! let config = ForecastConfig::default();
//! let table = get_forecast(&series, ModelKind::Arima, 12, &config)?;
//! let comparison = compare_models(&series, &ModelKind::ALL, 12, &config);
//! println!("{} points, {} placeholders", table.len(), comparison.placeholders().len());
//! # Ok(())
//! # }
//! ```

// Re-export everything from API (which includes SPI types)
pub use forecast_api::*;

// Re-export core modules for direct access
pub use forecast_core::{
    calendar, comparator, confidence, dispatcher, evaluator, export, placeholder, runners,
};

// Re-export operations at root
pub use forecast_core::{
    available_models, backtest, compare_models, evaluate_forecasts, get_forecast,
    is_available, placeholder_table, read_forecast_csv, read_forecast_csv_file, runner_for,
    train_test_split, write_evaluation_json, write_forecast_csv, write_forecast_csv_file,
    BacktestReport, Comparison, Frequency,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use forecast_api::prelude::*;
    pub use forecast_core::{
        backtest, compare_models, evaluate_forecasts, get_forecast, BacktestReport, Comparison,
    };
}
