//! Shared utilities for the forecasting algorithms

pub mod lag;
pub mod linalg;
pub mod metrics;
pub mod scaling;

pub use lag::{lag_matrix, recursive_forecast};
pub use metrics::{mae, mape, mse, rmse, smape, MetricsSummary};
pub use scaling::{MinMaxScaler, StandardScaler};
