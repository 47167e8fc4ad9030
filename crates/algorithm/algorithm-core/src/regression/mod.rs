//! Regression-style forecasting models
//!
//! - **ARIMA**: autoregressive integrated moving average
//! - **Prophet**: additive piecewise-linear trend with Fourier seasonality

pub mod arima;
#[cfg(feature = "prophet")]
pub mod prophet;

pub use arima::Arima;
#[cfg(feature = "prophet")]
pub use prophet::Prophet;
