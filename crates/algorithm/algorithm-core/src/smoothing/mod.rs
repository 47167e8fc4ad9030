//! Smoothing algorithms for time series data
//!
//! - **Exponential Smoothing**: level only (SES), additive trend (Holt),
//!   optional damping and additive yearly seasonality (Holt-Winters)

pub mod exponential;

pub use exponential::{ExponentialSmoothing, Seasonality, Trend};
