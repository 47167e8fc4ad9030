//! Machine learning algorithms for time series
//!
//! Each learner frames the series as a lag window (`lag` previous values
//! predict the next one) and forecasts recursively.
//!
//! ## Algorithms
//!
//! - **LSTM**: single-layer recurrent network trained with BPTT and Adam
//! - **Random forest**: bagged CART trees trained in parallel
//! - **Gradient boosting**: shallow CART trees fitted to residuals
//! - **SVR**: epsilon-insensitive kernel regression with an RBF kernel

#[cfg(feature = "lstm")]
pub mod lstm;

#[cfg(feature = "ensemble")]
pub mod gradient_boosting;
#[cfg(feature = "ensemble")]
pub mod random_forest;
#[cfg(feature = "ensemble")]
pub mod tree;

#[cfg(feature = "svr")]
pub mod svr;

#[cfg(feature = "lstm")]
pub use lstm::Lstm;

#[cfg(feature = "ensemble")]
pub use gradient_boosting::GradientBoosting;
#[cfg(feature = "ensemble")]
pub use random_forest::RandomForest;
#[cfg(feature = "ensemble")]
pub use tree::{RegressionTree, TreeParams};

#[cfg(feature = "svr")]
pub use svr::Svr;
