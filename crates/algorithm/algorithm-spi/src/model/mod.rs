//! Value types produced by algorithms

mod prediction_interval;

pub use prediction_interval::PredictionInterval;
