//! Contract module containing trait definitions for forecast operations

mod model_runner;

pub use model_runner::{ModelRunner, RunnerOutput};
