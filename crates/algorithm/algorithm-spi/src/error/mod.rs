//! Error types for algorithm operations

mod ts_error;

pub use ts_error::{Result, TsError};
