//! Data Source Service Provider Interface
//!
//! Defines the surveillance record model and the contract for sources that
//! produce it.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::DataSource;
pub use error::{DataError, Result};
pub use model::{RecordSet, SeriesKey, SurveillanceRecord};
