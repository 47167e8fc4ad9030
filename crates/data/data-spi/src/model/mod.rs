//! Surveillance data model.

mod record;
mod series_key;

pub use record::{RecordSet, SurveillanceRecord};
pub use series_key::SeriesKey;
