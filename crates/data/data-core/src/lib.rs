//! Data Source Core
//!
//! Implementations for surveillance data sources:
//! - CSV records and two-column series files
//! - Harmonization of raw records into one monthly series
//! - Seeded synthetic source for demos and tests
//! - Concurrent extraction from several sources under a deadline

pub mod csv_source;
pub mod extract;
pub mod harmonize;
pub mod synthetic;

pub use csv_source::{
    load_series, parse_date, read_records, read_series_csv, write_records_csv, CsvSource,
};
pub use extract::{extract, ExtractConfig, ExtractionReport};
pub use harmonize::{harmonize, list_keys};
pub use synthetic::SyntheticSource;

// Re-export SPI types
pub use data_spi::{DataError, DataSource, RecordSet, Result, SeriesKey, SurveillanceRecord};
