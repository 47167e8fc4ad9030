//! Data error types.

use thiserror::Error;

/// Data source errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// File could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required header absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Date in none of the accepted formats
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Cell that does not parse as a number
    #[error("Invalid value for {column}: '{value}'")]
    InvalidValue { column: String, value: String },

    /// No usable record for the requested series
    #[error("No matching records for {0}")]
    NoMatchingRecords(String),

    /// Source did not finish before the extraction deadline
    #[error("Source '{name}' timed out after {millis} ms")]
    Timeout { name: String, millis: u128 },

    /// Failure reported by a source
    #[error("Source '{name}' failed: {message}")]
    Source { name: String, message: String },
}
