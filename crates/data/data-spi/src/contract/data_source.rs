//! Data source trait definition.

use crate::error::Result;
use crate::model::RecordSet;

/// Trait for sources of antimicrobial resistance surveillance records.
///
/// Implementations must be shareable across threads: extraction runs
/// several sources concurrently.
pub trait DataSource: Send + Sync {
    /// Data source name.
    fn name(&self) -> &str;

    /// Fetch every record the source holds.
    fn fetch(&self) -> Result<RecordSet>;
}
