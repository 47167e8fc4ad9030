//! Concurrent extraction from several data sources
//!
//! Sources run on a dedicated rayon pool. Results are collected until every
//! source has answered or the deadline passes; whatever is still running
//! then is reported as timed out and its result discarded.

use data_spi::{DataError, DataSource, RecordSet, Result, SurveillanceRecord};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Extraction settings
#[derive(Debug, Clone, Copy)]
pub struct ExtractConfig {
    /// Worker threads in the extraction pool
    pub threads: usize,
    /// Blanket deadline for all sources
    pub deadline: Duration,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            threads: 4,
            deadline: Duration::from_secs(30),
        }
    }
}

/// Outcome of one extraction run
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Record sets in completion order
    pub completed: Vec<RecordSet>,
    /// Failed or timed-out sources with their errors
    pub failed: Vec<(String, DataError)>,
}

impl ExtractionReport {
    /// All completed records, flattened
    pub fn records(&self) -> Vec<SurveillanceRecord> {
        self.completed
            .iter()
            .flat_map(|set| set.records.iter().cloned())
            .collect()
    }

    /// Names of sources that missed the deadline
    pub fn timed_out(&self) -> Vec<&str> {
        self.failed
            .iter()
            .filter(|(_, e)| matches!(e, DataError::Timeout { .. }))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Any completed set is generated rather than observed
    pub fn has_synthetic(&self) -> bool {
        self.completed.iter().any(|set| set.synthetic)
    }
}

/// Fetch from every source concurrently.
///
/// # Errors
///
/// Only pool construction can fail; source failures land in the report.
pub fn extract(sources: Vec<Arc<dyn DataSource>>, config: ExtractConfig) -> Result<ExtractionReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .thread_name(|i| format!("amrcast-extract-{}", i))
        .panic_handler(|_| tracing::error!("data source panicked"))
        .build()
        .map_err(|e| DataError::Source {
            name: "extract".to_string(),
            message: e.to_string(),
        })?;

    let names: Vec<String> = sources.iter().map(|s| s.name().to_string()).collect();
    let (tx, rx) = mpsc::channel();
    for (index, source) in sources.into_iter().enumerate() {
        let tx = tx.clone();
        pool.spawn(move || {
            // receiver is gone once the deadline has passed
            let _ = tx.send((index, source.fetch()));
        });
    }
    drop(tx);

    let started = Instant::now();
    let deadline = started + config.deadline;
    let mut pending: Vec<bool> = vec![true; names.len()];
    let mut report = ExtractionReport::default();
    let mut remaining = names.len();

    while remaining > 0 {
        let wait = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok((index, result)) => {
                pending[index] = false;
                remaining -= 1;
                match result {
                    Ok(set) => report.completed.push(set),
                    Err(err) => {
                        warn!(source = %names[index], error = %err, "source failed");
                        report.failed.push((names[index].clone(), err));
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => break,
            Err(RecvTimeoutError::Disconnected) => {
                for (index, _) in pending.iter().enumerate().filter(|(_, p)| **p) {
                    report.failed.push((
                        names[index].clone(),
                        DataError::Source {
                            name: names[index].clone(),
                            message: "worker stopped without a result".to_string(),
                        },
                    ));
                }
                remaining = 0;
                pending.iter_mut().for_each(|p| *p = false);
            }
        }
    }

    for (index, _) in pending.iter().enumerate().filter(|(_, p)| **p) {
        warn!(source = %names[index], "source missed the extraction deadline");
        report.failed.push((
            names[index].clone(),
            DataError::Timeout {
                name: names[index].clone(),
                millis: config.deadline.as_millis(),
            },
        ));
    }

    info!(
        completed = report.completed.len(),
        failed = report.failed.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "extraction finished"
    );
    Ok(report)
}
