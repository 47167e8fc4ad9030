//! End-to-end tests for surveillance data ingestion
//!
//! Exercises file sources, harmonization and concurrent extraction through
//! the crate's public API.

use chrono::NaiveDate;
use data_core::{
    extract, harmonize, list_keys, load_series, write_records_csv, CsvSource, DataError,
    DataSource, ExtractConfig, RecordSet, SeriesKey, SyntheticSource,
};
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn e2e_csv_source_to_series() {
    let file = write_temp(
        "date,country,pathogen,antibiotic,resistant,tested,percent_resistant\n\
         2021-01-01,NL,E. coli,ciprofloxacin,10,100,\n\
         2021-01-15,NL,E. coli,ciprofloxacin,30,100,\n\
         2021-03-01,NL,E. coli,ciprofloxacin,,,18.5\n\
         2021-02-01,DE,E. coli,ciprofloxacin,,,40.0\n",
    );

    let set = CsvSource::new(file.path()).fetch().unwrap();
    assert!(!set.synthetic);
    assert_eq!(set.len(), 4);

    let key = SeriesKey::new("e. coli", "ciprofloxacin", "nl");
    let series = harmonize(&set.records, &key).unwrap();
    assert_eq!(series.values(), vec![20.0, 20.0, 18.5]);
    assert_eq!(list_keys(&set.records).len(), 2);
}

#[test]
fn e2e_load_series_detects_layout() {
    let series_file = write_temp("date,value\n2020-01,5.0\n2020-02,6.0\n2020-03,7.0\n");
    let series = load_series(series_file.path(), &SeriesKey::any()).unwrap();
    assert_eq!(series.len(), 3);

    let records_file = write_temp("date,percent_resistant\n2020,5.0\n2021,6.0\n");
    let series = load_series(records_file.path(), &SeriesKey::any()).unwrap();
    // yearly records are forward-filled month by month
    assert_eq!(series.len(), 13);
    assert_eq!(series.last_value(), Some(6.0));
}

#[test]
fn e2e_missing_file_is_io_error() {
    let err = load_series("/nonexistent/amr.csv", &SeriesKey::any()).unwrap_err();
    assert!(matches!(err, DataError::Io(_)));
}

#[test]
fn e2e_synthetic_round_trip_through_csv() {
    let keys = vec![
        SeriesKey::new("S. aureus", "meticillin", "PT"),
        SeriesKey::new("E. faecium", "vancomycin", "IE"),
    ];
    let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
    let generated = SyntheticSource::new(keys.clone(), start, 24).fetch().unwrap();

    let file = NamedTempFile::new().unwrap();
    write_records_csv(file.reopen().unwrap(), &generated.records).unwrap();

    let loaded = CsvSource::new(file.path()).with_name("roundtrip").fetch().unwrap();
    assert_eq!(loaded.source, "roundtrip");
    assert_eq!(loaded.records.len(), generated.records.len());
    assert_eq!(list_keys(&loaded.records), {
        let mut k = keys.clone();
        k.sort();
        k
    });

    let series = load_series(file.path(), &keys[0]).unwrap();
    assert_eq!(series.len(), 24);
}

struct Slow;

impl DataSource for Slow {
    fn name(&self) -> &str {
        "slow"
    }

    fn fetch(&self) -> data_core::Result<RecordSet> {
        thread::sleep(Duration::from_millis(800));
        Ok(RecordSet::default())
    }
}

#[test]
fn e2e_extract_reports_timeouts() {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let sources: Vec<Arc<dyn DataSource>> = vec![
        Arc::new(Slow),
        Arc::new(SyntheticSource::new(vec![SeriesKey::any()], start, 12)),
    ];
    let config = ExtractConfig {
        threads: 2,
        deadline: Duration::from_millis(200),
    };

    let report = extract(sources, config).unwrap();
    assert_eq!(report.completed.len(), 1);
    assert!(report.has_synthetic());
    assert_eq!(report.timed_out(), vec!["slow"]);
    assert!(matches!(
        report.failed[0].1,
        DataError::Timeout { millis: 200, .. }
    ));
}
