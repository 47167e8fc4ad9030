//! Harmonization of raw surveillance records into a monthly series
//!
//! Records matching a [`SeriesKey`] are bucketed by calendar month, duplicate
//! months are averaged and missing months between the first and last
//! observation carry the previous value forward.

use chrono::{Datelike, Months, NaiveDate};
use data_spi::{DataError, Result, SeriesKey, SurveillanceRecord};
use forecast_spi::TimeSeries;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Build the monthly series for `key`.
///
/// # Errors
///
/// [`DataError::NoMatchingRecords`] when no matching record carries a
/// usable percentage.
pub fn harmonize(records: &[SurveillanceRecord], key: &SeriesKey) -> Result<TimeSeries> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    let mut matched = 0usize;
    let mut skipped = 0usize;

    for record in records.iter().filter(|r| key.matches(r)) {
        matched += 1;
        match record.percent() {
            Some(p) => {
                let bucket = buckets.entry(month_start(record.date)).or_insert((0.0, 0));
                bucket.0 += p;
                bucket.1 += 1;
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(%key, skipped, "records without a usable percentage were skipped");
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Err(DataError::NoMatchingRecords(key.to_string()));
    };

    let mut series = TimeSeries::default().with_label(key.to_string());
    let mut carried = None;
    let mut filled = 0usize;
    let mut month = first;
    while month <= last {
        let value = match buckets.get(&month) {
            Some(&(sum, count)) => Some(sum / count as f64),
            None => {
                filled += 1;
                carried
            }
        };
        if let Some(v) = value {
            series.push(month, v);
            carried = Some(v);
        }
        month = match month.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    debug!(%key, matched, months = series.len(), filled, "harmonized series");
    Ok(series)
}

/// Distinct series keys present in `records`, sorted.
pub fn list_keys(records: &[SurveillanceRecord]) -> Vec<SeriesKey> {
    records
        .iter()
        .map(SurveillanceRecord::key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(date: NaiveDate, pathogen: &str, percent: f64) -> SurveillanceRecord {
        SurveillanceRecord::new(date, percent).with_key(&SeriesKey::new(pathogen, "cipro", "NL"))
    }

    #[test]
    fn test_duplicates_are_averaged() {
        let records = vec![
            rec(d(2020, 1, 5), "E. coli", 10.0),
            rec(d(2020, 1, 20), "E. coli", 20.0),
            rec(d(2020, 2, 1), "E. coli", 12.0),
        ];
        let series = harmonize(&records, &SeriesKey::any()).unwrap();
        assert_eq!(series.dates(), vec![d(2020, 1, 1), d(2020, 2, 1)]);
        assert_eq!(series.values(), vec![15.0, 12.0]);
    }

    #[test]
    fn test_gaps_are_forward_filled() {
        let records = vec![
            rec(d(2020, 5, 1), "E. coli", 30.0),
            rec(d(2020, 1, 1), "E. coli", 10.0),
        ];
        let series = harmonize(&records, &SeriesKey::any()).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.values(), vec![10.0, 10.0, 10.0, 10.0, 30.0]);
        assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_filter_by_key() {
        let records = vec![
            rec(d(2020, 1, 1), "E. coli", 10.0),
            rec(d(2020, 1, 1), "K. pneumoniae", 50.0),
        ];
        let key = SeriesKey::new("k. PNEUMONIAE", "", "");
        let series = harmonize(&records, &key).unwrap();
        assert_eq!(series.values(), vec![50.0]);
        assert_eq!(series.label.as_deref(), Some("k. PNEUMONIAE / * / *"));
    }

    #[test]
    fn test_no_matching_records() {
        let records = vec![rec(d(2020, 1, 1), "E. coli", 10.0)];
        let err = harmonize(&records, &SeriesKey::new("A. baumannii", "", "")).unwrap_err();
        assert!(matches!(err, DataError::NoMatchingRecords(_)));

        let mut unusable = rec(d(2020, 1, 1), "E. coli", 0.0);
        unusable.percent_resistant = None;
        assert!(harmonize(&[unusable], &SeriesKey::any()).is_err());
    }

    #[test]
    fn test_list_keys() {
        let records = vec![
            rec(d(2020, 1, 1), "K. pneumoniae", 1.0),
            rec(d(2020, 2, 1), "E. coli", 1.0),
            rec(d(2020, 3, 1), "E. coli", 1.0),
        ];
        let keys = list_keys(&records);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].pathogen, "E. coli");
    }
}
