//! CSV surveillance files
//!
//! Two layouts are understood:
//!
//! - record files with a `date` column plus `percent_resistant` or the
//!   `resistant`/`tested` pair, and optional `country`, `pathogen`,
//!   `antibiotic` columns;
//! - two-column series files with `date,value`.
//!
//! Headers are matched case-insensitively. Dates may be `YYYY-MM-DD`,
//! `YYYY-MM` or `YYYY`.

use crate::harmonize::harmonize;
use chrono::NaiveDate;
use data_spi::{DataError, DataSource, RecordSet, Result, SeriesKey, SurveillanceRecord};
use forecast_spi::TimeSeries;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Records file on disk
#[derive(Debug, Clone)]
pub struct CsvSource {
    name: String,
    path: PathBuf,
}

impl CsvSource {
    /// Source named after the file stem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "csv".to_string());
        Self { name, path }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for CsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<RecordSet> {
        let records = read_records(File::open(&self.path)?)?;
        info!(source = %self.name, records = records.len(), "loaded surveillance records");
        Ok(RecordSet::observed(&self.name, records))
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; partial dates resolve to the
/// first day of the month or year.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    let invalid = || DataError::InvalidDate(raw.to_string());
    match s.len() {
        4 => NaiveDate::parse_from_str(&format!("{}-01-01", s), "%Y-%m-%d"),
        7 => NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d"),
    }
    .map_err(|_| invalid())
}

struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
                .collect(),
        )
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    fn text(&self, row: &csv::StringRecord, name: &str) -> String {
        self.index(name)
            .and_then(|i| row.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    fn number<T: FromStr>(&self, row: &csv::StringRecord, name: &str) -> Result<Option<T>> {
        let cell = self.text(row, name);
        if cell.is_empty() {
            return Ok(None);
        }
        cell.parse().map(Some).map_err(|_| DataError::InvalidValue {
            column: name.to_string(),
            value: cell,
        })
    }

    fn has_values(&self) -> bool {
        self.index("percent_resistant").is_some()
            || (self.index("resistant").is_some() && self.index("tested").is_some())
    }
}

fn reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Read surveillance records from CSV.
///
/// # Errors
///
/// [`DataError::MissingColumn`] when `date` is absent or when neither
/// `percent_resistant` nor both `resistant` and `tested` are present.
pub fn read_records<R: Read>(input: R) -> Result<Vec<SurveillanceRecord>> {
    let mut csv = reader(input);
    let columns = Columns::new(csv.headers()?);
    let date_col = columns.require("date")?;
    if !columns.has_values() {
        return Err(DataError::MissingColumn("percent_resistant".to_string()));
    }

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        let date = parse_date(row.get(date_col).unwrap_or_default())?;
        records.push(SurveillanceRecord {
            date,
            country: columns.text(&row, "country"),
            pathogen: columns.text(&row, "pathogen"),
            antibiotic: columns.text(&row, "antibiotic"),
            resistant: columns.number(&row, "resistant")?,
            tested: columns.number(&row, "tested")?,
            percent_resistant: columns.number(&row, "percent_resistant")?,
        });
    }
    debug!(records = records.len(), "parsed record csv");
    Ok(records)
}

/// Read a `date,value` series. Rows with an empty value are skipped.
pub fn read_series_csv<R: Read>(input: R) -> Result<TimeSeries> {
    let mut csv = reader(input);
    let columns = Columns::new(csv.headers()?);
    let date_col = columns.require("date")?;
    columns.require("value")?;

    let mut series = TimeSeries::default();
    for row in csv.records() {
        let row = row?;
        if let Some(value) = columns.number::<f64>(&row, "value")? {
            series.push(parse_date(row.get(date_col).unwrap_or_default())?, value);
        }
    }
    Ok(series)
}

/// Write records with the header `date,country,pathogen,antibiotic,resistant,tested,percent_resistant`.
pub fn write_records_csv<W: Write>(writer: W, records: &[SurveillanceRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Load a series from either layout.
///
/// Series files are taken as-is; record files are harmonized for `key`.
pub fn load_series(path: impl AsRef<Path>, key: &SeriesKey) -> Result<TimeSeries> {
    let path = path.as_ref();
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;

    let columns = Columns::new(reader(text.as_bytes()).headers()?);
    let series = if columns.index("value").is_some() && !columns.has_values() {
        read_series_csv(text.as_bytes())?
    } else {
        harmonize(&read_records(text.as_bytes())?, key)?
    };

    info!(path = %path.display(), points = series.len(), "loaded series");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(parse_date("2021-03-15").unwrap(), d(2021, 3, 15));
        assert_eq!(parse_date("2021-03").unwrap(), d(2021, 3, 1));
        assert_eq!(parse_date(" 2021 ").unwrap(), d(2021, 1, 1));
        assert!(matches!(parse_date("03/2021"), Err(DataError::InvalidDate(_))));
        assert!(parse_date("2021-13").is_err());
    }

    #[test]
    fn test_read_records_with_counts() {
        let text = "Date,Pathogen,Antibiotic,Country,Resistant,Tested\n\
                    2020-01,E. coli,ciprofloxacin,NL,25,100\n\
                    2020-02,E. coli,ciprofloxacin,NL,,\n";
        let records = read_records(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].percent(), Some(25.0));
        assert_eq!(records[0].pathogen, "E. coli");
        assert_eq!(records[1].percent(), None);
    }

    #[test]
    fn test_read_records_missing_columns() {
        let err = read_records("date,resistant\n2020,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(c) if c == "percent_resistant"));

        let err = read_records("year,percent_resistant\n2020,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(c) if c == "date"));
    }

    #[test]
    fn test_invalid_number() {
        let err = read_records("date,percent_resistant\n2020,abc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { column, .. } if column == "percent_resistant"));
    }

    #[test]
    fn test_read_series_skips_blank_values() {
        let text = "date,value\n2020-01-01,1.5\n2020-02-01,\n2020-03-01,2.5\n";
        let series = read_series_csv(text.as_bytes()).unwrap();
        assert_eq!(series.values(), vec![1.5, 2.5]);
    }

    #[test]
    fn test_records_round_trip() {
        let key = SeriesKey::new("S. aureus", "meticillin", "PT");
        let records = vec![
            SurveillanceRecord::new(NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(), 17.25)
                .with_key(&key)
                .with_counts(69, 400),
        ];
        let mut buf = Vec::new();
        write_records_csv(&mut buf, &records).unwrap();
        assert_eq!(read_records(buf.as_slice()).unwrap(), records);
    }
}
