//! Forecast and evaluation export
//!
//! Forecast tables are written as one long CSV with the columns
//! `date,model,forecast,lower,upper,placeholder`; absent bounds are empty
//! cells. Evaluation results are written as pretty JSON.

use chrono::NaiveDate;
use forecast_spi::{
    Evaluation, ForecastError, ForecastPoint, ForecastTable, ModelKind, Result,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// One CSV row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ForecastRow {
    date: NaiveDate,
    model: String,
    forecast: f64,
    lower: Option<f64>,
    upper: Option<f64>,
    placeholder: bool,
}

/// Write every table to `writer` in table order.
pub fn write_forecast_csv<W: Write>(writer: W, tables: &[ForecastTable]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for table in tables {
        for point in &table.points {
            csv.serialize(ForecastRow {
                date: point.date,
                model: table.model.clone(),
                forecast: point.forecast,
                lower: point.lower,
                upper: point.upper,
                placeholder: table.is_placeholder(),
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

pub fn write_forecast_csv_file(path: impl AsRef<Path>, tables: &[ForecastTable]) -> Result<()> {
    write_forecast_csv(File::create(path)?, tables)
}

/// Read tables back, grouped by model label in order of first appearance.
///
/// Placeholder reasons are not stored in the CSV and come back empty.
pub fn read_forecast_csv<R: Read>(reader: R) -> Result<Vec<ForecastTable>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut tables: Vec<ForecastTable> = Vec::new();

    for row in csv.deserialize() {
        let row: ForecastRow = row?;
        let mut point = ForecastPoint::new(row.date, row.forecast);
        point.lower = row.lower;
        point.upper = row.upper;

        match tables.iter_mut().find(|t| t.model == row.model) {
            Some(table) => table.points.push(point),
            None => {
                let kind = kind_from_label(&row.model)?;
                let table = if row.placeholder {
                    ForecastTable::placeholder(kind, vec![point], "")
                } else {
                    ForecastTable::fitted(kind, vec![point])
                };
                tables.push(table);
            }
        }
    }
    Ok(tables)
}

pub fn read_forecast_csv_file(path: impl AsRef<Path>) -> Result<Vec<ForecastTable>> {
    read_forecast_csv(File::open(path)?)
}

/// Accepts display labels ("Random Forest") as well as identifiers.
fn kind_from_label(label: &str) -> Result<ModelKind> {
    let base = label
        .strip_suffix(ForecastTable::PLACEHOLDER_SUFFIX)
        .unwrap_or(label);
    base.parse::<ModelKind>()
        .map_err(|_| ForecastError::UnknownModel(label.to_string()))
}

/// Write `evaluation` as pretty JSON keyed by model label.
pub fn write_evaluation_json<W: Write>(writer: W, evaluation: &Evaluation) -> Result<()> {
    serde_json::to_writer_pretty(writer, evaluation)
        .map_err(|e| ForecastError::Config(format!("failed to write evaluation: {}", e)))
}
