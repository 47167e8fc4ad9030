//! Integration tests for forecast export and configuration

use chrono::NaiveDate;
use forecast_facade::{
    compare_models, get_forecast, read_forecast_csv_file, write_evaluation_json,
    write_forecast_csv_file, evaluate_forecasts, ForecastConfig, ForecastConfigBuilder,
    ForecastError, ModelKind, TimeSeries,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn sample_series() -> TimeSeries {
    TimeSeries::from_pairs((0..36).map(|i| {
        let date = NaiveDate::from_ymd_opt(2020 + i / 12, 1 + (i % 12) as u32, 1).unwrap();
        (date, 40.0 + 0.3 * i as f64 + if i % 12 < 6 { 1.5 } else { -1.5 })
    }))
}

#[test]
fn test_csv_file_round_trip() {
    let config = ForecastConfigBuilder::new().intervals(true).build().unwrap();
    let comparison = compare_models(
        &sample_series(),
        &[ModelKind::Arima, ModelKind::ExponentialSmoothing, ModelKind::Lstm],
        6,
        &config,
    );

    let file = NamedTempFile::new().unwrap();
    write_forecast_csv_file(file.path(), comparison.tables()).unwrap();
    let restored = read_forecast_csv_file(file.path()).unwrap();

    assert_eq!(restored.len(), comparison.len());
    for (original, loaded) in comparison.tables().iter().zip(&restored) {
        assert_eq!(loaded.model, original.model);
        assert_eq!(loaded.is_placeholder(), original.is_placeholder());
        assert_eq!(loaded.dates(), original.dates());
        assert!(loaded.dates().windows(2).all(|w| w[0] < w[1]));
        for (a, b) in original.points.iter().zip(&loaded.points) {
            assert!((a.forecast - b.forecast).abs() < 1e-9);
            assert_eq!(a.lower.is_some(), b.lower.is_some());
            if let (Some(x), Some(y)) = (a.upper, b.upper) {
                assert!((x - y).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_csv_round_trip_keeps_placeholders() {
    // a two-point series fails every model except smoothing
    let series = TimeSeries::from_pairs(vec![
        (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 12.0),
        (NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), 13.0),
    ]);
    let comparison = compare_models(&series, &ModelKind::ALL, 4, &ForecastConfig::default());
    assert_eq!(comparison.fitted().len(), 1);

    let file = NamedTempFile::new().unwrap();
    write_forecast_csv_file(file.path(), comparison.tables()).unwrap();
    let restored = read_forecast_csv_file(file.path()).unwrap();

    let placeholders = restored.iter().filter(|t| t.is_placeholder()).count();
    assert_eq!(placeholders, 6);
    let kinds: Vec<ModelKind> = restored.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, ModelKind::ALL.to_vec());
}

#[test]
fn test_missing_csv_is_io_error() {
    let err = read_forecast_csv_file("/nonexistent/forecast.csv").unwrap_err();
    assert!(matches!(err, ForecastError::Io(_)));
}

#[test]
fn test_config_file_drives_forecast() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "horizon": 3, "models": ["arima", "ets"], "arima": {{ "p": 2, "d": 1, "q": 0 }} }}"#
    )
    .unwrap();

    let config = ForecastConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.horizon, 3);
    assert_eq!(config.models, vec![ModelKind::Arima, ModelKind::ExponentialSmoothing]);
    assert_eq!(config.arima.p, 2);
    // untouched sections keep their defaults
    assert_eq!(config.lstm.lag, 12);

    let table = get_forecast(&sample_series(), ModelKind::Arima, config.horizon, &config).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = ForecastConfigBuilder::new().horizon(0).build().unwrap_err();
    assert!(matches!(err, ForecastError::InvalidHorizon));

    let err = ForecastConfig::from_json_str("{ \"models\": [\"xgboost\"] }").unwrap_err();
    assert!(matches!(err, ForecastError::Config(_)));
}

#[test]
fn test_evaluation_json_file() {
    let series = sample_series();
    let comparison = compare_models(&series, &[ModelKind::Arima], 4, &ForecastConfig::default());
    let evaluation = evaluate_forecasts(&[50.0, 50.5, 51.0, 51.5], comparison.tables());

    let file = NamedTempFile::new().unwrap();
    write_evaluation_json(file.reopen().unwrap(), &evaluation).unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["ARIMA"]["n"], 4);
}
