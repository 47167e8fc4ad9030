//! End-to-end tests for the forecast facade
//!
//! Exercises the public workflow: dispatch every model, compare, evaluate
//! against a holdout and export.

use chrono::{Months, NaiveDate};
use forecast_facade::prelude::*;
use forecast_facade::{available_models, ForecastOrigin};

fn surveillance_series(n: usize) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64;
            let trend = 18.0 + 0.15 * t;
            let season = 2.0 * (2.0 * std::f64::consts::PI * t / 12.0).sin();
            let date = start.checked_add_months(Months::new(i as u32)).unwrap();
            Observation::new(date, trend + season)
        })
        .collect::<TimeSeries>()
        .with_label("E. coli / ciprofloxacin / NL")
}

#[test]
fn e2e_every_model_forecasts_full_horizon() {
    let series = surveillance_series(60);
    let config = ForecastConfig::default();
    let last = series.last_date().unwrap();

    for kind in available_models() {
        for horizon in [1, 6, 12] {
            let table = get_forecast(&series, kind, horizon, &config)
                .unwrap_or_else(|e| panic!("{} failed: {}", kind, e));
            assert_eq!(table.len(), horizon, "{}", kind);
            assert_eq!(table.kind, kind);
            assert_eq!(table.origin, ForecastOrigin::Fitted);

            let dates = table.dates();
            assert!(dates[0] > last, "{} starts inside the history", kind);
            assert!(dates.windows(2).all(|w| w[0] < w[1]), "{} dates not increasing", kind);
            assert!(table.forecasts().iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn e2e_prophet_carries_bounds() {
    if !available_models().contains(&ModelKind::Prophet) {
        return;
    }
    let series = surveillance_series(48);
    let table = get_forecast(&series, ModelKind::Prophet, 6, &ForecastConfig::default()).unwrap();
    assert!(table.has_bounds());
    for p in &table.points {
        let (lower, upper) = (p.lower.unwrap(), p.upper.unwrap());
        assert!(lower <= p.forecast && p.forecast <= upper);
    }
}

#[test]
fn e2e_compare_never_fails() {
    let config = ForecastConfig::default();
    for n in [0, 1, 3, 10, 40] {
        let series = surveillance_series(n);
        let comparison = compare_models(&series, &ModelKind::ALL, 6, &config);
        assert_eq!(comparison.len(), ModelKind::ALL.len(), "n = {}", n);

        let first_dates = comparison.tables()[0].dates();
        for table in comparison.tables() {
            assert_eq!(table.len(), 6);
            assert_eq!(table.dates(), first_dates, "schema differs for {}", table.model);
            if table.is_placeholder() {
                assert!(table.model.ends_with(" (placeholder)"));
            }
        }
    }
}

#[test]
fn e2e_short_series_mixes_fitted_and_placeholders() {
    // long enough for smoothing and Prophet, too short for the lag learners
    let series = surveillance_series(10);
    let comparison = compare_models(&series, &ModelKind::ALL, 3, &ForecastConfig::default());

    let es = comparison.get(ModelKind::ExponentialSmoothing).unwrap();
    assert!(!es.is_placeholder());
    let svr = comparison.get(ModelKind::Svr).unwrap();
    assert!(svr.is_placeholder());
}

#[test]
fn e2e_backtest_picks_fitted_model() {
    let series = surveillance_series(72);
    let report = backtest(&series, &ModelKind::ALL, 12, &ForecastConfig::default());

    assert_eq!(report.train_len, 60);
    assert_eq!(report.test_len, 12);
    assert_eq!(report.evaluation.len(), ModelKind::ALL.len());
    for (label, record) in report.evaluation.iter() {
        assert_eq!(record.n, 12, "{}", label);
        assert!(record.rmse >= 0.0 && record.mae >= 0.0);
        assert!(record.mape.is_some());
    }

    let best = report.best.as_deref().unwrap();
    assert!(!best.ends_with("(placeholder)"));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["test_len"], 12);
}

#[test]
fn e2e_evaluate_non_negative_errors() {
    let series = surveillance_series(48);
    let config = ForecastConfig::default();
    let comparison = compare_models(&series, &ModelKind::ALL, 8, &config);
    let actual: Vec<f64> = (0..8).map(|i| 25.0 + i as f64 * 0.2).collect();

    let evaluation = evaluate_forecasts(&actual, comparison.tables());
    for (_, record) in evaluation.iter() {
        assert_eq!(record.n, 8);
        assert!(record.rmse >= 0.0);
        assert!(record.mae >= 0.0);
        assert!(record.rmse >= record.mae - 1e-12);
    }
}
