//! Forecast evaluation and backtesting

use crate::comparator::{compare_models, Comparison};
use algorithm_core::utils::metrics;
use forecast_api::ForecastConfig;
use forecast_spi::{Evaluation, EvaluationRecord, ForecastTable, ModelKind, TimeSeries};
use serde::Serialize;
use tracing::{debug, info};

/// Score each table against `actual`.
///
/// Tables and actuals are aligned positionally from the start and truncated
/// to the shorter of the two. Records are keyed by table label, so a
/// placeholder never shadows a fitted model of the same kind.
pub fn evaluate_forecasts(actual: &[f64], forecasts: &[ForecastTable]) -> Evaluation {
    let mut evaluation = Evaluation::new();
    for table in forecasts {
        let predicted = table.forecasts();
        let record = score(actual, &predicted, table.is_placeholder());
        debug!(model = %table.model, n = record.n, rmse = record.rmse, "evaluated");
        evaluation.insert(table.model.clone(), record);
    }
    evaluation
}

fn score(actual: &[f64], predicted: &[f64], placeholder: bool) -> EvaluationRecord {
    let n = actual.len().min(predicted.len());
    let (actual, predicted) = (&actual[..n], &predicted[..n]);
    let mape = metrics::mape(actual, predicted);
    EvaluationRecord {
        rmse: metrics::rmse(actual, predicted),
        mae: metrics::mae(actual, predicted),
        mape: mape.is_finite().then_some(mape),
        n,
        placeholder,
    }
}

/// Split a series into a training head and the last `holdout` observations.
///
/// The series is sorted first; `holdout` is clamped to the series length.
pub fn train_test_split(series: &TimeSeries, holdout: usize) -> (TimeSeries, TimeSeries) {
    let sorted = series.sorted();
    let at = sorted.len().saturating_sub(holdout);
    sorted.split_at(at)
}

/// Outcome of a holdout backtest
#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    pub comparison: Comparison,
    pub evaluation: Evaluation,
    pub train_len: usize,
    pub test_len: usize,
    /// Label of the fitted model with the lowest RMSE
    pub best: Option<String>,
}

/// Fit on all but the last `holdout` points and score against them.
pub fn backtest(
    series: &TimeSeries,
    kinds: &[ModelKind],
    holdout: usize,
    config: &ForecastConfig,
) -> BacktestReport {
    let (train, test) = train_test_split(series, holdout);
    // an empty holdout still forecasts one step so every model is exercised
    let horizon = test.len().max(1);
    let comparison = compare_models(&train, kinds, horizon, config);
    let evaluation = evaluate_forecasts(&test.values(), comparison.tables());
    let best = evaluation.best().map(|(label, _)| label.to_string());

    info!(
        train = train.len(),
        test = test.len(),
        best = best.as_deref().unwrap_or("none"),
        "backtest complete"
    );
    BacktestReport {
        comparison,
        evaluation,
        train_len: train.len(),
        test_len: test.len(),
        best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use forecast_spi::ForecastPoint;

    fn table(kind: ModelKind, values: &[f64], placeholder: bool) -> ForecastTable {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                ForecastPoint::new(NaiveDate::from_ymd_opt(2024, 1 + i as u32, 1).unwrap(), *v)
            })
            .collect();
        if placeholder {
            ForecastTable::placeholder(kind, points, "failed")
        } else {
            ForecastTable::fitted(kind, points)
        }
    }

    #[test]
    fn test_metrics_per_table() {
        let actual = [10.0, 20.0, 30.0];
        let tables = vec![
            table(ModelKind::Arima, &[10.0, 20.0, 30.0], false),
            table(ModelKind::Svr, &[12.0, 18.0, 33.0], false),
        ];
        let eval = evaluate_forecasts(&actual, &tables);

        let perfect = eval.get("ARIMA").unwrap();
        assert_eq!(perfect.rmse, 0.0);
        assert_eq!(perfect.mape, Some(0.0));

        let svr = eval.get("SVR").unwrap();
        assert!((svr.mae - 7.0 / 3.0).abs() < 1e-12);
        assert!((svr.rmse - (17.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(svr.n, 3);
        assert_eq!(eval.best().unwrap().0, "ARIMA");
    }

    #[test]
    fn test_length_mismatch_truncates() {
        let eval = evaluate_forecasts(
            &[1.0, 2.0],
            &[table(ModelKind::Lstm, &[1.0, 2.0, 100.0, 100.0], false)],
        );
        let record = eval.get("LSTM").unwrap();
        assert_eq!(record.n, 2);
        assert_eq!(record.rmse, 0.0);
    }

    #[test]
    fn test_zero_actuals() {
        let eval = evaluate_forecasts(
            &[0.0, 0.0, 4.0],
            &[table(ModelKind::Prophet, &[1.0, 1.0, 5.0], false)],
        );
        // only the non-zero actual counts toward MAPE
        assert_eq!(eval.get("Prophet").unwrap().mape, Some(25.0));

        let eval = evaluate_forecasts(
            &[0.0, 0.0],
            &[table(ModelKind::Prophet, &[1.0, 1.0], false)],
        );
        let record = eval.get("Prophet").unwrap();
        assert_eq!(record.mape, None);
        assert_eq!(record.mae, 1.0);
    }

    #[test]
    fn test_empty_alignment() {
        let eval = evaluate_forecasts(&[], &[table(ModelKind::Arima, &[1.0], false)]);
        let record = eval.get("ARIMA").unwrap();
        assert_eq!(record.n, 0);
        assert!(record.rmse.is_nan());
        assert_eq!(record.mape, None);
        assert!(eval.best().is_none());
    }

    #[test]
    fn test_placeholder_flag_is_recorded() {
        let eval = evaluate_forecasts(
            &[5.0],
            &[
                table(ModelKind::Svr, &[5.0], true),
                table(ModelKind::Svr, &[6.0], false),
            ],
        );
        assert_eq!(eval.len(), 2);
        assert!(eval.get("SVR (placeholder)").unwrap().placeholder);
        assert_eq!(eval.best().unwrap().0, "SVR");
    }

    #[test]
    fn test_train_test_split_sorts_and_clamps() {
        let series = TimeSeries::from_pairs((0..10).rev().map(|i| {
            (NaiveDate::from_ymd_opt(2020, 1 + i as u32, 1).unwrap(), i as f64)
        }));
        let (train, test) = train_test_split(&series, 3);
        assert_eq!(train.values(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(test.values(), vec![7.0, 8.0, 9.0]);

        let (train, test) = train_test_split(&series, 50);
        assert!(train.is_empty());
        assert_eq!(test.len(), 10);
    }

    #[test]
    fn test_backtest_scores_holdout() {
        let series = TimeSeries::from_pairs((0..48).map(|i| {
            let date = NaiveDate::from_ymd_opt(2018 + i / 12, 1 + (i % 12) as u32, 1).unwrap();
            (date, 20.0 + 0.2 * i as f64)
        }));
        let config = ForecastConfig::default();
        let report = backtest(
            &series,
            &[ModelKind::Arima, ModelKind::ExponentialSmoothing],
            6,
            &config,
        );
        assert_eq!(report.train_len, 42);
        assert_eq!(report.test_len, 6);
        assert_eq!(report.evaluation.len(), 2);
        assert!(report.best.is_some());
        for table in report.comparison.tables() {
            assert_eq!(table.points[0].date, NaiveDate::from_ymd_opt(2021, 7, 1).unwrap());
        }
    }
}
