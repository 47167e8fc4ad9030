//! Forecast dispatcher
//!
//! Maps a model identifier to its runner, runs it over the series values
//! and attaches dates and bounds to produce a [`ForecastTable`].

use crate::calendar::{future_dates, Frequency};
use crate::confidence;
use crate::runners::runner_for;
use forecast_api::ForecastConfig;
use forecast_spi::{
    ForecastError, ForecastPoint, ForecastTable, ModelKind, Result, RunnerOutput, TimeSeries,
};
use tracing::{debug, info};

/// Forecast `horizon` steps of `series` with one model.
///
/// The table holds exactly `horizon` points whose dates start one period
/// after the latest observation and increase strictly. Repeated dates are
/// merged into their mean before the model sees the values. Prophet
/// carries bounds; other models carry residual-based bounds when
/// `config.intervals` is set. Bounds that are not finite are dropped.
///
/// # Errors
///
/// - [`ForecastError::InvalidHorizon`] for `horizon == 0`
/// - [`ForecastError::ModelUnavailable`] when the model was compiled out
/// - [`ForecastError::InsufficientData`] for series below the model minimum
/// - [`ForecastError::Algorithm`] for any other model failure
pub fn get_forecast(
    series: &TimeSeries,
    kind: ModelKind,
    horizon: usize,
    config: &ForecastConfig,
) -> Result<ForecastTable> {
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon);
    }
    let runner = runner_for(kind, config)?;

    let sorted = series.aggregated();
    let values = sorted.values();
    let required = runner.min_observations();
    if values.len() < required {
        return Err(ForecastError::InsufficientData {
            model: kind,
            required,
            actual: values.len(),
        });
    }
    let last = sorted.last_date().ok_or(ForecastError::InsufficientData {
        model: kind,
        required: required.max(1),
        actual: 0,
    })?;

    debug!(model = %kind, points = values.len(), horizon, "running model");
    let output = runner.run(&values, horizon)?;
    check_output(kind, &output, horizon)?;

    let frequency = Frequency::infer(&sorted.dates());
    let dates = future_dates(last, frequency, horizon);
    if dates.len() != horizon {
        return Err(ForecastError::Config(format!(
            "cannot place {} {:?} periods after {}",
            horizon, frequency, last
        )));
    }

    let bounds = match (&output.lower, &output.upper) {
        (Some(lower), Some(upper)) => Some((lower.clone(), upper.clone())),
        _ if config.intervals => {
            confidence::from_residuals(&output.forecast, &output.residuals, config.confidence_level)
                .map(|pi| (pi.lower, pi.upper))
        }
        _ => None,
    }
    .filter(|(lower, upper)| {
        let finite = lower.iter().chain(upper).all(|v| v.is_finite());
        if !finite {
            debug!(model = %kind, "dropping non-finite bounds");
        }
        finite
    });

    let points = dates
        .into_iter()
        .zip(&output.forecast)
        .enumerate()
        .map(|(i, (date, &forecast))| {
            let point = ForecastPoint::new(date, forecast);
            match &bounds {
                Some((lower, upper)) => point.with_bounds(lower[i], upper[i]),
                None => point,
            }
        })
        .collect();

    info!(model = %kind, horizon, ?frequency, bounds = bounds.is_some(), "forecast ready");
    Ok(ForecastTable::fitted(kind, points))
}

fn check_output(kind: ModelKind, output: &RunnerOutput, horizon: usize) -> Result<()> {
    let aligned = |v: &Option<Vec<f64>>| v.as_ref().map_or(true, |v| v.len() == horizon);
    if output.forecast.len() != horizon || !aligned(&output.lower) || !aligned(&output.upper) {
        return Err(ForecastError::Algorithm(algorithm_core::TsError::NumericalError(
            format!("{} returned a forecast of the wrong length", kind),
        )));
    }
    if output.forecast.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::Algorithm(algorithm_core::TsError::NumericalError(
            format!("{} produced non-finite forecasts", kind),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monthly_series(n: usize) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let date = start
                    .checked_add_months(chrono::Months::new(i as u32))
                    .unwrap();
                let value = 22.0 + 0.25 * i as f64 + 2.5 * (i as f64 * 0.52).sin();
                forecast_spi::Observation::new(date, value)
            })
            .collect()
    }

    #[test]
    fn test_dates_follow_history() {
        let series = monthly_series(48);
        let config = ForecastConfig::default();
        let table = get_forecast(&series, ModelKind::Arima, 6, &config).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.points[0].date, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert!(table.dates().windows(2).all(|w| w[0] < w[1]));
        assert!(!table.has_bounds());
    }

    #[test]
    fn test_intervals_flag_adds_bounds() {
        let series = monthly_series(48);
        let config = ForecastConfig {
            intervals: true,
            ..ForecastConfig::default()
        };
        let table = get_forecast(&series, ModelKind::ExponentialSmoothing, 4, &config).unwrap();
        assert!(table.has_bounds());
        for p in &table.points {
            assert!(p.lower.unwrap() <= p.forecast && p.forecast <= p.upper.unwrap());
        }
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let series = monthly_series(30);
        let mut reversed: Vec<_> = series.observations().to_vec();
        reversed.reverse();
        let reversed = TimeSeries::new(reversed);

        let config = ForecastConfig::default();
        let a = get_forecast(&series, ModelKind::ExponentialSmoothing, 3, &config).unwrap();
        let b = get_forecast(&reversed, ModelKind::ExponentialSmoothing, 3, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_horizon() {
        let err = get_forecast(&monthly_series(24), ModelKind::Arima, 0, &ForecastConfig::default())
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidHorizon));
    }

    #[test]
    fn test_empty_series() {
        let err = get_forecast(
            &TimeSeries::default(),
            ModelKind::ExponentialSmoothing,
            3,
            &ForecastConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InsufficientData { required: 2, actual: 0, .. }
        ));
    }

    #[test]
    fn test_yearly_series_gets_yearly_dates() {
        let series = TimeSeries::from_pairs(
            (2000..2020).map(|y| (NaiveDate::from_ymd_opt(y, 1, 1).unwrap(), 10.0 + y as f64 * 0.1)),
        );
        let table =
            get_forecast(&series, ModelKind::Arima, 2, &ForecastConfig::default()).unwrap();
        assert_eq!(
            table.dates(),
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
            ]
        );
    }

    #[test]
    fn test_repeated_months_forecast_like_their_mean() {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let month = |i: usize| start.checked_add_months(chrono::Months::new(i as u32)).unwrap();
        let duplicated = TimeSeries::from_pairs(
            (0..36).flat_map(|i| [(month(i), 10.0), (month(i), 30.0 + i as f64)]),
        );
        let averaged = TimeSeries::from_pairs((0..36).map(|i| (month(i), 20.0 + i as f64 / 2.0)));

        let config = ForecastConfig::default();
        for kind in [ModelKind::ExponentialSmoothing, ModelKind::Arima] {
            let a = get_forecast(&duplicated, kind, 3, &config).unwrap();
            let b = get_forecast(&averaged, kind, 3, &config).unwrap();
            assert_eq!(a, b, "{}", kind);
            assert_eq!(a.points[0].date, month(36));
        }
    }

    #[test]
    fn test_overflowing_bounds_are_dropped() {
        let series = TimeSeries::from_pairs((0..36).map(|i| {
            let date = NaiveDate::from_ymd_opt(2015, 1, 1)
                .unwrap()
                .checked_add_months(chrono::Months::new(i))
                .unwrap();
            (date, 1e300 * (1.0 + 0.5 * (i as f64).sin()))
        }));
        let config = ForecastConfig {
            intervals: true,
            ..ForecastConfig::default()
        };
        let table = get_forecast(&series, ModelKind::ExponentialSmoothing, 3, &config).unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.has_bounds());
        assert!(table.forecasts().iter().all(|v| v.is_finite()));
    }
}
