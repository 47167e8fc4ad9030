//! Synthetic stand-in forecasts
//!
//! When a model fails, the comparator substitutes a table with the same
//! schema: a drift line from the recent history plus small seeded noise.
//! Tables are always labelled and marked as placeholders.

use crate::calendar::{future_dates, month_start, Frequency};
use forecast_spi::{ForecastPoint, ForecastTable, ModelKind, TimeSeries};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Observations used for the drift estimate
const DRIFT_WINDOW: usize = 12;
/// Noise standard deviation relative to the recent spread
const NOISE_SCALE: f64 = 0.1;

/// Placeholder table for `kind` over `horizon` steps.
///
/// Repeated dates are merged into their mean first. An empty series is
/// anchored on the current month with a flat zero line. A series ending so
/// close to the end of the calendar range that `horizon` later dates do not
/// exist gets only the dates that do.
pub fn placeholder_table(
    series: &TimeSeries,
    kind: ModelKind,
    horizon: usize,
    seed: u64,
    reason: impl Into<String>,
) -> ForecastTable {
    let sorted = series.aggregated();
    let values = sorted.values();

    let (anchor, frequency) = match sorted.last_date() {
        Some(last) => (last, Frequency::infer(&sorted.dates())),
        None => (
            month_start(chrono::Local::now().date_naive()),
            Frequency::Monthly,
        ),
    };
    let dates = future_dates(anchor, frequency, horizon);

    let window = &values[values.len().saturating_sub(DRIFT_WINDOW)..];
    let last = window.last().copied().filter(|v| v.is_finite()).unwrap_or(0.0);
    let drift = match (window.first(), window.len()) {
        (Some(first), n) if n >= 2 && first.is_finite() => (last - first) / (n - 1) as f64,
        _ => 0.0,
    };
    let spread = std_dev(window);

    let mut rng = StdRng::seed_from_u64(seed ^ (kind as u64 + 1).wrapping_mul(0x9E37_79B9));
    let noise = Normal::new(0.0, NOISE_SCALE * spread).ok();

    let points = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let jitter = noise.as_ref().map_or(0.0, |n| n.sample(&mut rng));
            ForecastPoint::new(date, last + drift * (i + 1) as f64 + jitter)
        })
        .collect();

    ForecastTable::placeholder(kind, points, reason)
}

fn std_dev(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 {
        return 0.0;
    }
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    (finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}
