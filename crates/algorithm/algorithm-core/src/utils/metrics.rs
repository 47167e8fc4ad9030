//! Forecast accuracy metrics
//!
//! All functions expect equal-length, non-empty inputs and return `NaN`
//! otherwise. Alignment of mismatched series is the caller's job.

/// Mean Absolute Error
///
/// ```rust
/// use algorithm_core::utils::metrics::mae;
///
/// let actual = [30.0, 32.0, 31.0];
/// let predicted = [31.0, 31.0, 31.0];
/// assert!((mae(&actual, &predicted) - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Mean Squared Error
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Root Mean Squared Error
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Mean Absolute Percentage Error, in percent
///
/// Points whose actual value is zero or near zero (`|a| < 1e-10`) are
/// skipped and the mean is taken over the remaining points. Returns `NaN`
/// when no point survives.
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }

    let (sum, count) = actual
        .iter()
        .zip(predicted)
        .filter(|(a, _)| a.abs() > 1e-10)
        .fold((0.0, 0usize), |(sum, count), (a, p)| {
            (sum + ((a - p) / a).abs(), count + 1)
        });

    if count == 0 {
        f64::NAN
    } else {
        100.0 * sum / count as f64
    }
}

/// Symmetric MAPE, in percent (0 to 200)
pub fn smape(actual: &[f64], predicted: &[f64]) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom > 1e-10 {
                2.0 * (a - p).abs() / denom
            } else {
                0.0
            }
        })
        .sum();
    100.0 * sum / actual.len() as f64
}

fn aligned(actual: &[f64], predicted: &[f64]) -> bool {
    !actual.is_empty() && actual.len() == predicted.len()
}

/// All metrics for one forecast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSummary {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    pub mape: f64,
    pub smape: f64,
}

impl MetricsSummary {
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Self {
        Self {
            mae: mae(actual, predicted),
            mse: mse(actual, predicted),
            rmse: rmse(actual, predicted),
            mape: mape(actual, predicted),
            smape: smape(actual, predicted),
        }
    }
}
