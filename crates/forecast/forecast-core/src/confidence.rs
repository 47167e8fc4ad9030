//! Residual-based prediction intervals
//!
//! Models without native uncertainty get symmetric bounds from the spread
//! of their in-sample residuals, widening with the square root of the
//! horizon step.

use algorithm_core::PredictionInterval;

/// Bounds for `forecast` from in-sample `residuals`.
///
/// Returns `None` when fewer than two finite residuals are available.
pub fn from_residuals(
    forecast: &[f64],
    residuals: &[f64],
    confidence_level: f64,
) -> Option<PredictionInterval> {
    let finite: Vec<f64> = residuals.iter().copied().filter(|r| r.is_finite()).collect();
    if finite.len() < 2 {
        return None;
    }

    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let variance = finite.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();

    let std_errors: Vec<f64> = (0..forecast.len())
        .map(|h| std_dev * ((h + 1) as f64).sqrt())
        .collect();

    Some(PredictionInterval::symmetric(
        forecast.to_vec(),
        &std_errors,
        confidence_level,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_widen_with_horizon() {
        let residuals = [1.0, -1.0, 0.5, -0.5, 0.8, -0.8];
        let pi = from_residuals(&[10.0, 10.0, 10.0], &residuals, 0.95).unwrap();
        let widths: Vec<f64> = (0..3).map(|i| pi.upper[i] - pi.lower[i]).collect();
        assert!(widths[0] > 0.0);
        assert!(widths[1] > widths[0] && widths[2] > widths[1]);
        assert!((widths[2] / widths[0] - 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_around_forecast() {
        let pi = from_residuals(&[5.0, 6.0], &[0.2, -0.1, 0.3, -0.4], 0.9).unwrap();
        for i in 0..2 {
            let mid = 0.5 * (pi.lower[i] + pi.upper[i]);
            assert!((mid - pi.forecast[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_higher_level_is_wider() {
        let residuals = [1.0, -2.0, 0.5, 1.5];
        let narrow = from_residuals(&[0.0], &residuals, 0.8).unwrap();
        let wide = from_residuals(&[0.0], &residuals, 0.99).unwrap();
        assert!(wide.upper[0] > narrow.upper[0]);
    }

    #[test]
    fn test_too_few_residuals() {
        assert!(from_residuals(&[1.0], &[], 0.95).is_none());
        assert!(from_residuals(&[1.0], &[0.3, f64::NAN], 0.95).is_none());
    }
}
