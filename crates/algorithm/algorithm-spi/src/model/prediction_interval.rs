//! Prediction interval model

use serde::{Deserialize, Serialize};

/// Point forecast with lower/upper bounds at a confidence level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInterval {
    /// Point forecast
    pub forecast: Vec<f64>,
    /// Lower bound per step
    pub lower: Vec<f64>,
    /// Upper bound per step
    pub upper: Vec<f64>,
    /// Confidence level (e.g. 0.95)
    pub confidence_level: f64,
}

impl PredictionInterval {
    /// Build bounds as `forecast ± z * std_error`.
    ///
    /// Steps without a matching standard error get zero-width bounds.
    pub fn symmetric(forecast: Vec<f64>, std_errors: &[f64], confidence_level: f64) -> Self {
        let z = Self::z_score(confidence_level);
        let margin = |i: usize| std_errors.get(i).copied().unwrap_or(0.0).abs() * z;

        let lower = forecast
            .iter()
            .enumerate()
            .map(|(i, f)| f - margin(i))
            .collect();
        let upper = forecast
            .iter()
            .enumerate()
            .map(|(i, f)| f + margin(i))
            .collect();

        Self {
            forecast,
            lower,
            upper,
            confidence_level,
        }
    }

    /// Two-sided standard normal quantile for a confidence level.
    ///
    /// Levels outside (0, 1) fall back to 95%.
    pub fn z_score(confidence_level: f64) -> f64 {
        let level = if confidence_level > 0.0 && confidence_level < 1.0 {
            confidence_level
        } else {
            0.95
        };
        inverse_normal_cdf(0.5 + level / 2.0)
    }

    /// Number of forecast steps
    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    /// Whether the interval holds no steps
    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }

    /// Clamp every value into `[min, max]`.
    pub fn clamp(mut self, min: f64, max: f64) -> Self {
        for v in self
            .forecast
            .iter_mut()
            .chain(self.lower.iter_mut())
            .chain(self.upper.iter_mut())
        {
            *v = v.clamp(min, max);
        }
        self
    }
}

/// Acklam's rational approximation of the standard normal quantile.
fn inverse_normal_cdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score_common_levels() {
        assert!((PredictionInterval::z_score(0.95) - 1.96).abs() < 1e-3);
        assert!((PredictionInterval::z_score(0.90) - 1.645).abs() < 1e-3);
        assert!((PredictionInterval::z_score(0.99) - 2.576).abs() < 1e-3);
        assert!((PredictionInterval::z_score(0.80) - 1.2816).abs() < 1e-3);
    }

    #[test]
    fn test_z_score_invalid_level_defaults() {
        let z95 = PredictionInterval::z_score(0.95);
        assert_eq!(PredictionInterval::z_score(1.5), z95);
        assert_eq!(PredictionInterval::z_score(0.0), z95);
    }

    #[test]
    fn test_symmetric_bounds() {
        let pi = PredictionInterval::symmetric(vec![20.0, 21.0], &[1.0, 2.0], 0.95);
        assert_eq!(pi.len(), 2);
        for i in 0..2 {
            let below = pi.forecast[i] - pi.lower[i];
            let above = pi.upper[i] - pi.forecast[i];
            assert!((below - above).abs() < 1e-12);
            assert!(below > 0.0);
        }
        assert!(pi.upper[1] - pi.lower[1] > pi.upper[0] - pi.lower[0]);
    }

    #[test]
    fn test_symmetric_missing_errors_zero_width() {
        let pi = PredictionInterval::symmetric(vec![5.0, 6.0, 7.0], &[1.0], 0.9);
        assert_eq!(pi.lower[2], 7.0);
        assert_eq!(pi.upper[2], 7.0);
    }

    #[test]
    fn test_clamp_percentages() {
        let pi = PredictionInterval::symmetric(vec![2.0, 98.0], &[5.0, 5.0], 0.95).clamp(0.0, 100.0);
        assert_eq!(pi.lower[0], 0.0);
        assert_eq!(pi.upper[1], 100.0);
    }
}
