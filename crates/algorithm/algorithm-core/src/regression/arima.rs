//! ARIMA (AutoRegressive Integrated Moving Average)
//!
//! - **AR(p)**: regression on the previous `p` values of the differenced series
//! - **I(d)**: `d` rounds of first differencing
//! - **MA(q)**: regression on the previous `q` innovations
//!
//! Pure AR models are estimated with Yule-Walker (Levinson-Durbin). When
//! `q > 0` the Hannan-Rissanen two-stage procedure is used: a long AR model
//! supplies innovation estimates, then AR and MA terms are fitted jointly by
//! least squares.
//!
//! ## Example
//!
//! ```rust
//! use algorithm_core::regression::Arima;
//! use algorithm_core::Predictor;
//!
//! let data: Vec<f64> = (1..=40).map(|x| 15.0 + 0.4 * x as f64 + (x as f64).sin()).collect();
//! let mut model = Arima::new(1, 1, 1).unwrap();
//! model.fit(&data).unwrap();
//! assert_eq!(model.predict(6).unwrap().len(), 6);
//! ```

use crate::utils::linalg::ridge_least_squares;
use algorithm_spi::{Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

/// ARIMA(p, d, q) model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arima {
    p: usize,
    d: usize,
    q: usize,
    ar_coeffs: Vec<f64>,
    ma_coeffs: Vec<f64>,
    /// Mean of the differenced series
    mean: f64,
    /// Last value of each differencing level, outermost first
    tails: Vec<f64>,
    /// Centered differenced series
    centered: Vec<f64>,
    residuals: Vec<f64>,
    fitted: bool,
}

impl Arima {
    /// Create an unfitted ARIMA(p, d, q)
    ///
    /// * `p` - AR order (0-10)
    /// * `d` - differencing order (0-2)
    /// * `q` - MA order (0-10)
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p > 10 {
            return Err(TsError::invalid_parameter("p", "AR order must be <= 10"));
        }
        if d > 2 {
            return Err(TsError::invalid_parameter("d", "differencing order must be <= 2"));
        }
        if q > 10 {
            return Err(TsError::invalid_parameter("q", "MA order must be <= 10"));
        }

        Ok(Self {
            p,
            d,
            q,
            ar_coeffs: vec![0.0; p],
            ma_coeffs: vec![0.0; q],
            mean: 0.0,
            tails: Vec::new(),
            centered: Vec::new(),
            residuals: Vec::new(),
            fitted: false,
        })
    }

    /// Model orders (p, d, q)
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coeffs
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coeffs
    }

    fn difference(data: &[f64]) -> Vec<f64> {
        data.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Undo differencing: integrate forecasts level by level.
    fn integrate(&self, mut values: Vec<f64>) -> Vec<f64> {
        for &last in self.tails.iter().rev() {
            let mut acc = last;
            for v in values.iter_mut() {
                acc += *v;
                *v = acc;
            }
        }
        values
    }

    /// Recompute innovations for the current coefficients
    fn innovations(&self, z: &[f64]) -> Vec<f64> {
        let mut e = vec![0.0; z.len()];
        for t in 0..z.len() {
            let mut pred = 0.0;
            for (i, phi) in self.ar_coeffs.iter().enumerate() {
                if t > i {
                    pred += phi * z[t - i - 1];
                }
            }
            for (j, theta) in self.ma_coeffs.iter().enumerate() {
                if t > j {
                    pred += theta * e[t - j - 1];
                }
            }
            e[t] = if t >= self.p { z[t] - pred } else { 0.0 };
        }
        e
    }

    fn fit_hannan_rissanen(&self, z: &[f64]) -> Option<(Vec<f64>, Vec<f64>)> {
        let long_order = (self.p + self.q).max((z.len() / 4).min(10)).max(1);
        let long_ar = yule_walker(z, long_order);

        let start = long_order;
        let mut eps = vec![0.0; z.len()];
        for t in start..z.len() {
            let pred: f64 = long_ar
                .iter()
                .enumerate()
                .map(|(i, phi)| phi * z[t - i - 1])
                .sum();
            eps[t] = z[t] - pred;
        }

        let first = start + self.q.max(self.p);
        if z.len() <= first + self.p + self.q {
            return None;
        }

        let mut rows = Vec::with_capacity(z.len() - first);
        let mut targets = Vec::with_capacity(z.len() - first);
        for t in first..z.len() {
            let mut row = Vec::with_capacity(self.p + self.q);
            row.extend((1..=self.p).map(|i| z[t - i]));
            row.extend((1..=self.q).map(|j| eps[t - j]));
            rows.push(row);
            targets.push(z[t]);
        }

        let penalty = vec![1e-6; self.p + self.q];
        let coeffs = ridge_least_squares(&rows, &targets, &penalty).ok()?;
        let ar = coeffs[..self.p].to_vec();
        let ma = coeffs[self.p..]
            .iter()
            .map(|c| c.clamp(-0.99, 0.99))
            .collect();
        Some((ar, ma))
    }
}

/// Yule-Walker AR estimate via Levinson-Durbin recursion.
fn yule_walker(z: &[f64], order: usize) -> Vec<f64> {
    if order == 0 || z.len() <= order {
        return vec![0.0; order];
    }

    let n = z.len() as f64;
    let autocov: Vec<f64> = (0..=order)
        .map(|k| z[k..].iter().zip(z).map(|(a, b)| a * b).sum::<f64>() / n)
        .collect();

    let mut phi = vec![0.0; order];
    let mut err = autocov[0];
    if err.abs() < 1e-12 {
        return phi;
    }

    for k in 1..=order {
        let acc = autocov[k]
            - (1..k)
                .map(|j| phi[j - 1] * autocov[k - j])
                .sum::<f64>();
        let kappa = acc / err;

        let prev = phi.clone();
        phi[k - 1] = kappa;
        for j in 1..k {
            phi[j - 1] = prev[j - 1] - kappa * prev[k - j - 1];
        }

        err *= 1.0 - kappa * kappa;
        if err <= 1e-12 {
            break;
        }
    }

    phi
}

impl Predictor for Arima {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        TsError::check_series(data, self.min_observations())?;

        let mut level = data.to_vec();
        self.tails.clear();
        for _ in 0..self.d {
            self.tails.push(level[level.len() - 1]);
            level = Self::difference(&level);
        }

        self.mean = level.iter().sum::<f64>() / level.len() as f64;
        let z: Vec<f64> = level.iter().map(|x| x - self.mean).collect();

        let joint = if self.q > 0 {
            self.fit_hannan_rissanen(&z)
        } else {
            None
        };
        match joint {
            Some((ar, ma)) => {
                self.ar_coeffs = ar;
                self.ma_coeffs = ma;
            }
            None => {
                self.ar_coeffs = yule_walker(&z, self.p);
                self.ma_coeffs = vec![0.0; self.q];
            }
        }

        self.residuals = self.innovations(&z);
        if self.residuals.iter().any(|r| !r.is_finite()) {
            return Err(TsError::NumericalError(
                "ARIMA innovations are not finite".to_string(),
            ));
        }
        self.centered = z;

        tracing::debug!(
            p = self.p,
            d = self.d,
            q = self.q,
            ar = ?self.ar_coeffs,
            ma = ?self.ma_coeffs,
            "fitted ARIMA"
        );

        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }

        let n = self.centered.len();
        let mut z = self.centered.clone();
        let mut e = self.residuals.clone();

        for _ in 0..steps {
            let t = z.len();
            let mut next = 0.0;
            for (i, phi) in self.ar_coeffs.iter().enumerate() {
                if t > i {
                    next += phi * z[t - i - 1];
                }
            }
            for (j, theta) in self.ma_coeffs.iter().enumerate() {
                if t > j {
                    next += theta * e[t - j - 1];
                }
            }
            z.push(next);
            e.push(0.0);
        }

        let forecasts = z[n..].iter().map(|v| v + self.mean).collect();
        Ok(self.integrate(forecasts))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 10
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals[self.p.min(self.residuals.len())..]
    }
}
