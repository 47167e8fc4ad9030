//! Epsilon-insensitive support vector regression (RBF kernel)
//!
//! The dual is solved by cyclic coordinate descent. The bias is absorbed
//! into the kernel (`K + 1`), which removes the equality constraint and
//! leaves a box `[-C, C]` per coefficient with an L1 term of weight
//! `epsilon`, so each coordinate step is a soft-threshold followed by a
//! clip. The series is standardised before framing into lag windows.

use crate::utils::lag::{lag_matrix, recursive_forecast};
use crate::utils::scaling::StandardScaler;
use algorithm_spi::{Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

const MAX_SWEEPS: usize = 1000;
const TOLERANCE: f64 = 1e-6;

/// SVR forecaster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Svr {
    c: f64,
    epsilon: f64,
    gamma: Option<f64>,
    lag: usize,
    scaler: Option<StandardScaler>,
    support: Vec<Vec<f64>>,
    coeffs: Vec<f64>,
    fitted_gamma: f64,
    history: Vec<f64>,
    residuals: Vec<f64>,
}

impl Svr {
    /// * `c` - box constraint (> 0)
    /// * `epsilon` - width of the insensitive tube in standardised units (>= 0)
    /// * `lag` - lag window length
    pub fn new(c: f64, epsilon: f64, lag: usize) -> Result<Self> {
        if c <= 0.0 {
            return Err(TsError::invalid_parameter("c", "must be positive"));
        }
        if epsilon < 0.0 {
            return Err(TsError::invalid_parameter("epsilon", "must be non-negative"));
        }
        if lag == 0 {
            return Err(TsError::invalid_parameter("lag", "must be at least 1"));
        }
        Ok(Self {
            c,
            epsilon,
            gamma: None,
            lag,
            scaler: None,
            support: Vec::new(),
            coeffs: Vec::new(),
            fitted_gamma: 0.0,
            history: Vec::new(),
            residuals: Vec::new(),
        })
    }

    /// RBF width; defaults to `1 / lag`.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    /// Number of training rows with a non-zero dual coefficient
    pub fn n_support(&self) -> usize {
        self.coeffs.iter().filter(|b| b.abs() > 1e-12).count()
    }

    fn kernel(gamma: f64, a: &[f64], b: &[f64]) -> f64 {
        let d2: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
        (-gamma * d2).exp() + 1.0
    }

    fn decision(&self, row: &[f64]) -> f64 {
        self.support
            .iter()
            .zip(&self.coeffs)
            .map(|(sv, b)| b * Self::kernel(self.fitted_gamma, sv, row))
            .sum()
    }
}

fn soft_threshold(v: f64, t: f64) -> f64 {
    if v > t {
        v - t
    } else if v < -t {
        v + t
    } else {
        0.0
    }
}

impl Predictor for Svr {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        TsError::check_series(data, self.min_observations())?;
        let gamma = self.gamma.unwrap_or(1.0 / self.lag as f64);
        if gamma <= 0.0 {
            return Err(TsError::invalid_parameter("gamma", "must be positive"));
        }

        let scaler = StandardScaler::fit(data);
        let scaled = scaler.transform_all(data);
        let (x, y) = lag_matrix(&scaled, self.lag);
        let n = x.len();

        let kernel: Vec<Vec<f64>> = x
            .iter()
            .map(|a| x.iter().map(|b| Self::kernel(gamma, a, b)).collect())
            .collect();

        let mut beta = vec![0.0; n];
        let mut f = vec![0.0; n];
        let mut converged = false;
        for sweep in 0..MAX_SWEEPS {
            let mut max_delta: f64 = 0.0;
            for i in 0..n {
                let kii = kernel[i][i];
                let partial = y[i] - (f[i] - kii * beta[i]);
                let updated = (soft_threshold(partial, self.epsilon) / kii).clamp(-self.c, self.c);
                let delta = updated - beta[i];
                if delta != 0.0 {
                    for (fj, kij) in f.iter_mut().zip(&kernel[i]) {
                        *fj += delta * kij;
                    }
                    beta[i] = updated;
                    max_delta = max_delta.max(delta.abs());
                }
            }
            if max_delta < TOLERANCE {
                tracing::debug!(sweeps = sweep + 1, "SVR coordinate descent converged");
                converged = true;
                break;
            }
        }
        if !converged {
            tracing::debug!(sweeps = MAX_SWEEPS, "SVR stopped at sweep limit");
        }

        self.residuals = y
            .iter()
            .zip(&f)
            .map(|(t, p)| scaler.inverse(*t) - scaler.inverse(*p))
            .collect();
        self.support = x;
        self.coeffs = beta;
        self.fitted_gamma = gamma;
        self.history = scaled[scaled.len() - self.lag..].to_vec();
        self.scaler = Some(scaler);
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let scaler = self.scaler.as_ref().ok_or(TsError::NotFitted)?;
        let scaled = recursive_forecast(&self.history, self.lag, steps, |w| self.decision(w));
        Ok(scaled.into_iter().map(|v| scaler.inverse(v)).collect())
    }

    fn is_fitted(&self) -> bool {
        self.scaler.is_some()
    }

    fn min_observations(&self) -> usize {
        self.lag + 2
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }
}
