//! Feature and target scaling for the lag-window learners

use serde::{Deserialize, Serialize};

/// Maps values into `[0, 1]` using the fitted range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    range: f64,
}

impl MinMaxScaler {
    /// Fit on `data`; a constant series gets a unit range.
    pub fn fit(data: &[f64]) -> Self {
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        Self {
            min: if min.is_finite() { min } else { 0.0 },
            range: if range.is_finite() && range > 1e-12 { range } else { 1.0 },
        }
    }

    pub fn transform(&self, x: f64) -> f64 {
        (x - self.min) / self.range
    }

    pub fn inverse(&self, x: f64) -> f64 {
        x * self.range + self.min
    }

    pub fn transform_all(&self, data: &[f64]) -> Vec<f64> {
        data.iter().map(|&x| self.transform(x)).collect()
    }
}

/// Zero mean, unit variance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: f64,
    std_dev: f64,
}

impl StandardScaler {
    /// Fit on `data`; a constant series gets unit deviation.
    pub fn fit(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self { mean: 0.0, std_dev: 1.0 };
        }
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std_dev = var.sqrt();
        Self {
            mean,
            std_dev: if std_dev > 1e-12 { std_dev } else { 1.0 },
        }
    }

    pub fn transform(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }

    pub fn inverse(&self, x: f64) -> f64 {
        x * self.std_dev + self.mean
    }

    pub fn transform_all(&self, data: &[f64]) -> Vec<f64> {
        data.iter().map(|&x| self.transform(x)).collect()
    }
}
