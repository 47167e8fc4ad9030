//! Gradient boosted regression trees on lag windows (squared loss)

use super::tree::{RegressionTree, TreeParams};
use crate::utils::lag::{lag_matrix, recursive_forecast};
use algorithm_spi::{Predictor, Result, TsError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Gradient boosting forecaster
///
/// Starts from the target mean; every stage fits a shallow tree to the
/// current residuals and adds it scaled by `learning_rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosting {
    n_estimators: usize,
    learning_rate: f64,
    lag: usize,
    params: TreeParams,
    seed: u64,
    base: f64,
    stages: Vec<RegressionTree>,
    history: Vec<f64>,
    residuals: Vec<f64>,
}

impl GradientBoosting {
    pub fn new(n_estimators: usize, learning_rate: f64, lag: usize) -> Result<Self> {
        if n_estimators == 0 {
            return Err(TsError::invalid_parameter(
                "n_estimators",
                "must be at least 1",
            ));
        }
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(TsError::invalid_parameter(
                "learning_rate",
                "must be in (0, 1]",
            ));
        }
        if lag == 0 {
            return Err(TsError::invalid_parameter("lag", "must be at least 1"));
        }
        Ok(Self {
            n_estimators,
            learning_rate,
            lag,
            params: TreeParams {
                max_depth: 3,
                ..TreeParams::default()
            },
            seed: 42,
            base: 0.0,
            stages: Vec::new(),
            history: Vec::new(),
            residuals: Vec::new(),
        })
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.params.max_depth = depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.base
            + self.learning_rate
                * self.stages.iter().map(|t| t.predict_row(row)).sum::<f64>()
    }
}

impl Predictor for GradientBoosting {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        TsError::check_series(data, self.min_observations())?;
        let (x, y) = lag_matrix(data, self.lag);

        self.base = y.iter().sum::<f64>() / y.len() as f64;
        self.stages.clear();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut current = vec![self.base; y.len()];

        for _ in 0..self.n_estimators {
            let gradient: Vec<f64> = y.iter().zip(&current).map(|(t, p)| t - p).collect();
            let mut tree = RegressionTree::new(self.params);
            tree.fit(&x, &gradient, &mut rng);
            for (pred, row) in current.iter_mut().zip(&x) {
                *pred += self.learning_rate * tree.predict_row(row);
            }
            self.stages.push(tree);
        }

        self.residuals = y.iter().zip(&current).map(|(t, p)| t - p).collect();
        self.history = data[data.len() - self.lag..].to_vec();

        let train_rmse = (self.residuals.iter().map(|r| r * r).sum::<f64>()
            / self.residuals.len() as f64)
            .sqrt();
        tracing::debug!(
            stages = self.n_estimators,
            learning_rate = self.learning_rate,
            train_rmse,
            "fitted gradient boosting"
        );
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(TsError::NotFitted);
        }
        Ok(recursive_forecast(&self.history, self.lag, steps, |w| {
            self.predict_row(w)
        }))
    }

    fn is_fitted(&self) -> bool {
        !self.stages.is_empty()
    }

    fn min_observations(&self) -> usize {
        self.lag + 2
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }
}
