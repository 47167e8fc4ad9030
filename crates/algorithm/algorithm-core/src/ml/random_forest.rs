//! Random forest regression on lag windows
//!
//! Bagged CART trees, each grown on a bootstrap sample of the lag matrix.
//! Trees are independent, so they train in parallel on the rayon pool; each
//! tree draws from its own RNG seeded from the forest seed and its index, so
//! results do not depend on scheduling.
//!
//! Like any tree model the forest cannot extrapolate beyond the range of
//! values it was trained on.

use super::tree::{RegressionTree, TreeParams};
use crate::utils::lag::{lag_matrix, recursive_forecast};
use algorithm_spi::{Predictor, Result, TsError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random forest forecaster
///
/// # Example
///
/// ```rust
/// use algorithm_core::ml::RandomForest;
/// use algorithm_core::Predictor;
///
/// let data: Vec<f64> = (0..60).map(|i| 40.0 + 5.0 * (i as f64 * 0.5).sin()).collect();
/// let mut forest = RandomForest::new(20, 6).unwrap().with_seed(1);
/// forest.fit(&data).unwrap();
/// assert_eq!(forest.predict(4).unwrap().len(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    n_trees: usize,
    lag: usize,
    params: TreeParams,
    seed: u64,
    trees: Vec<RegressionTree>,
    history: Vec<f64>,
    residuals: Vec<f64>,
}

impl RandomForest {
    /// * `n_trees` - number of bagged trees (at least 1)
    /// * `lag` - lag window length (at least 1)
    pub fn new(n_trees: usize, lag: usize) -> Result<Self> {
        if n_trees == 0 {
            return Err(TsError::invalid_parameter("n_trees", "must be at least 1"));
        }
        if lag == 0 {
            return Err(TsError::invalid_parameter("lag", "must be at least 1"));
        }
        Ok(Self {
            n_trees,
            lag,
            params: TreeParams::default(),
            seed: 42,
            trees: Vec::new(),
            history: Vec::new(),
            residuals: Vec::new(),
        })
    }

    pub fn with_tree_params(mut self, params: TreeParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>() / self.trees.len() as f64
    }
}

impl Predictor for RandomForest {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        TsError::check_series(data, self.min_observations())?;
        let (x, y) = lag_matrix(data, self.lag);
        let n_rows = x.len();

        let params = self.params;
        let seed = self.seed;
        self.trees = (0..self.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                let sample: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
                let xs: Vec<Vec<f64>> = sample.iter().map(|&j| x[j].clone()).collect();
                let ys: Vec<f64> = sample.iter().map(|&j| y[j]).collect();
                let mut tree = RegressionTree::new(params);
                tree.fit(&xs, &ys, &mut rng);
                tree
            })
            .collect();

        self.residuals = x
            .iter()
            .zip(&y)
            .map(|(row, target)| target - self.predict_row(row))
            .collect();
        self.history = data[data.len() - self.lag..].to_vec();

        tracing::debug!(
            trees = self.n_trees,
            lag = self.lag,
            rows = n_rows,
            "fitted random forest"
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
        !self.trees.is_empty()
    }

    fn min_observations(&self) -> usize {
        self.lag + 2
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }
}
