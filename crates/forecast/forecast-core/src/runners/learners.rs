//! Runners for the lag-window learners: LSTM, random forest, gradient
//! boosting and SVR.

#[cfg(feature = "lstm")]
pub use self::lstm::LstmRunner;

#[cfg(feature = "ensemble")]
pub use self::ensemble::{GradientBoostingRunner, RandomForestRunner};

#[cfg(feature = "svr")]
pub use self::svr::SvrRunner;

#[cfg(feature = "lstm")]
mod lstm {
    use crate::runners::fit_predict;
    use algorithm_core::Lstm;
    use forecast_api::LstmConfig;
    use forecast_spi::{ForecastError, ModelKind, ModelRunner, Result, RunnerOutput};

    #[derive(Debug, Clone, Copy)]
    pub struct LstmRunner {
        config: LstmConfig,
        seed: u64,
    }

    impl LstmRunner {
        pub fn new(config: LstmConfig, seed: u64) -> Self {
            Self { config, seed }
        }
    }

    impl ModelRunner for LstmRunner {
        fn kind(&self) -> ModelKind {
            ModelKind::Lstm
        }

        fn min_observations(&self) -> usize {
            self.config.lag + 2
        }

        fn run(&self, history: &[f64], horizon: usize) -> Result<RunnerOutput> {
            let model = Lstm::new(self.config.lag, self.config.hidden)
                .map_err(|e| ForecastError::from_algorithm(self.kind(), e))?
                .with_epochs(self.config.epochs)
                .with_learning_rate(self.config.learning_rate)
                .with_seed(self.seed);
            fit_predict(self.kind(), model, history, horizon)
        }
    }
}

#[cfg(feature = "ensemble")]
mod ensemble {
    use crate::runners::fit_predict;
    use algorithm_core::{GradientBoosting, RandomForest, TreeParams};
    use forecast_api::{GradientBoostingConfig, RandomForestConfig};
    use forecast_spi::{ForecastError, ModelKind, ModelRunner, Result, RunnerOutput};

    #[derive(Debug, Clone, Copy)]
    pub struct RandomForestRunner {
        config: RandomForestConfig,
        seed: u64,
    }

    impl RandomForestRunner {
        pub fn new(config: RandomForestConfig, seed: u64) -> Self {
            Self { config, seed }
        }
    }

    impl ModelRunner for RandomForestRunner {
        fn kind(&self) -> ModelKind {
            ModelKind::RandomForest
        }

        fn min_observations(&self) -> usize {
            self.config.lag + 2
        }

        fn run(&self, history: &[f64], horizon: usize) -> Result<RunnerOutput> {
            let params = TreeParams {
                max_depth: self.config.max_depth,
                min_samples_leaf: self.config.min_samples_leaf,
                ..TreeParams::default()
            };
            let model = RandomForest::new(self.config.n_trees, self.config.lag)
                .map_err(|e| ForecastError::from_algorithm(self.kind(), e))?
                .with_tree_params(params)
                .with_seed(self.seed);
            fit_predict(self.kind(), model, history, horizon)
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct GradientBoostingRunner {
        config: GradientBoostingConfig,
        seed: u64,
    }

    impl GradientBoostingRunner {
        pub fn new(config: GradientBoostingConfig, seed: u64) -> Self {
            Self { config, seed }
        }
    }

    impl ModelRunner for GradientBoostingRunner {
        fn kind(&self) -> ModelKind {
            ModelKind::GradientBoosting
        }

        fn min_observations(&self) -> usize {
            self.config.lag + 2
        }

        fn run(&self, history: &[f64], horizon: usize) -> Result<RunnerOutput> {
            let model = GradientBoosting::new(
                self.config.n_estimators,
                self.config.learning_rate,
                self.config.lag,
            )
            .map_err(|e| ForecastError::from_algorithm(self.kind(), e))?
            .with_max_depth(self.config.max_depth)
            .with_seed(self.seed);
            fit_predict(self.kind(), model, history, horizon)
        }
    }
}

#[cfg(feature = "svr")]
mod svr {
    use crate::runners::fit_predict;
    use algorithm_core::Svr;
    use forecast_api::SvrConfig;
    use forecast_spi::{ForecastError, ModelKind, ModelRunner, Result, RunnerOutput};

    #[derive(Debug, Clone, Copy)]
    pub struct SvrRunner {
        config: SvrConfig,
    }

    impl SvrRunner {
        pub fn new(config: SvrConfig) -> Self {
            Self { config }
        }
    }

    impl ModelRunner for SvrRunner {
        fn kind(&self) -> ModelKind {
            ModelKind::Svr
        }

        fn min_observations(&self) -> usize {
            self.config.lag + 2
        }

        fn run(&self, history: &[f64], horizon: usize) -> Result<RunnerOutput> {
            let mut model = Svr::new(self.config.c, self.config.epsilon, self.config.lag)
                .map_err(|e| ForecastError::from_algorithm(self.kind(), e))?;
            if let Some(gamma) = self.config.gamma {
                model = model.with_gamma(gamma);
            }
            fit_predict(self.kind(), model, history, horizon)
        }
    }
}
