//! Single-layer LSTM regressor on lag windows
//!
//! Each training sample is a window of `lag` min-max scaled values fed one
//! step at a time into an LSTM cell with `hidden` units; a dense layer maps
//! the final hidden state to the next value. Training uses full
//! backpropagation through time with per-sample Adam updates and a
//! reshuffle every epoch. Multi-step forecasts are recursive.
//!
//! Parameters live in one flat vector:
//! `[W_x (4H) | W_h (4H x H) | b (4H) | w_out (H) | b_out]`, gate order
//! input, forget, candidate, output.

use crate::utils::lag::{lag_matrix, recursive_forecast};
use crate::utils::scaling::MinMaxScaler;
use algorithm_spi::{Predictor, Result, TsError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

const GRAD_CLIP: f64 = 5.0;

/// LSTM forecaster
///
/// # Example
///
/// ```rust
/// use algorithm_core::ml::Lstm;
/// use algorithm_core::Predictor;
///
/// let data: Vec<f64> = (0..40).map(|i| 10.0 + (i as f64 * 0.5).sin()).collect();
/// let mut model = Lstm::new(6, 8).unwrap().with_epochs(5);
/// model.fit(&data).unwrap();
/// assert_eq!(model.predict(3).unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lstm {
    lag: usize,
    hidden: usize,
    epochs: usize,
    learning_rate: f64,
    seed: u64,
    theta: Vec<f64>,
    scaler: Option<MinMaxScaler>,
    history: Vec<f64>,
    residuals: Vec<f64>,
    final_loss: f64,
}

/// Activations kept from the forward pass for BPTT
struct StepCache {
    x: f64,
    gates: Vec<f64>,
    c_prev: Vec<f64>,
    h_prev: Vec<f64>,
    c: Vec<f64>,
}

struct Layout {
    hidden: usize,
}

impl Layout {
    fn wx(&self) -> usize {
        0
    }
    fn wh(&self) -> usize {
        4 * self.hidden
    }
    fn b(&self) -> usize {
        self.wh() + 4 * self.hidden * self.hidden
    }
    fn w_out(&self) -> usize {
        self.b() + 4 * self.hidden
    }
    fn b_out(&self) -> usize {
        self.w_out() + self.hidden
    }
    fn len(&self) -> usize {
        self.b_out() + 1
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Lstm {
    /// * `lag` - input window length (at least 1)
    /// * `hidden` - number of LSTM units (at least 1)
    pub fn new(lag: usize, hidden: usize) -> Result<Self> {
        if lag == 0 {
            return Err(TsError::invalid_parameter("lag", "must be at least 1"));
        }
        if hidden == 0 {
            return Err(TsError::invalid_parameter("hidden", "must be at least 1"));
        }
        Ok(Self {
            lag,
            hidden,
            epochs: 100,
            learning_rate: 0.01,
            seed: 42,
            theta: Vec::new(),
            scaler: None,
            history: Vec::new(),
            residuals: Vec::new(),
            final_loss: f64::NAN,
        })
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs.max(1);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Mean squared error (scaled units) over the last training epoch
    pub fn final_loss(&self) -> f64 {
        self.final_loss
    }

    fn layout(&self) -> Layout {
        Layout {
            hidden: self.hidden,
        }
    }

    fn init_weights(&self) -> Result<Vec<f64>> {
        let layout = self.layout();
        let h = self.hidden;
        let normal = Normal::new(0.0, 1.0 / (h as f64).sqrt())
            .map_err(|e| TsError::NumericalError(e.to_string()))?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut theta: Vec<f64> = (0..layout.len()).map(|_| normal.sample(&mut rng)).collect();

        for v in &mut theta[layout.b()..layout.w_out()] {
            *v = 0.0;
        }
        for v in &mut theta[layout.b() + h..layout.b() + 2 * h] {
            *v = 1.0;
        }
        theta[layout.b_out()] = 0.0;
        Ok(theta)
    }

    fn forward(&self, theta: &[f64], window: &[f64], cache: Option<&mut Vec<StepCache>>) -> (f64, Vec<f64>) {
        let layout = self.layout();
        let h = self.hidden;
        let mut hs = vec![0.0; h];
        let mut cs = vec![0.0; h];
        let mut steps = cache;

        for &x in window {
            let mut z = vec![0.0; 4 * h];
            for (r, zr) in z.iter_mut().enumerate() {
                let row = &theta[layout.wh() + r * h..layout.wh() + (r + 1) * h];
                *zr = theta[layout.wx() + r] * x
                    + theta[layout.b() + r]
                    + row.iter().zip(&hs).map(|(w, hv)| w * hv).sum::<f64>();
            }
            let mut gates = vec![0.0; 4 * h];
            for k in 0..h {
                gates[k] = sigmoid(z[k]);
                gates[h + k] = sigmoid(z[h + k]);
                gates[2 * h + k] = z[2 * h + k].tanh();
                gates[3 * h + k] = sigmoid(z[3 * h + k]);
            }
            let c_next: Vec<f64> = (0..h)
                .map(|k| gates[h + k] * cs[k] + gates[k] * gates[2 * h + k])
                .collect();
            let h_next: Vec<f64> = (0..h)
                .map(|k| gates[3 * h + k] * c_next[k].tanh())
                .collect();

            if let Some(steps) = steps.as_deref_mut() {
                steps.push(StepCache {
                    x,
                    gates,
                    c_prev: std::mem::take(&mut cs),
                    h_prev: std::mem::take(&mut hs),
                    c: c_next.clone(),
                });
            }
            cs = c_next;
            hs = h_next;
        }

        let out = theta[layout.b_out()]
            + theta[layout.w_out()..layout.b_out()]
                .iter()
                .zip(&hs)
                .map(|(w, hv)| w * hv)
                .sum::<f64>();
        (out, hs)
    }

    /// Squared-error gradient for one window via BPTT. Returns the loss.
    fn backward(&self, theta: &[f64], window: &[f64], target: f64, grad: &mut [f64]) -> f64 {
        let layout = self.layout();
        let h = self.hidden;
        let mut cache = Vec::with_capacity(window.len());
        let (out, h_last) = self.forward(theta, window, Some(&mut cache));

        grad.iter_mut().for_each(|g| *g = 0.0);
        let dy = out - target;
        grad[layout.b_out()] = dy;
        for k in 0..h {
            grad[layout.w_out() + k] = dy * h_last[k];
        }

        let mut dh: Vec<f64> = (0..h).map(|k| dy * theta[layout.w_out() + k]).collect();
        let mut dc_next = vec![0.0; h];

        for step in cache.iter().rev() {
            let mut dz = vec![0.0; 4 * h];
            for k in 0..h {
                let i = step.gates[k];
                let f = step.gates[h + k];
                let g = step.gates[2 * h + k];
                let o = step.gates[3 * h + k];
                let tanh_c = step.c[k].tanh();

                let d_o = dh[k] * tanh_c;
                let dc = dc_next[k] + dh[k] * o * (1.0 - tanh_c * tanh_c);
                dz[k] = dc * g * i * (1.0 - i);
                dz[h + k] = dc * step.c_prev[k] * f * (1.0 - f);
                dz[2 * h + k] = dc * i * (1.0 - g * g);
                dz[3 * h + k] = d_o * o * (1.0 - o);
                dc_next[k] = dc * f;
            }

            let mut dh_prev = vec![0.0; h];
            for (r, &dzr) in dz.iter().enumerate() {
                grad[layout.wx() + r] += dzr * step.x;
                grad[layout.b() + r] += dzr;
                let base = layout.wh() + r * h;
                for k in 0..h {
                    grad[base + k] += dzr * step.h_prev[k];
                    dh_prev[k] += theta[base + k] * dzr;
                }
            }
            dh = dh_prev;
        }

        for g in grad.iter_mut() {
            *g = g.clamp(-GRAD_CLIP, GRAD_CLIP);
        }
        0.5 * dy * dy
    }
}

/// Adam optimiser state over a flat parameter vector
struct Adam {
    lr: f64,
    m: Vec<f64>,
    v: Vec<f64>,
    t: i32,
}

impl Adam {
    const BETA1: f64 = 0.9;
    const BETA2: f64 = 0.999;
    const EPS: f64 = 1e-8;

    fn new(n: usize, lr: f64) -> Self {
        Self {
            lr,
            m: vec![0.0; n],
            v: vec![0.0; n],
            t: 0,
        }
    }

    fn step(&mut self, theta: &mut [f64], grad: &[f64]) {
        self.t += 1;
        let bc1 = 1.0 - Self::BETA1.powi(self.t);
        let bc2 = 1.0 - Self::BETA2.powi(self.t);
        for ((p, g), (m, v)) in theta
            .iter_mut()
            .zip(grad)
            .zip(self.m.iter_mut().zip(self.v.iter_mut()))
        {
            *m = Self::BETA1 * *m + (1.0 - Self::BETA1) * g;
            *v = Self::BETA2 * *v + (1.0 - Self::BETA2) * g * g;
            *p -= self.lr * (*m / bc1) / ((*v / bc2).sqrt() + Self::EPS);
        }
    }
}

impl Predictor for Lstm {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        TsError::check_series(data, self.min_observations())?;
        if self.learning_rate <= 0.0 {
            return Err(TsError::invalid_parameter("learning_rate", "must be positive"));
        }

        let scaler = MinMaxScaler::fit(data);
        let scaled = scaler.transform_all(data);
        let (x, y) = lag_matrix(&scaled, self.lag);

        let mut theta = self.init_weights()?;
        let mut grad = vec![0.0; theta.len()];
        let mut adam = Adam::new(theta.len(), self.learning_rate);
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        let mut order: Vec<usize> = (0..x.len()).collect();
        let mut epoch_loss = f64::NAN;

        for epoch in 0..self.epochs {
            order.shuffle(&mut rng);
            let mut total = 0.0;
            for &i in &order {
                total += self.backward(&theta, &x[i], y[i], &mut grad);
                adam.step(&mut theta, &grad);
            }
            epoch_loss = 2.0 * total / x.len() as f64;
            if !epoch_loss.is_finite() {
                return Err(TsError::ConvergenceFailure { iterations: epoch + 1 });
            }
            if epoch % 25 == 0 {
                tracing::trace!(epoch, loss = epoch_loss, "LSTM epoch");
            }
        }

        self.residuals = x
            .iter()
            .zip(&y)
            .map(|(w, t)| scaler.inverse(*t) - scaler.inverse(self.forward(&theta, w, None).0))
            .collect();
        self.theta = theta;
        self.history = scaled[scaled.len() - self.lag..].to_vec();
        self.scaler = Some(scaler);
        self.final_loss = epoch_loss;

        tracing::debug!(
            epochs = self.epochs,
            hidden = self.hidden,
            loss = epoch_loss,
            "fitted LSTM"
        );
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let scaler = self.scaler.as_ref().ok_or(TsError::NotFitted)?;
        let scaled = recursive_forecast(&self.history, self.lag, steps, |w| {
            self.forward(&self.theta, w, None).0
        });
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
