//! Lag-window supervised framing for the machine learning models
//!
//! A series `y` becomes rows `[y[t-lag], .., y[t-1]] -> y[t]`. Multi-step
//! forecasts are produced recursively, feeding each prediction back into
//! the window.

/// Frame `data` as (features, target) pairs with `lag` inputs per row.
///
/// Returns empty vectors when `data.len() <= lag`.
pub fn lag_matrix(data: &[f64], lag: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    if lag == 0 || data.len() <= lag {
        return (Vec::new(), Vec::new());
    }
    data.windows(lag + 1)
        .map(|w| (w[..lag].to_vec(), w[lag]))
        .unzip()
}

/// Roll a one-step predictor forward `steps` times from the tail of `history`.
///
/// `history` must hold at least `lag` values.
pub fn recursive_forecast<F>(history: &[f64], lag: usize, steps: usize, mut step: F) -> Vec<f64>
where
    F: FnMut(&[f64]) -> f64,
{
    let mut window: Vec<f64> = history[history.len().saturating_sub(lag)..].to_vec();
    let mut out = Vec::with_capacity(steps);
    for _ in 0..steps {
        let next = step(&window);
        out.push(next);
        window.remove(0);
        window.push(next);
    }
    out
}
