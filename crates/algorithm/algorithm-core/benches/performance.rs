//! Performance benchmarks for algorithm-core
//!
//! Timings for fitting each model on monthly-scale and long series.

use std::time::Instant;

use algorithm_core::prelude::*;
use algorithm_core::utils::metrics::{mae, rmse};

fn generate_data(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            30.0 + t * 0.05 + 4.0 * (t * std::f64::consts::PI / 6.0).sin() + (t * 0.37).cos()
        })
        .collect()
}

fn bench<F>(name: &str, iterations: u32, mut f: F)
where
    F: FnMut(),
{
    f();

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations;

    println!(
        "{:34} {:>10.2?} total, {:>10.2?}/iter ({} iters)",
        name, elapsed, per_iter, iterations
    );
}

fn main() {
    println!("=== amrcast algorithm benchmarks ===\n");

    let monthly = generate_data(120);
    let long = generate_data(2_000);

    println!("--- Statistical models (120 points) ---");
    bench("arima(1,1,1) fit+predict", 200, || {
        let mut m = Arima::new(1, 1, 1).unwrap();
        m.fit(&monthly).unwrap();
        let _ = m.predict(12).unwrap();
    });
    bench("holt_winters fit+predict", 200, || {
        let mut m = ExponentialSmoothing::holt_winters(0.3, 0.1, 0.2, 12).unwrap();
        m.fit(&monthly).unwrap();
        let _ = m.predict(12).unwrap();
    });
    #[cfg(feature = "prophet")]
    bench("prophet fit+interval", 100, || {
        let mut m = Prophet::new().with_seasonality(12.0, 3);
        m.fit(&monthly).unwrap();
        let _ = m.predict_interval(12, 0.95).unwrap();
    });

    println!("\n--- Lag-window learners (120 points) ---");
    #[cfg(feature = "ensemble")]
    {
        bench("random_forest(100) fit", 10, || {
            let mut m = RandomForest::new(100, 12).unwrap();
            m.fit(&monthly).unwrap();
        });
        bench("gradient_boosting(100) fit", 10, || {
            let mut m = GradientBoosting::new(100, 0.1, 12).unwrap();
            m.fit(&monthly).unwrap();
        });
    }
    #[cfg(feature = "svr")]
    bench("svr fit", 10, || {
        let mut m = Svr::new(10.0, 0.05, 12).unwrap();
        m.fit(&monthly).unwrap();
    });
    #[cfg(feature = "lstm")]
    bench("lstm(100 epochs) fit", 3, || {
        let mut m = Lstm::new(12, 16).unwrap();
        m.fit(&monthly).unwrap();
    });

    println!("\n--- Long series (2K points) ---");
    bench("arima(2,1,0) fit", 50, || {
        let mut m = Arima::new(2, 1, 0).unwrap();
        m.fit(&long).unwrap();
    });
    bench("mae + rmse", 1_000, || {
        let _ = mae(&long[..120], &monthly);
        let _ = rmse(&long[..120], &monthly);
    });
}
