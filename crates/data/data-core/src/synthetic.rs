//! Seeded synthetic surveillance data
//!
//! Generates plausible monthly resistance series: a logistic rise between
//! a floor and a ceiling, a yearly seasonal swing and Gaussian noise,
//! clamped to [0, 100]. Every record set it returns is flagged synthetic.

use chrono::{Months, NaiveDate};
use data_spi::{DataError, DataSource, RecordSet, Result, SeriesKey, SurveillanceRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;
use tracing::info;

/// Standard deviation of the noise term, in percentage points
const NOISE_STD: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    name: String,
    keys: Vec<SeriesKey>,
    start: NaiveDate,
    months: usize,
    seed: u64,
}

impl SyntheticSource {
    pub fn new(keys: Vec<SeriesKey>, start: NaiveDate, months: usize) -> Self {
        Self {
            name: "synthetic".to_string(),
            keys,
            start,
            months,
            seed: 42,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn series(&self, index: usize, key: &SeriesKey) -> Result<Vec<SurveillanceRecord>> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(index as u64));
        let noise = Normal::new(0.0, NOISE_STD).map_err(|e| DataError::Source {
            name: self.name.clone(),
            message: e.to_string(),
        })?;

        let floor = rng.gen_range(5.0..25.0);
        let ceiling = floor + rng.gen_range(10.0..40.0);
        let midpoint = self.months as f64 * rng.gen_range(0.3..0.7);
        let steepness = rng.gen_range(0.03..0.12);
        let amplitude = rng.gen_range(0.5..3.0);
        let phase = rng.gen_range(0.0..2.0 * PI);

        let mut records = Vec::with_capacity(self.months);
        for t in 0..self.months {
            let Some(date) = self.start.checked_add_months(Months::new(t as u32)) else {
                break;
            };
            let x = t as f64;
            let trend = floor + (ceiling - floor) / (1.0 + (-steepness * (x - midpoint)).exp());
            let season = amplitude * (2.0 * PI * x / 12.0 + phase).sin();
            let percent = (trend + season + noise.sample(&mut rng)).clamp(0.0, 100.0);

            let tested: u32 = rng.gen_range(80..400);
            let resistant = (percent / 100.0 * f64::from(tested)).round() as u32;
            records.push(
                SurveillanceRecord::new(date, percent)
                    .with_key(key)
                    .with_counts(resistant, tested),
            );
        }
        Ok(records)
    }
}

impl DataSource for SyntheticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<RecordSet> {
        let mut records = Vec::with_capacity(self.keys.len() * self.months);
        for (i, key) in self.keys.iter().enumerate() {
            records.extend(self.series(i, key)?);
        }
        info!(
            source = %self.name,
            keys = self.keys.len(),
            records = records.len(),
            "generated synthetic records"
        );
        Ok(RecordSet::synthetic(&self.name, records))
    }
}
