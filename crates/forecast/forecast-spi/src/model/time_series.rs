//! Dated univariate series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observed value (resistance percentage) at a date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Sequence of observations with an optional label.
///
/// Raw input is kept as given: no ordering or uniqueness is enforced.
/// Use [`TimeSeries::sorted`] when chronological order is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    observations: Vec<Observation>,
}

impl TimeSeries {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self {
            label: None,
            observations,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build from `(date, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        pairs
            .into_iter()
            .map(|(date, value)| Observation::new(date, value))
            .collect()
    }

    pub fn push(&mut self, date: NaiveDate, value: f64) {
        self.observations.push(Observation::new(date, value));
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Latest date in the series, regardless of input order
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.iter().map(|o| o.date).max()
    }

    /// Value of the final observation as stored
    pub fn last_value(&self) -> Option<f64> {
        self.observations.last().map(|o| o.value)
    }

    /// Copy sorted by date (stable for equal dates)
    pub fn sorted(&self) -> Self {
        let mut observations = self.observations.clone();
        observations.sort_by_key(|o| o.date);
        Self {
            label: self.label.clone(),
            observations,
        }
    }

    /// Copy sorted by date with repeated dates replaced by their mean
    pub fn aggregated(&self) -> Self {
        let sorted = self.sorted();
        let mut observations: Vec<Observation> = Vec::with_capacity(sorted.len());
        let mut count = 0usize;
        for obs in sorted.observations {
            match observations.last_mut() {
                Some(last) if last.date == obs.date => {
                    count += 1;
                    last.value += (obs.value - last.value) / count as f64;
                }
                _ => {
                    observations.push(obs);
                    count = 1;
                }
            }
        }
        Self {
            label: sorted.label,
            observations,
        }
    }

    /// Split into the first `at` observations and the rest.
    ///
    /// `at` is clamped to the series length.
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.observations.len());
        let (head, tail) = self.observations.split_at(at);
        (
            Self {
                label: self.label.clone(),
                observations: head.to_vec(),
            },
            Self {
                label: self.label.clone(),
                observations: tail.to_vec(),
            },
        )
    }
}

impl FromIterator<Observation> for TimeSeries {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
