//! Surveillance record types.

use crate::model::SeriesKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One resistance observation for a pathogen/antibiotic/country at a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveillanceRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub pathogen: String,
    #[serde(default)]
    pub antibiotic: String,
    /// Resistant isolates
    pub resistant: Option<u32>,
    /// Isolates tested
    pub tested: Option<u32>,
    /// Explicit percentage, 0 to 100
    pub percent_resistant: Option<f64>,
}

impl SurveillanceRecord {
    /// Record with an explicit percentage and empty key fields.
    pub fn new(date: NaiveDate, percent_resistant: f64) -> Self {
        Self {
            date,
            country: String::new(),
            pathogen: String::new(),
            antibiotic: String::new(),
            resistant: None,
            tested: None,
            percent_resistant: Some(percent_resistant),
        }
    }

    pub fn with_key(mut self, key: &SeriesKey) -> Self {
        self.pathogen = key.pathogen.clone();
        self.antibiotic = key.antibiotic.clone();
        self.country = key.country.clone();
        self
    }

    pub fn with_counts(mut self, resistant: u32, tested: u32) -> Self {
        self.resistant = Some(resistant);
        self.tested = Some(tested);
        self
    }

    /// Percentage resistant.
    ///
    /// Uses the explicit column when present, otherwise `resistant/tested`.
    /// `None` when neither is available or nothing was tested.
    pub fn percent(&self) -> Option<f64> {
        if let Some(p) = self.percent_resistant.filter(|p| p.is_finite()) {
            return Some(p);
        }
        match (self.resistant, self.tested) {
            (Some(r), Some(t)) if t > 0 => Some(100.0 * f64::from(r) / f64::from(t)),
            _ => None,
        }
    }

    /// Key identifying the series this record belongs to
    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(&self.pathogen, &self.antibiotic, &self.country)
    }
}

/// Records returned by one source fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Name of the source that produced the records
    pub source: String,
    pub records: Vec<SurveillanceRecord>,
    /// Records are generated, not observed
    pub synthetic: bool,
}

impl RecordSet {
    pub fn observed(source: impl Into<String>, records: Vec<SurveillanceRecord>) -> Self {
        Self {
            source: source.into(),
            records,
            synthetic: false,
        }
    }

    pub fn synthetic(source: impl Into<String>, records: Vec<SurveillanceRecord>) -> Self {
        Self {
            source: source.into(),
            records,
            synthetic: true,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    #[test]
    fn test_percent_prefers_explicit_column() {
        let record = SurveillanceRecord::new(date(), 12.5).with_counts(1, 2);
        assert_eq!(record.percent(), Some(12.5));
    }

    #[test]
    fn test_percent_from_counts() {
        let mut record = SurveillanceRecord::new(date(), 0.0).with_counts(30, 120);
        record.percent_resistant = None;
        assert_eq!(record.percent(), Some(25.0));

        record.tested = Some(0);
        assert_eq!(record.percent(), None);
    }

    #[test]
    fn test_key_and_record_set() {
        let key = SeriesKey::new("K. pneumoniae", "carbapenems", "IT");
        let record = SurveillanceRecord::new(date(), 30.0).with_key(&key);
        assert_eq!(record.key(), key);

        let set = RecordSet::synthetic("synthetic", vec![record]);
        assert!(set.synthetic);
        assert_eq!(set.len(), 1);
        assert!(!RecordSet::observed("csv", Vec::new()).synthetic);
    }
}
