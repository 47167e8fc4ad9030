//! Series selection key.

use crate::model::SurveillanceRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pathogen/antibiotic/country combination identifying one series.
///
/// Matching is case-insensitive and an empty field matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    #[serde(default)]
    pub pathogen: String,
    #[serde(default)]
    pub antibiotic: String,
    #[serde(default)]
    pub country: String,
}

impl SeriesKey {
    pub fn new(
        pathogen: impl Into<String>,
        antibiotic: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            pathogen: pathogen.into().trim().to_string(),
            antibiotic: antibiotic.into().trim().to_string(),
            country: country.into().trim().to_string(),
        }
    }

    /// Key matching every record
    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_any(&self) -> bool {
        self.pathogen.is_empty() && self.antibiotic.is_empty() && self.country.is_empty()
    }

    pub fn matches(&self, record: &SurveillanceRecord) -> bool {
        field_matches(&self.pathogen, &record.pathogen)
            && field_matches(&self.antibiotic, &record.antibiotic)
            && field_matches(&self.country, &record.country)
    }
}

fn field_matches(wanted: &str, actual: &str) -> bool {
    wanted.is_empty() || wanted.eq_ignore_ascii_case(actual.trim())
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return f.write_str("all records");
        }
        let part = |s: &str| if s.is_empty() { "*".to_string() } else { s.to_string() };
        write!(
            f,
            "{} / {} / {}",
            part(&self.pathogen),
            part(&self.antibiotic),
            part(&self.country)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(pathogen: &str, antibiotic: &str, country: &str) -> SurveillanceRecord {
        SurveillanceRecord::new(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), 10.0)
            .with_key(&SeriesKey::new(pathogen, antibiotic, country))
    }

    #[test]
    fn test_case_insensitive_match() {
        let key = SeriesKey::new("e. coli", "CIPROFLOXACIN", "");
        assert!(key.matches(&record("E. coli", "Ciprofloxacin", "DE")));
        assert!(key.matches(&record("E. COLI", "ciprofloxacin", "FR")));
        assert!(!key.matches(&record("E. coli", "ceftriaxone", "DE")));
    }

    #[test]
    fn test_any_matches_everything() {
        let key = SeriesKey::any();
        assert!(key.is_any());
        assert!(key.matches(&record("S. aureus", "meticillin", "ES")));
        assert!(key.matches(&record("", "", "")));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SeriesKey::new("E. coli", "", "NL").to_string(),
            "E. coli / * / NL"
        );
        assert_eq!(SeriesKey::any().to_string(), "all records");
    }
}
