//! Accuracy records for forecast evaluation

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Accuracy of one forecast table against held-out actuals.
///
/// With no aligned points `rmse` and `mae` are NaN, which JSON stores as
/// `null` and reads back as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    #[serde(deserialize_with = "nan_from_null")]
    pub rmse: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub mae: f64,
    /// Percent; `None` when every aligned actual is zero
    pub mape: Option<f64>,
    /// Number of aligned points
    pub n: usize,
    /// Record belongs to a placeholder table
    #[serde(default)]
    pub placeholder: bool,
}

fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Evaluation results keyed by model label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluation {
    records: BTreeMap<String, EvaluationRecord>,
}

impl Evaluation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, record: EvaluationRecord) {
        self.records.insert(label.into(), record);
    }

    pub fn get(&self, label: &str) -> Option<&EvaluationRecord> {
        self.records.get(label)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EvaluationRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fitted model with the lowest finite RMSE
    pub fn best(&self) -> Option<(&str, &EvaluationRecord)> {
        self.iter()
            .filter(|(_, r)| !r.placeholder && r.n > 0 && r.rmse.is_finite())
            .min_by(|a, b| a.1.rmse.total_cmp(&b.1.rmse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rmse: f64, placeholder: bool) -> EvaluationRecord {
        EvaluationRecord {
            rmse,
            mae: rmse,
            mape: Some(1.0),
            n: 6,
            placeholder,
        }
    }

    #[test]
    fn test_best_skips_placeholders() {
        let mut eval = Evaluation::new();
        eval.insert("ARIMA", record(2.0, false));
        eval.insert("LSTM (placeholder)", record(0.5, true));
        eval.insert("SVR", record(1.5, false));

        let (label, best) = eval.best().unwrap();
        assert_eq!(label, "SVR");
        assert_eq!(best.rmse, 1.5);
    }

    #[test]
    fn test_best_empty_or_all_placeholders() {
        let mut eval = Evaluation::new();
        assert!(eval.best().is_none());
        eval.insert("Prophet (placeholder)", record(1.0, true));
        assert!(eval.best().is_none());
    }

    #[test]
    fn test_json_is_label_map() {
        let mut eval = Evaluation::new();
        eval.insert("ARIMA", record(2.0, false));
        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["ARIMA"]["rmse"], 2.0);
        assert_eq!(json["ARIMA"]["n"], 6);

        let back: Evaluation = serde_json::from_value(json).unwrap();
        assert_eq!(back, eval);
    }

    #[test]
    fn test_null_errors_read_back_as_nan() {
        let json = r#"{"ARIMA": {"rmse": null, "mae": null, "mape": null, "n": 0}}"#;
        let eval: Evaluation = serde_json::from_str(json).unwrap();
        let record = eval.get("ARIMA").unwrap();
        assert!(record.rmse.is_nan() && record.mae.is_nan());
        assert!(!record.placeholder);
        assert!(eval.best().is_none());
    }
}
