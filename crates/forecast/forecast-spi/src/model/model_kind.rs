//! Supported forecasting models

use crate::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed set of forecasting models.
///
/// Parses from snake_case identifiers plus common aliases (`rf`, `gbm`,
/// `ets`, ...); separators `-` and spaces are treated as `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Prophet,
    Arima,
    Lstm,
    #[serde(alias = "rf")]
    RandomForest,
    #[serde(alias = "gbm", alias = "gb")]
    GradientBoosting,
    Svr,
    #[serde(alias = "ets", alias = "holt_winters")]
    ExponentialSmoothing,
}

impl ModelKind {
    /// Every model, in display order
    pub const ALL: [ModelKind; 7] = [
        ModelKind::Prophet,
        ModelKind::Arima,
        ModelKind::Lstm,
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
        ModelKind::Svr,
        ModelKind::ExponentialSmoothing,
    ];

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Prophet => "prophet",
            ModelKind::Arima => "arima",
            ModelKind::Lstm => "lstm",
            ModelKind::RandomForest => "random_forest",
            ModelKind::GradientBoosting => "gradient_boosting",
            ModelKind::Svr => "svr",
            ModelKind::ExponentialSmoothing => "exponential_smoothing",
        }
    }

    /// Human-readable label used in forecast tables
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Prophet => "Prophet",
            ModelKind::Arima => "ARIMA",
            ModelKind::Lstm => "LSTM",
            ModelKind::RandomForest => "Random Forest",
            ModelKind::GradientBoosting => "Gradient Boosting",
            ModelKind::Svr => "SVR",
            ModelKind::ExponentialSmoothing => "Exponential Smoothing",
        }
    }

    /// Cargo feature gating the model family; `None` for always-built models
    pub fn feature(&self) -> Option<&'static str> {
        match self {
            ModelKind::Prophet => Some("prophet"),
            ModelKind::Lstm => Some("lstm"),
            ModelKind::RandomForest | ModelKind::GradientBoosting => Some("ensemble"),
            ModelKind::Svr => Some("svr"),
            ModelKind::Arima | ModelKind::ExponentialSmoothing => None,
        }
    }

    /// Parse a comma-separated list such as `"arima, rf,ets"`.
    pub fn parse_list(list: &str) -> Result<Vec<ModelKind>, ForecastError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let kind = match key.as_str() {
            "prophet" => ModelKind::Prophet,
            "arima" => ModelKind::Arima,
            "lstm" => ModelKind::Lstm,
            "random_forest" | "randomforest" | "rf" => ModelKind::RandomForest,
            "gradient_boosting" | "gradientboosting" | "gbm" | "gb" => {
                ModelKind::GradientBoosting
            }
            "svr" => ModelKind::Svr,
            "exponential_smoothing" | "ets" | "holt_winters" => ModelKind::ExponentialSmoothing,
            _ => return Err(ForecastError::UnknownModel(s.to_string())),
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_and_aliases() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.as_str().parse::<ModelKind>().unwrap(), kind);
        }
        assert_eq!("RF".parse::<ModelKind>().unwrap(), ModelKind::RandomForest);
        assert_eq!("gbm".parse::<ModelKind>().unwrap(), ModelKind::GradientBoosting);
        assert_eq!("ets".parse::<ModelKind>().unwrap(), ModelKind::ExponentialSmoothing);
        assert_eq!(
            "Random Forest".parse::<ModelKind>().unwrap(),
            ModelKind::RandomForest
        );
        assert_eq!(
            "exponential-smoothing".parse::<ModelKind>().unwrap(),
            ModelKind::ExponentialSmoothing
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "xgboost".parse::<ModelKind>().unwrap_err();
        assert!(matches!(err, ForecastError::UnknownModel(ref s) if s == "xgboost"));
        assert!("".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_parse_list() {
        let kinds = ModelKind::parse_list("arima, rf,,ets").unwrap();
        assert_eq!(
            kinds,
            vec![
                ModelKind::Arima,
                ModelKind::RandomForest,
                ModelKind::ExponentialSmoothing
            ]
        );
        assert!(ModelKind::parse_list("arima,nope").is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ModelKind::GradientBoosting).unwrap();
        assert_eq!(json, "\"gradient_boosting\"");
        let kind: ModelKind = serde_json::from_str("\"rf\"").unwrap();
        assert_eq!(kind, ModelKind::RandomForest);
    }

    #[test]
    fn test_features() {
        assert_eq!(ModelKind::Arima.feature(), None);
        assert_eq!(ModelKind::RandomForest.feature(), Some("ensemble"));
        assert_eq!(ModelKind::GradientBoosting.feature(), Some("ensemble"));
    }
}
