//! Normalized forecast output shared by every model

use super::ModelKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a table came from a fitted model or was substituted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastOrigin {
    Fitted,
    /// Synthetic stand-in produced after the model failed
    Placeholder { reason: String },
}

/// One forecast step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub forecast: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, forecast: f64) -> Self {
        Self {
            date,
            forecast,
            lower: None,
            upper: None,
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = Some(lower);
        self.upper = Some(upper);
        self
    }
}

/// Forecast for one model over the requested horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    /// Display label; placeholders carry a ` (placeholder)` suffix
    pub model: String,
    pub kind: ModelKind,
    pub origin: ForecastOrigin,
    pub points: Vec<ForecastPoint>,
}

impl ForecastTable {
    pub const PLACEHOLDER_SUFFIX: &'static str = " (placeholder)";

    /// Table produced by a fitted model
    pub fn fitted(kind: ModelKind, points: Vec<ForecastPoint>) -> Self {
        Self {
            model: kind.label().to_string(),
            kind,
            origin: ForecastOrigin::Fitted,
            points,
        }
    }

    /// Synthetic table standing in for a failed model
    pub fn placeholder(kind: ModelKind, points: Vec<ForecastPoint>, reason: impl Into<String>) -> Self {
        Self {
            model: format!("{}{}", kind.label(), Self::PLACEHOLDER_SUFFIX),
            kind,
            origin: ForecastOrigin::Placeholder {
                reason: reason.into(),
            },
            points,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.origin, ForecastOrigin::Placeholder { .. })
    }

    /// Failure reason for placeholders
    pub fn placeholder_reason(&self) -> Option<&str> {
        match &self.origin {
            ForecastOrigin::Placeholder { reason } => Some(reason),
            ForecastOrigin::Fitted => None,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn forecasts(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.forecast).collect()
    }

    /// True when every point carries both bounds
    pub fn has_bounds(&self) -> bool {
        !self.points.is_empty()
            && self
                .points
                .iter()
                .all(|p| p.lower.is_some() && p.upper.is_some())
    }
}
