//! Time series error types

use thiserror::Error;

/// Result type alias for algorithm operations
pub type Result<T> = std::result::Result<T, TsError>;

/// Errors raised while fitting or predicting with a forecasting algorithm
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TsError {
    /// Series is shorter than the algorithm's minimum
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Hyperparameter outside its valid range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// `predict` called before a successful `fit`
    #[error("Model must be fitted before prediction")]
    NotFitted,

    /// Iterative training did not settle
    #[error("Optimization failed to converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },

    /// Singular system, overflow or similar
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Input contains values the algorithm cannot use
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl TsError {
    /// Shorthand for [`TsError::InvalidParameter`]
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Reject series that are too short or contain NaN / infinite values.
    pub fn check_series(data: &[f64], required: usize) -> Result<()> {
        if data.len() < required {
            return Err(Self::InsufficientData {
                required,
                actual: data.len(),
            });
        }
        if data.iter().any(|x| !x.is_finite()) {
            return Err(Self::InvalidData(
                "series contains NaN or infinite values".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let error = TsError::InsufficientData {
            required: 13,
            actual: 4,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 13 points, got 4"
        );
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let error = TsError::invalid_parameter("lag", "must be at least 1");
        assert_eq!(error.to_string(), "Invalid parameter 'lag': must be at least 1");
    }

    #[test]
    fn test_not_fitted_display() {
        assert_eq!(
            TsError::NotFitted.to_string(),
            "Model must be fitted before prediction"
        );
    }

    #[test]
    fn test_check_series_too_short() {
        let err = TsError::check_series(&[1.0, 2.0], 5).unwrap_err();
        assert_eq!(
            err,
            TsError::InsufficientData {
                required: 5,
                actual: 2
            }
        );
    }

    #[test]
    fn test_check_series_rejects_nan() {
        let err = TsError::check_series(&[1.0, f64::NAN, 3.0], 2).unwrap_err();
        assert!(matches!(err, TsError::InvalidData(_)));
    }

    #[test]
    fn test_check_series_accepts_clean_data() {
        assert!(TsError::check_series(&[12.5, 13.0, 14.2], 3).is_ok());
    }

    #[test]
    fn test_error_is_clone_and_eq() {
        let error = TsError::ConvergenceFailure { iterations: 500 };
        assert_eq!(error.clone(), error);
        assert_ne!(error, TsError::NotFitted);
    }

    #[test]
    fn test_error_propagation() {
        fn inner() -> Result<Vec<f64>> {
            Err(TsError::NotFitted)
        }
        fn outer() -> Result<usize> {
            let v = inner()?;
            Ok(v.len())
        }
        assert_eq!(outer().unwrap_err(), TsError::NotFitted);
    }
}
