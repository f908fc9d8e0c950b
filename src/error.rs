//! Error types shared by every calculator in the crate

/// Failures that stop a single calculation
#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    #[error("unsupported tax year: {0}")]
    UnsupportedTaxYear(String),

    #[error("invalid profile field `{field}`: {reason}")]
    InvalidProfile { field: &'static str, reason: String },

    #[error("rate data error: {0}")]
    RateData(String),
}

impl CalculationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalculationError::InvalidProfile {
            field,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for CalculationError {
    fn from(err: std::io::Error) -> Self {
        CalculationError::RateData(err.to_string())
    }
}

impl From<csv::Error> for CalculationError {
    fn from(err: csv::Error) -> Self {
        CalculationError::RateData(err.to_string())
    }
}

impl From<serde_json::Error> for CalculationError {
    fn from(err: serde_json::Error) -> Self {
        CalculationError::RateData(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, CalculationError>;
