//! Growth prediction error types.

use thiserror::Error;

/// Errors that can occur while building features, training, forecasting or
/// analysing trends.
#[derive(Error, Debug)]
pub enum GrowthError {
    /// No data to train or analyze on.
    #[error("No data available: {0}")]
    EmptyInput(String),

    /// Too few repositories for the operation.
    #[error("Insufficient data: need at least {required} repositories, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Inference was requested before any model was persisted.
    #[error("No trained model available")]
    NoModelAvailable,

    /// A required record field is missing or unparseable.
    #[error("Malformed record '{repository}': {reason}")]
    MalformedRecord { repository: String, reason: String },

    /// Unexpected failure during inference, wrapped with context.
    #[error("Prediction failed: {0}")]
    PredictionFailure(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model fitting failed.
    #[error("Model fitting failed: {0}")]
    FitError(String),

    /// Reading or writing the model store or snapshot files failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GrowthError {
    /// Build a [`GrowthError::MalformedRecord`].
    pub fn malformed(repository: impl Into<String>, reason: impl Into<String>) -> Self {
        GrowthError::MalformedRecord {
            repository: repository.into(),
            reason: reason.into(),
        }
    }

    /// Wrap any error raised during inference as a [`GrowthError::PredictionFailure`].
    ///
    /// Conditions the caller is expected to handle (`NoModelAvailable`,
    /// `MalformedRecord`) pass through unchanged.
    pub fn into_prediction_failure(self, context: &str) -> Self {
        match self {
            GrowthError::NoModelAvailable
            | GrowthError::MalformedRecord { .. }
            | GrowthError::PredictionFailure(_) => self,
            other => GrowthError::PredictionFailure(format!("{}: {}", context, other)),
        }
    }
}

impl From<std::io::Error> for GrowthError {
    fn from(err: std::io::Error) -> Self {
        GrowthError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for GrowthError {
    fn from(err: serde_json::Error) -> Self {
        GrowthError::Storage(err.to_string())
    }
}
