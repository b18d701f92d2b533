//! Indicator error types

use thiserror::Error;

/// Errors raised while computing an indicator.
///
/// Every indicator validates its own input, so one failing indicator never
/// affects the others computed over the same series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// The series is shorter than the indicator's window(s) require
    #[error("{indicator}: insufficient data, need {required} points, got {actual}")]
    InsufficientData {
        /// Indicator that rejected the input.
        indicator: String,
        /// Minimum number of points.
        required: usize,
        /// Number of points provided.
        actual: usize,
    },

    /// Values that break the math (non-positive, non-finite, misaligned)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Window lengths or thresholds that cannot produce a result
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl IndicatorError {
    /// Creates an `InsufficientData` error.
    #[must_use]
    pub fn insufficient(indicator: impl Into<String>, required: usize, actual: usize) -> Self {
        IndicatorError::InsufficientData {
            indicator: indicator.into(),
            required,
            actual,
        }
    }

    /// Creates an `InvalidInput` error with a message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        IndicatorError::InvalidInput(msg.into())
    }

    /// Creates an `InvalidParams` error with a message.
    #[must_use]
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        IndicatorError::InvalidParams(msg.into())
    }

    /// True for the "not enough history yet" case.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, IndicatorError::InsufficientData { .. })
    }
}
