//! Error types for instrument construction and valuation.

use thiserror::Error;

use banksim_core::error::CoreError;
use banksim_curves::CurveError;

/// A specialized Result type for instrument operations.
pub type InstrumentResult<T> = Result<T, InstrumentError>;

/// Errors raised by instrument construction and valuation.
#[derive(Error, Debug, Clone)]
pub enum InstrumentError {
    /// Instrument terms are unusable.
    #[error("Invalid terms for {name}: {reason}")]
    InvalidTerms {
        /// Instrument name or description.
        name: String,
        /// What is wrong with the terms.
        reason: String,
    },

    /// A date or convention error from the core layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A curve error during valuation, including unlinked handles.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl InstrumentError {
    /// Creates an invalid-terms error.
    #[must_use]
    pub fn invalid_terms(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTerms {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InstrumentError::invalid_terms("4.00% 2033-05-15", "zero face value");
        assert!(err.to_string().contains("4.00% 2033-05-15"));
    }
}
