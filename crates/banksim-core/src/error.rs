//! Error types shared across the banksim crates.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core date, calendar, and day count operations.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Unknown calendar, day count, or frequency selection.
    ///
    /// Rejected at configuration time, before any valuation runs.
    #[error("Unknown {kind}: '{value}'")]
    UnknownConvention {
        /// What was being selected (calendar, day count, frequency).
        kind: &'static str,
        /// The offending input.
        value: String,
    },

    /// Invalid cash flow schedule.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the invalid cash flow.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unknown-convention error.
    #[must_use]
    pub fn unknown_convention(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownConvention {
            kind,
            value: value.into(),
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cash_flow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }
}
