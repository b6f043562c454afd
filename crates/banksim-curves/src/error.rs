//! Error types for curve operations.

use banksim_core::Date;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve construction and queries.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Curve bootstrapping failed to converge on a pillar.
    #[error("Bootstrap failed at pillar {pillar}: {message}")]
    BootstrapFailure {
        /// Maturity date of the offending pillar.
        pillar: Date,
        /// Description of the failure.
        message: String,
    },

    /// Not enough quotes to build a curve.
    #[error("Insufficient quotes: need at least {required}, got {got}")]
    InsufficientQuotes {
        /// Minimum required quotes.
        required: usize,
        /// Actual number of quotes provided.
        got: usize,
    },

    /// Pillar dates are not strictly increasing past the reference date.
    #[error("Non-monotonic pillar at {date}: must follow {prev}")]
    NonMonotonicPillar {
        /// The offending pillar date.
        date: Date,
        /// The date it must follow.
        prev: Date,
    },

    /// A quote or pillar value is unusable.
    #[error("Invalid quote for {date}: {reason}")]
    InvalidQuote {
        /// The quote's maturity date.
        date: Date,
        /// Description of the problem.
        reason: String,
    },

    /// Interpolation failed.
    #[error("Interpolation error: {reason}")]
    Interpolation {
        /// Description of the interpolation error.
        reason: String,
    },

    /// No curve is linked to a handle that was queried.
    #[error("No curve linked to handle")]
    NotLinked,
}

impl CurveError {
    /// Creates a bootstrap failure error.
    #[must_use]
    pub fn bootstrap_failure(pillar: Date, message: impl Into<String>) -> Self {
        Self::BootstrapFailure {
            pillar,
            message: message.into(),
        }
    }

    /// Creates an invalid quote error.
    #[must_use]
    pub fn invalid_quote(date: Date, reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            date,
            reason: reason.into(),
        }
    }
}

impl From<banksim_math::MathError> for CurveError {
    fn from(err: banksim_math::MathError) -> Self {
        Self::Interpolation {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let date = Date::from_ymd(2033, 5, 15).unwrap();
        let err = CurveError::bootstrap_failure(date, "no bracket");
        assert!(err.to_string().contains("2033-05-15"));
    }
}
