//! Error types for the simulation layer.

use thiserror::Error;

use banksim_books::BookError;
use banksim_core::error::CoreError;
use banksim_curves::CurveError;
use banksim_instruments::InstrumentError;

/// A specialized Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by scenario loading and simulation control.
#[derive(Error, Debug)]
pub enum SimError {
    /// An operation that requires a running simulation was called in
    /// another state.
    #[error("Simulation is {state}, expected Running")]
    NotRunning {
        /// The actual state.
        state: String,
    },

    /// Scenario data is unusable.
    #[error("Scenario error: {reason}")]
    Scenario {
        /// Description of the problem.
        reason: String,
    },

    /// A date or convention error from the core layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A curve construction or query error.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// An instrument construction or valuation error.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// A book placement or aggregation error.
    #[error(transparent)]
    Book(#[from] BookError),
}

impl SimError {
    /// Creates a scenario error.
    #[must_use]
    pub fn scenario(reason: impl Into<String>) -> Self {
        Self::Scenario {
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for SimError {
    fn from(err: csv::Error) -> Self {
        Self::Scenario {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::scenario("missing yield grid header");
        assert!(err.to_string().contains("missing yield grid header"));
    }
}
