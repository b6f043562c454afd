//! Error types for book operations.

use thiserror::Error;

use banksim_instruments::InstrumentError;

/// A specialized Result type for book operations.
pub type BookResult<T> = Result<T, BookError>;

/// Errors raised by book and aggregation operations.
#[derive(Error, Debug, Clone)]
pub enum BookError {
    /// A valuation failed while rolling up a book.
    #[error("Valuation failed for '{instrument}': {source}")]
    Valuation {
        /// The instrument that failed to value.
        instrument: String,
        /// The underlying instrument error.
        source: InstrumentError,
    },

    /// An instrument was placed on a book that cannot hold it.
    #[error("{instrument} cannot be held on the {book} book: {reason}")]
    Misplaced {
        /// The instrument's name.
        instrument: String,
        /// The book it was offered to.
        book: String,
        /// Why the placement is invalid.
        reason: String,
    },
}

impl BookError {
    /// Creates a valuation error.
    #[must_use]
    pub fn valuation(instrument: impl Into<String>, source: InstrumentError) -> Self {
        Self::Valuation {
            instrument: instrument.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookError::valuation(
            "4.00% 2033-03-01",
            InstrumentError::invalid_terms("4.00% 2033-03-01", "test"),
        );
        assert!(err.to_string().contains("4.00% 2033-03-01"));
    }
}
