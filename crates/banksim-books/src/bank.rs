//! The bank entity.

use banksim_core::Date;

use crate::book::{Book, BookKind};
use crate::error::BookResult;

/// A bank: one banking book, one trading book, and common equity.
///
/// Equity is a plain scalar, not an instrument; it reports alongside
/// the liabilities but generates no cash flows and never revalues.
#[derive(Debug, Clone)]
pub struct Bank {
    banking_book: Book,
    trading_book: Book,
    common_equity: f64,
}

impl Bank {
    /// Creates a bank with empty books and the given equity.
    #[must_use]
    pub fn new(common_equity: f64) -> Self {
        Self {
            banking_book: Book::new(BookKind::Banking),
            trading_book: Book::new(BookKind::Trading),
            common_equity,
        }
    }

    /// The banking book.
    #[must_use]
    pub fn banking_book(&self) -> &Book {
        &self.banking_book
    }

    /// Mutable banking book.
    pub fn banking_book_mut(&mut self) -> &mut Book {
        &mut self.banking_book
    }

    /// The trading book.
    #[must_use]
    pub fn trading_book(&self) -> &Book {
        &self.trading_book
    }

    /// Mutable trading book.
    pub fn trading_book_mut(&mut self) -> &mut Book {
        &mut self.trading_book
    }

    /// Common equity.
    #[must_use]
    pub fn common_equity(&self) -> f64 {
        self.common_equity
    }

    /// Sets common equity.
    pub fn set_common_equity(&mut self, equity: f64) {
        self.common_equity = equity;
    }

    /// Settles both books' cash flows due in `(start, end]` into the
    /// banking book's cash account.
    ///
    /// All payments move real money through the bank's single cash
    /// account, so coupon and amortization receipts land in banking
    /// cash even when the position sits on the trading book; shorts
    /// contribute negatively. Returns the (banking, trading) flow
    /// totals.
    pub fn settle_window(&mut self, start: Date, end: Date) -> (f64, f64) {
        let banking = self.banking_book.flows_due(start, end);
        let trading = self.trading_book.flows_due(start, end);
        self.banking_book.credit_cash(banking + trading);
        (banking, trading)
    }

    /// Combined assets across both books as of `date`.
    ///
    /// # Errors
    ///
    /// Propagates valuation errors.
    pub fn total_assets(&self, date: Date) -> BookResult<f64> {
        Ok(self.banking_book.total_assets(date)? + self.trading_book.total_assets(date)?)
    }

    /// Combined liabilities across both books as of `date`, equity
    /// excluded.
    ///
    /// # Errors
    ///
    /// Propagates valuation errors.
    pub fn total_liabilities(&self, date: Date) -> BookResult<f64> {
        Ok(self.banking_book.total_liabilities(date)? + self.trading_book.total_liabilities(date)?)
    }
}
