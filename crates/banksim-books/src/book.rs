//! Banking and trading books.

use serde::{Deserialize, Serialize};
use std::fmt;

use banksim_core::Date;
use banksim_instruments::{CashAccount, Instrument, InstrumentKind};

use crate::error::{BookError, BookResult};

/// Which valuation convention a book applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookKind {
    /// Held-to-maturity carrying values, no discounting.
    Banking,
    /// Mark-to-market on the linked curve, long and short.
    Trading,
}

impl fmt::Display for BookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookKind::Banking => write!(f, "Banking"),
            BookKind::Trading => write!(f, "Trading"),
        }
    }
}

/// Direction of a trading position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Side {
    /// Owned position; payments flow in.
    #[default]
    Long,
    /// Borrowed-and-sold position; payments flow out.
    Short,
}

/// An instrument held on a book with its direction.
#[derive(Debug, Clone)]
pub struct Position {
    instrument: Instrument,
    side: Side,
}

impl Position {
    /// The held instrument.
    #[must_use]
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Long or short.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }
}

/// A book of positions with a single cash settlement account.
///
/// All cash offered to a book merges into one account, so there is
/// never more than one cash line per book. Instrument payments settle
/// into that account with the position's sign: long positions collect,
/// short positions pay away.
#[derive(Debug, Clone)]
pub struct Book {
    kind: BookKind,
    cash: CashAccount,
    positions: Vec<Position>,
}

impl Book {
    /// Creates an empty book.
    #[must_use]
    pub fn new(kind: BookKind) -> Self {
        Self {
            kind,
            cash: CashAccount::default(),
            positions: Vec::new(),
        }
    }

    /// The book's valuation convention.
    #[must_use]
    pub fn kind(&self) -> BookKind {
        self.kind
    }

    /// The settlement cash balance.
    #[must_use]
    pub fn cash_amount(&self) -> f64 {
        self.cash.amount()
    }

    /// Credits (or, with a negative amount, debits) the cash account.
    pub fn credit_cash(&mut self, amount: f64) {
        self.cash.credit(amount);
    }

    /// Replaces the cash balance.
    pub fn set_cash(&mut self, amount: f64) {
        self.cash.set_amount(amount);
    }

    /// The held positions, cash excluded.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Adds an instrument to the book.
    ///
    /// Cash instruments merge into the book's cash account regardless of
    /// side. Short positions only exist on the trading book, and demand
    /// deposits only on the banking book.
    ///
    /// # Errors
    ///
    /// Returns `BookError::Misplaced` for a short position on the
    /// banking book or deposits on the trading book.
    pub fn add(&mut self, instrument: Instrument, side: Side) -> BookResult<()> {
        if self.kind == BookKind::Banking && side == Side::Short {
            return Err(BookError::Misplaced {
                instrument: instrument.name().to_string(),
                book: self.kind.to_string(),
                reason: "banking book positions are always long".to_string(),
            });
        }
        if self.kind == BookKind::Trading && instrument.kind() == InstrumentKind::DemandDeposit {
            return Err(BookError::Misplaced {
                instrument: instrument.name().to_string(),
                book: self.kind.to_string(),
                reason: "deposits fund the banking book".to_string(),
            });
        }

        match instrument {
            Instrument::Cash(cash) => {
                // Cash-merge invariant: one cash line per book
                self.cash.credit(cash.amount());
            }
            other => self.positions.push(Position {
                instrument: other,
                side,
            }),
        }
        Ok(())
    }

    /// Clears every position and zeroes the cash account.
    pub fn reset(&mut self) {
        self.cash.set_amount(0.0);
        self.positions.clear();
    }

    /// Signed total of position cash flows falling due in the half-open
    /// window `(start, end]`.
    ///
    /// Short positions contribute negatively. The book's cash is not
    /// touched; settlement cash routing is the bank's job, since every
    /// payment lands in the banking book's cash account regardless of
    /// which book holds the position.
    #[must_use]
    pub fn flows_due(&self, start: Date, end: Date) -> f64 {
        let mut total = 0.0;
        for position in &self.positions {
            let sign = match position.side {
                Side::Long => 1.0,
                Side::Short => -1.0,
            };
            for cf in position.instrument.payments_due(start, end) {
                total += sign * cf.amount();
            }
        }
        total
    }

    /// Value of a position under this book's convention.
    ///
    /// # Errors
    ///
    /// Returns a valuation error if a trading-book mark fails.
    pub fn position_value(&self, position: &Position, date: Date) -> BookResult<f64> {
        match self.kind {
            BookKind::Banking => Ok(position.instrument.value_on_banking_book(date)),
            BookKind::Trading => position
                .instrument
                .value_on_trading_book(date)
                .map_err(|e| BookError::valuation(position.instrument.name(), e)),
        }
    }

    /// Total asset-side value: cash plus long non-liability positions.
    ///
    /// # Errors
    ///
    /// Propagates valuation errors.
    pub fn total_assets(&self, date: Date) -> BookResult<f64> {
        let mut total = self.cash.amount();
        for position in &self.positions {
            if position.side == Side::Long && !position.instrument.kind().is_liability() {
                total += self.position_value(position, date)?;
            }
        }
        Ok(total)
    }

    /// Total liability-side value: deposits plus short positions.
    ///
    /// # Errors
    ///
    /// Propagates valuation errors.
    pub fn total_liabilities(&self, date: Date) -> BookResult<f64> {
        let mut total = 0.0;
        for position in &self.positions {
            if position.instrument.kind().is_liability() || position.side == Side::Short {
                total += self.position_value(position, date)?;
            }
        }
        Ok(total)
    }
}
