//! Instrument types and the closed instrument set.

mod bond;
mod cash;
mod loan;

pub use bond::FixedRateBond;
pub use cash::{CashAccount, DemandDeposit};
pub use loan::AmortizingFixedRateLoan;

use serde::{Deserialize, Serialize};
use std::fmt;

use banksim_core::types::CashFlow;
use banksim_core::Date;

use crate::error::InstrumentResult;

/// The instrument categories a balance sheet aggregates by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Cash account (banking book asset).
    Cash,
    /// Non-interest bearing demand deposits (banking book liability).
    DemandDeposit,
    /// Treasury note (2 to 10 year coupon treasury).
    TreasuryNote,
    /// Treasury bond (20 or 30 year coupon treasury).
    TreasuryBond,
    /// Residential mortgage (amortizing, monthly).
    Mortgage,
    /// Commercial and industrial loan (amortizing).
    CommercialLoan,
}

impl InstrumentKind {
    /// Balance-sheet line label for this category.
    #[must_use]
    pub fn category_label(&self) -> &'static str {
        match self {
            InstrumentKind::Cash => "Cash",
            InstrumentKind::DemandDeposit => "Demand Deposits",
            InstrumentKind::TreasuryNote => "Treasury Notes",
            InstrumentKind::TreasuryBond => "Treasury Bonds",
            InstrumentKind::Mortgage => "Mortgages",
            InstrumentKind::CommercialLoan => "C&I Loans",
        }
    }

    /// Returns true for liability-side categories.
    #[must_use]
    pub fn is_liability(&self) -> bool {
        matches!(self, InstrumentKind::DemandDeposit)
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category_label())
    }
}

/// Any instrument the simulator can hold.
///
/// A closed set: the simulation driver, books, and payment routing all
/// match exhaustively on it, so adding an instrument type is a compile
/// error everywhere it matters.
#[derive(Debug, Clone)]
pub enum Instrument {
    /// A cash account.
    Cash(CashAccount),
    /// Non-interest bearing demand deposits.
    DemandDeposit(DemandDeposit),
    /// A fixed rate bullet bond.
    Bond(FixedRateBond),
    /// An amortizing fixed rate loan.
    Loan(AmortizingFixedRateLoan),
}

impl Instrument {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Instrument::Cash(c) => c.name(),
            Instrument::DemandDeposit(d) => d.name(),
            Instrument::Bond(b) => b.name(),
            Instrument::Loan(l) => l.name(),
        }
    }

    /// Aggregation category.
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        match self {
            Instrument::Cash(_) => InstrumentKind::Cash,
            Instrument::DemandDeposit(_) => InstrumentKind::DemandDeposit,
            Instrument::Bond(b) => b.kind(),
            Instrument::Loan(l) => l.kind(),
        }
    }

    /// Held-to-maturity carrying value as of `date`.
    ///
    /// Cash and deposits carry at face. Bullet bonds carry at face until
    /// maturity and zero after. Amortizing loans carry at outstanding
    /// principal. No discounting anywhere.
    #[must_use]
    pub fn value_on_banking_book(&self, date: Date) -> f64 {
        match self {
            Instrument::Cash(c) => c.amount(),
            Instrument::DemandDeposit(d) => d.amount(),
            Instrument::Bond(b) => b.value_on_banking_book(date),
            Instrument::Loan(l) => l.outstanding_on(date),
        }
    }

    /// Mark-to-market value as of `date` on the linked curve.
    ///
    /// Cash and deposits mark at face (they have no future flows to
    /// discount).
    ///
    /// # Errors
    ///
    /// Returns a curve error if the instrument's handle has no linked
    /// curve or the curve query fails.
    pub fn value_on_trading_book(&self, date: Date) -> InstrumentResult<f64> {
        match self {
            Instrument::Cash(c) => Ok(c.amount()),
            Instrument::DemandDeposit(d) => Ok(d.amount()),
            Instrument::Bond(b) => b.value_on_trading_book(date),
            Instrument::Loan(l) => l.value_on_trading_book(date),
        }
    }

    /// Cash flows falling in the half-open window `(start, end]`.
    #[must_use]
    pub fn payments_due(&self, start: Date, end: Date) -> Vec<CashFlow> {
        match self {
            Instrument::Cash(_) | Instrument::DemandDeposit(_) => Vec::new(),
            Instrument::Bond(b) => b.schedule().due_in(start, end).copied().collect(),
            Instrument::Loan(l) => l.schedule().due_in(start, end).copied().collect(),
        }
    }

    /// Maturity date, for instruments that have one.
    #[must_use]
    pub fn maturity(&self) -> Option<Date> {
        match self {
            Instrument::Cash(_) | Instrument::DemandDeposit(_) => None,
            Instrument::Bond(b) => Some(b.maturity()),
            Instrument::Loan(l) => Some(l.maturity()),
        }
    }

    /// Returns true once the instrument has no cash flows after `date`.
    #[must_use]
    pub fn is_matured(&self, date: Date) -> bool {
        self.maturity().is_some_and(|m| m <= date)
    }
}
