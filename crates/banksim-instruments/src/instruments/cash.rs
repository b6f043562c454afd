//! Cash accounts and demand deposits.

use serde::{Deserialize, Serialize};

/// A cash account.
///
/// The settlement sink of a book: every coupon, interest, and principal
/// payment an instrument makes lands here. Values identically on both
/// book conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashAccount {
    amount: f64,
}

impl CashAccount {
    /// Creates a cash account with an opening balance.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }

    /// Current balance. May be negative; the simulator does not enforce
    /// an overdraft limit.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        "Cash"
    }

    /// Adds to the balance (negative amounts withdraw).
    pub fn credit(&mut self, amount: f64) {
        self.amount += amount;
    }

    /// Replaces the balance.
    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }
}

impl Default for CashAccount {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Non-interest bearing demand deposits.
///
/// The banking book's funding liability. Pays no interest and generates
/// no cash flows; it simply carries at face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandDeposit {
    amount: f64,
}

impl DemandDeposit {
    /// Creates a deposit balance.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }

    /// Current deposit balance.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        "Non-interest bearing"
    }

    /// Adjusts the balance for inflows or outflows.
    pub fn adjust(&mut self, amount: f64) {
        self.amount += amount;
    }
}
