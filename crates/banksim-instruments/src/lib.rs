//! # Banksim Instruments
//!
//! Balance-sheet instruments for the banksim simulator: cash accounts,
//! demand deposits, fixed rate (treasury-style) bonds, and amortizing
//! fixed rate loans.
//!
//! Every instrument exposes two valuations:
//!
//! - **banking book**: held-to-maturity carrying value (outstanding
//!   notional, no discounting)
//! - **trading book**: mark-to-market present value of the remaining
//!   cash flows on the instrument's linked discount curve
//!
//! Instruments generate their payment schedules once at construction.
//! Repricing happens purely by relinking the shared [`CurveHandle`]
//! they were built with.
//!
//! [`CurveHandle`]: banksim_curves::CurveHandle

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod factory;
pub mod instruments;
pub mod pricing;
pub mod schedule;

pub use error::{InstrumentError, InstrumentResult};
pub use factory::InstrumentFactory;
pub use instruments::{
    AmortizingFixedRateLoan, CashAccount, DemandDeposit, FixedRateBond, Instrument, InstrumentKind,
};
pub use schedule::{DateGeneration, PeriodSchedule};
