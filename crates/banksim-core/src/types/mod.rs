//! Core value types.

mod cashflow;
mod date;
mod frequency;

pub use cashflow::{CashFlow, CashFlowKind, CashFlowSchedule};
pub use date::Date;
pub use frequency::{Compounding, Frequency};
