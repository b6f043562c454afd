//! # Banksim Core
//!
//! Core types, calendars, and day count conventions for the banksim
//! balance-sheet simulator.
//!
//! This crate provides the foundational building blocks used throughout
//! banksim:
//!
//! - **Types**: `Date`, `Frequency`, `Compounding`, `CashFlow`
//! - **Day Count Conventions**: 30/360 bond basis and ACT/ACT ISDA
//! - **Business Day Calendars**: null, weekend-only, and US (NYSE) calendars
//!
//! ## Example
//!
//! ```rust
//! use banksim_core::prelude::*;
//!
//! let start = Date::from_ymd(2023, 1, 15).unwrap();
//! let end = start.add_months(6).unwrap();
//! let yf = Thirty360.year_fraction(start, end);
//! assert!((yf - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, CalendarKind, NullCalendar, UsCalendar, WeekendCalendar,
    };
    pub use crate::daycounts::{ActActIsda, DayCount, DayCountConvention, Thirty360};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CashFlow, CashFlowKind, CashFlowSchedule, Compounding, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
