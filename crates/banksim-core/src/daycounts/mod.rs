//! Day count conventions for accrual and year fractions.

mod actact;
mod thirty360;

pub use actact::ActActIsda;
pub use thirty360::Thirty360;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Date;

/// A day count convention.
///
/// Converts a date interval into a year fraction for interest accrual
/// and rate compounding.
pub trait DayCount: Send + Sync {
    /// Returns the number of days between two dates per this convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Returns the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Convention name for display and diagnostics.
    fn name(&self) -> &str;
}

/// Serializable day count selector for configuration and scenario files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// 30/360 bond basis
    Thirty360,
    /// Actual/Actual ISDA
    #[default]
    ActActIsda,
}

impl DayCountConvention {
    /// Instantiates the selected day count.
    #[must_use]
    pub fn day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Thirty360 => Box::new(Thirty360),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
        }
    }

    /// Returns the year fraction between two dates per this convention.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Thirty360 => Thirty360.year_fraction(start, end),
            DayCountConvention::ActActIsda => ActActIsda.year_fraction(start, end),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::ActActIsda => "Act/Act ISDA",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "30/360" | "30e/360" | "thirty360" | "bond basis" => Ok(DayCountConvention::Thirty360),
            "act/act" | "act/act isda" | "actual/actual" | "actactisda" => {
                Ok(DayCountConvention::ActActIsda)
            }
            _ => Err(CoreError::unknown_convention("day count", s)),
        }
    }
}
