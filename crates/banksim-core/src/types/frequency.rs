//! Payment frequency and compounding types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Payment frequency for coupon bonds and amortizing loans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - the treasury default
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year) - the mortgage default
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    /// Parses a frequency from scenario-row text.
    ///
    /// Accepts the enum names plus the lowercase row labels used by
    /// scenario tables ("monthly", "quarterly", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "yearly" => Ok(Frequency::Annual),
            "semiannual" | "semi-annual" | "semi annual" => Ok(Frequency::SemiAnnual),
            "quarterly" => Ok(Frequency::Quarterly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(CoreError::unknown_convention("frequency", s)),
        }
    }
}

/// Interest compounding convention for rate quotes and curve queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Simple interest (no compounding)
    Simple,
    /// Compounded at a given frequency per year
    #[default]
    Compounded,
    /// Continuous compounding
    Continuous,
}

impl Compounding {
    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Compounding::Continuous)
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Simple => "Simple",
            Compounding::Compounded => "Compounded",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_periods() {
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
        assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
        assert_eq!(Frequency::Monthly.periods_per_year(), 12);
    }

    #[test]
    fn test_months_per_period() {
        assert_eq!(Frequency::SemiAnnual.months_per_period(), 6);
        assert_eq!(Frequency::Monthly.months_per_period(), 1);
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!(
            "Quarterly".parse::<Frequency>().unwrap(),
            Frequency::Quarterly
        );
        assert!("weekly".parse::<Frequency>().is_err());
    }
}
