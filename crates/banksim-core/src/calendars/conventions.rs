//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Rule for moving a payment date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment; keep the date as generated.
    Unadjusted,
    /// Move forward to the next business day.
    #[default]
    Following,
    /// Move forward, unless that crosses a month boundary, then move back.
    ModifiedFollowing,
    /// Move back to the previous business day.
    Preceding,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unadjusted" | "none" => Ok(BusinessDayConvention::Unadjusted),
            "following" => Ok(BusinessDayConvention::Following),
            "modified following" | "modifiedfollowing" => {
                Ok(BusinessDayConvention::ModifiedFollowing)
            }
            "preceding" => Ok(BusinessDayConvention::Preceding),
            _ => Err(CoreError::unknown_convention("business day convention", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            "following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::Following
        );
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert!("rolling".parse::<BusinessDayConvention>().is_err());
    }

    #[test]
    fn test_default_is_following() {
        assert_eq!(
            BusinessDayConvention::default(),
            BusinessDayConvention::Following
        );
    }
}
