//! Holiday calendars and business day adjustment.

mod conventions;
mod us_calendar;

pub use conventions::BusinessDayConvention;
pub use us_calendar::UsCalendar;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Date;

/// A holiday calendar.
///
/// Determines which dates are business days so payment dates can be
/// adjusted away from weekends and holidays.
pub trait Calendar: Send + Sync {
    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday (including weekends).
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Calendar name for display and diagnostics.
    fn name(&self) -> &str;

    /// Adjusts a date per the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => {
                let mut d = date;
                while !self.is_business_day(d) {
                    d = d.add_days(1);
                }
                d
            }
            BusinessDayConvention::ModifiedFollowing => {
                let mut d = date;
                while !self.is_business_day(d) {
                    d = d.add_days(1);
                }
                if d.month() != date.month() {
                    // Rolled into the next month; back up instead
                    d = date;
                    while !self.is_business_day(d) {
                        d = d.add_days(-1);
                    }
                }
                d
            }
            BusinessDayConvention::Preceding => {
                let mut d = date;
                while !self.is_business_day(d) {
                    d = d.add_days(-1);
                }
                d
            }
        }
    }

    /// Advances a date by a number of business days.
    fn advance(&self, date: Date, business_days: i64) -> Date {
        let step = if business_days >= 0 { 1 } else { -1 };
        let mut remaining = business_days.abs();
        let mut d = date;
        while remaining > 0 {
            d = d.add_days(step);
            if self.is_business_day(d) {
                remaining -= 1;
            }
        }
        d
    }
}

/// A calendar with no holidays; every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn is_business_day(&self, _date: Date) -> bool {
        true
    }

    fn name(&self) -> &str {
        "Null"
    }
}

/// A calendar where only weekends are holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }

    fn name(&self) -> &str {
        "Weekend"
    }
}

/// Serializable calendar selector for configuration and scenario files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarKind {
    /// No holidays
    Null,
    /// Weekends only
    Weekend,
    /// US government bond market calendar
    #[default]
    UnitedStates,
}

impl CalendarKind {
    /// Instantiates the selected calendar.
    #[must_use]
    pub fn calendar(&self) -> Box<dyn Calendar> {
        match self {
            CalendarKind::Null => Box::new(NullCalendar),
            CalendarKind::Weekend => Box::new(WeekendCalendar),
            CalendarKind::UnitedStates => Box::new(UsCalendar),
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarKind::Null => "Null",
            CalendarKind::Weekend => "Weekend",
            CalendarKind::UnitedStates => "United States",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CalendarKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" | "none" => Ok(CalendarKind::Null),
            "weekend" | "weekends" => Ok(CalendarKind::Weekend),
            "us" | "united states" | "unitedstates" => Ok(CalendarKind::UnitedStates),
            _ => Err(CoreError::unknown_convention("calendar", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_null_calendar_all_business_days() {
        let cal = NullCalendar;
        assert!(cal.is_business_day(d(2023, 1, 7))); // Saturday
        assert!(cal.is_business_day(d(2023, 1, 9)));
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(!cal.is_business_day(d(2023, 1, 7))); // Saturday
        assert!(!cal.is_business_day(d(2023, 1, 8))); // Sunday
        assert!(cal.is_business_day(d(2023, 1, 9))); // Monday
    }

    #[test]
    fn test_following_adjustment() {
        let cal = WeekendCalendar;
        let sat = d(2023, 1, 7);
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Following), d(2023, 1, 9));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Unadjusted), sat);
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Preceding), d(2023, 1, 6));
    }

    #[test]
    fn test_modified_following_stays_in_month() {
        let cal = WeekendCalendar;
        // Sat 2023-09-30 is month end; Following would cross into October
        let month_end = d(2023, 9, 30);
        assert_eq!(
            cal.adjust(month_end, BusinessDayConvention::ModifiedFollowing),
            d(2023, 9, 29)
        );
    }

    #[test]
    fn test_advance_business_days() {
        let cal = WeekendCalendar;
        // Friday + 1 business day = Monday
        assert_eq!(cal.advance(d(2023, 1, 6), 1), d(2023, 1, 9));
        assert_eq!(cal.advance(d(2023, 1, 9), -1), d(2023, 1, 6));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("us".parse::<CalendarKind>().unwrap(), CalendarKind::UnitedStates);
        assert!("mars".parse::<CalendarKind>().is_err());
    }
}
