//! US government bond market calendar.

use chrono::Weekday;

use super::Calendar;
use crate::types::Date;

/// US federal holiday calendar used by the government bond market.
///
/// Covers weekends plus the federal holidays, with Saturday holidays
/// observed on the preceding Friday and Sunday holidays on the
/// following Monday.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsCalendar;

impl UsCalendar {
    fn is_fixed_holiday(date: Date) -> bool {
        let (m, d) = (date.month(), date.day());
        let wd = date.weekday();

        // New Year's Day (Jan 1, or Mon Jan 2 when Jan 1 is a Sunday)
        if m == 1 && (d == 1 || (d == 2 && wd == Weekday::Mon)) {
            return true;
        }
        // Juneteenth (from 2022) and Independence Day, with observation shifts
        for (month, day, from_year) in [(6u32, 19u32, 2022), (7, 4, 0), (11, 11, 0), (12, 25, 0)] {
            if date.year() < from_year {
                continue;
            }
            if m == month
                && ((d == day && wd != Weekday::Sat && wd != Weekday::Sun)
                    || (d == day + 1 && wd == Weekday::Mon)
                    || (d + 1 == day && wd == Weekday::Fri))
            {
                return true;
            }
        }
        false
    }

    fn is_floating_holiday(date: Date) -> bool {
        let (m, d) = (date.month(), date.day());
        let wd = date.weekday();

        match m {
            // Martin Luther King Jr. Day: third Monday of January
            1 => wd == Weekday::Mon && (15..=21).contains(&d),
            // Presidents' Day: third Monday of February
            2 => wd == Weekday::Mon && (15..=21).contains(&d),
            // Memorial Day: last Monday of May
            5 => wd == Weekday::Mon && d >= 25,
            // Labor Day: first Monday of September
            9 => wd == Weekday::Mon && d <= 7,
            // Columbus Day: second Monday of October
            10 => wd == Weekday::Mon && (8..=14).contains(&d),
            // Thanksgiving: fourth Thursday of November
            11 => wd == Weekday::Thu && (22..=28).contains(&d),
            _ => false,
        }
    }
}

impl Calendar for UsCalendar {
    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !Self::is_fixed_holiday(date) && !Self::is_floating_holiday(date)
    }

    fn name(&self) -> &str {
        "United States"
    }
}
