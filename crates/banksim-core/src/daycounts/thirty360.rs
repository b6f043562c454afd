//! 30/360 bond basis day count.

use super::DayCount;
use crate::types::Date;

/// 30/360 bond basis (US convention).
///
/// Each month counts as 30 days and each year as 360, with the standard
/// end-of-month adjustments. Annual periods between same-day anniversaries
/// come out to exactly 1.0, which is what makes it the convention of choice
/// for corporate loan schedules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day() as i64;
        let mut d2 = end.day() as i64;

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        360 * (end.year() as i64 - start.year() as i64)
            + 30 * (end.month() as i64 - start.month() as i64)
            + (d2 - d1)
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn name(&self) -> &str {
        "30/360"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_full_year_is_exactly_one() {
        let dc = Thirty360;
        assert_relative_eq!(dc.year_fraction(d(2023, 6, 15), d(2024, 6, 15)), 1.0);
    }

    #[test]
    fn test_half_year() {
        let dc = Thirty360;
        assert_relative_eq!(dc.year_fraction(d(2023, 1, 15), d(2023, 7, 15)), 0.5);
    }

    #[test]
    fn test_month_end_adjustment() {
        let dc = Thirty360;
        // Jan 31 -> Feb 28: d1 adjusted to 30
        assert_eq!(dc.day_count(d(2023, 1, 31), d(2023, 2, 28)), 28);
        // Jan 31 -> Mar 31: both days adjusted to 30
        assert_eq!(dc.day_count(d(2023, 1, 31), d(2023, 3, 31)), 60);
    }

    #[test]
    fn test_february_counts_actual_days() {
        let dc = Thirty360;
        // Feb 28 -> Mar 1 spans 3 "30/360 days"
        assert_eq!(dc.day_count(d(2023, 2, 28), d(2023, 3, 1)), 3);
    }
}
