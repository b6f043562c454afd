//! Actual/Actual ISDA day count.

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA.
///
/// Counts actual calendar days, splitting the interval at year boundaries
/// so each calendar year's days are divided by that year's length (365 or
/// 366). The treasury accrual convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start == end {
            return 0.0;
        }
        if start > end {
            return -self.year_fraction(end, start);
        }

        if start.year() == end.year() {
            return start.days_between(&end) as f64 / f64::from(start.days_in_year());
        }

        // Split at January 1 boundaries
        let mut fraction = 0.0;

        let first_year_end = Date::from_ymd(start.year() + 1, 1, 1)
            .unwrap_or_else(|_| unreachable!("January 1 always exists"));
        fraction += start.days_between(&first_year_end) as f64 / f64::from(start.days_in_year());

        fraction += f64::from(end.year() - start.year() - 1);

        let last_year_start = Date::from_ymd(end.year(), 1, 1)
            .unwrap_or_else(|_| unreachable!("January 1 always exists"));
        fraction += last_year_start.days_between(&end) as f64 / f64::from(end.days_in_year());

        fraction
    }

    fn name(&self) -> &str {
        "Act/Act ISDA"
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
    fn test_same_year() {
        let dc = ActActIsda;
        // 181 days in a 365-day year
        assert_relative_eq!(
            dc.year_fraction(d(2023, 1, 1), d(2023, 7, 1)),
            181.0 / 365.0
        );
    }

    #[test]
    fn test_spans_leap_year_boundary() {
        let dc = ActActIsda;
        // Dec 1 2023 to Feb 1 2024: 31/365 + 31/366
        assert_relative_eq!(
            dc.year_fraction(d(2023, 12, 1), d(2024, 2, 1)),
            31.0 / 365.0 + 31.0 / 366.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_multi_year() {
        let dc = ActActIsda;
        // Whole calendar years count as exactly 1 each
        assert_relative_eq!(
            dc.year_fraction(d(2021, 1, 1), d(2024, 1, 1)),
            3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_and_negative() {
        let dc = ActActIsda;
        assert_eq!(dc.year_fraction(d(2023, 5, 1), d(2023, 5, 1)), 0.0);
        assert!(dc.year_fraction(d(2023, 7, 1), d(2023, 1, 1)) < 0.0);
    }
}
