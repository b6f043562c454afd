//! Flat-rate curve for single-rate discounting.

use banksim_core::daycounts::DayCountConvention;
use banksim_core::types::{Compounding, Frequency};
use banksim_core::Date;

use crate::compounding;
use crate::error::CurveResult;
use crate::traits::Curve;

/// A curve that discounts every horizon at one quoted rate.
///
/// Used by the standalone bond calculator, where the user supplies a
/// single discount rate instead of a bootstrapped curve. Year fractions
/// for dated queries use the instrument's own day count so that, for
/// example, annual 30/360 periods land on whole years exactly.
#[derive(Debug, Clone, Copy)]
pub struct FlatForwardCurve {
    reference_date: Date,
    rate: f64,
    comp: Compounding,
    frequency: Frequency,
    day_count: DayCountConvention,
}

impl FlatForwardCurve {
    /// Creates a flat curve at the given rate.
    #[must_use]
    pub fn new(
        reference_date: Date,
        rate: f64,
        comp: Compounding,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> Self {
        Self {
            reference_date,
            rate,
            comp,
            frequency,
            day_count,
        }
    }

    /// The quoted flat rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The day count used for dated queries.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

impl Curve for FlatForwardCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok(compounding::discount_factor(
            self.rate,
            t,
            self.comp,
            self.frequency,
        ))
    }

    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn max_date(&self) -> Date {
        // A flat rate is valid at any horizon
        Date::from_ymd(9999, 12, 31).unwrap_or(self.reference_date)
    }

    fn year_fraction(&self, date: Date) -> f64 {
        self.day_count.year_fraction(self.reference_date, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_continuous_flat_discounting() {
        let reference = Date::from_ymd(2023, 1, 1).unwrap();
        let curve = FlatForwardCurve::new(
            reference,
            0.05,
            Compounding::Continuous,
            Frequency::Annual,
            DayCountConvention::Thirty360,
        );
        assert_relative_eq!(
            curve.discount_factor(2.0).unwrap(),
            (-0.1f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_dated_query_uses_own_day_count() {
        let reference = Date::from_ymd(2023, 1, 15).unwrap();
        let curve = FlatForwardCurve::new(
            reference,
            0.05,
            Compounding::Continuous,
            Frequency::Annual,
            DayCountConvention::Thirty360,
        );
        // Exactly one 30/360 year later
        let one_year = Date::from_ymd(2024, 1, 15).unwrap();
        assert_relative_eq!(curve.year_fraction(one_year), 1.0, epsilon = 1e-14);
        assert_relative_eq!(
            curve.discount_factor_at(one_year).unwrap(),
            (-0.05f64).exp(),
            epsilon = 1e-14
        );
    }
}
