//! Standalone bond and loan pricing at a quoted flat rate.
//!
//! The calculator path: price a single bond or loan from a
//! user-supplied discount rate without bootstrapping a curve. Year
//! fractions follow the instrument's day count so whole coupon periods
//! discount at whole period times.

use banksim_core::daycounts::DayCountConvention;
use banksim_core::types::{CashFlowKind, Compounding, Frequency};
use banksim_core::Date;
use banksim_curves::{Curve, FlatForwardCurve};

use crate::error::InstrumentResult;
use crate::instruments::{AmortizingFixedRateLoan, FixedRateBond};

/// Present value of the bond's remaining cash flows at a flat rate.
///
/// Flows dated on or before `settlement` are excluded.
///
/// # Errors
///
/// Propagates curve query errors (none occur for a flat curve in
/// practice, but the signature matches curve-based valuation).
pub fn npv(
    bond: &FixedRateBond,
    settlement: Date,
    rate: f64,
    comp: Compounding,
    frequency: Frequency,
) -> InstrumentResult<f64> {
    let curve = FlatForwardCurve::new(settlement, rate, comp, frequency, bond.day_count());
    let mut pv = 0.0;
    for cf in bond.schedule().iter().filter(|cf| cf.date() > settlement) {
        pv += cf.amount() * curve.discount_factor_at(cf.date())?;
    }
    Ok(pv)
}

/// Dirty price per 100 face at a flat rate.
///
/// # Errors
///
/// Propagates curve query errors.
pub fn dirty_price(
    bond: &FixedRateBond,
    settlement: Date,
    rate: f64,
    comp: Compounding,
    frequency: Frequency,
) -> InstrumentResult<f64> {
    Ok(npv(bond, settlement, rate, comp, frequency)? / bond.face_value() * 100.0)
}

/// Clean price per 100 face at a flat rate.
///
/// # Errors
///
/// Propagates curve query errors.
pub fn clean_price(
    bond: &FixedRateBond,
    settlement: Date,
    rate: f64,
    comp: Compounding,
    frequency: Frequency,
) -> InstrumentResult<f64> {
    let dirty = dirty_price(bond, settlement, rate, comp, frequency)?;
    Ok(dirty - accrued_interest(bond, settlement) / bond.face_value() * 100.0)
}

/// Coupon interest accrued from the current period start to settlement.
///
/// Zero outside the bond's accrual span (before issue or at/after the
/// final accrual end).
#[must_use]
pub fn accrued_interest(bond: &FixedRateBond, settlement: Date) -> f64 {
    for cf in bond.schedule().iter() {
        if cf.kind() == CashFlowKind::Coupon || cf.kind() == CashFlowKind::CouponAndPrincipal {
            let (Some(start), Some(end)) = (cf.accrual_start(), cf.accrual_end()) else {
                continue;
            };
            if settlement >= start && settlement < end {
                return bond.face_value()
                    * bond.coupon_rate()
                    * bond.day_count().year_fraction(start, settlement);
            }
        }
    }
    0.0
}

/// Present value of the loan's remaining payments at a flat rate.
///
/// Both the interest and principal portions of each payment discount on
/// a 30/360 time axis, so regular monthly periods land at exact twelfths
/// of a year.
///
/// # Errors
///
/// Propagates curve query errors.
pub fn loan_npv(
    loan: &AmortizingFixedRateLoan,
    settlement: Date,
    rate: f64,
    comp: Compounding,
    frequency: Frequency,
) -> InstrumentResult<f64> {
    let curve = FlatForwardCurve::new(
        settlement,
        rate,
        comp,
        frequency,
        DayCountConvention::Thirty360,
    );
    let mut pv = 0.0;
    for cf in loan.schedule().iter().filter(|cf| cf.date() > settlement) {
        pv += cf.amount() * curve.discount_factor_at(cf.date())?;
    }
    Ok(pv)
}

/// Interest accrued on the loan's running balance from the current
/// period start to settlement.
///
/// The period's interest flow is prorated by elapsed 30/360 time. Zero
/// outside the loan's accrual span.
#[must_use]
pub fn loan_accrued_interest(loan: &AmortizingFixedRateLoan, settlement: Date) -> f64 {
    let dc = DayCountConvention::Thirty360;
    for cf in loan.schedule().iter() {
        if cf.kind() != CashFlowKind::Interest {
            continue;
        }
        let (Some(start), Some(end)) = (cf.accrual_start(), cf.accrual_end()) else {
            continue;
        };
        if settlement >= start && settlement < end {
            let period = dc.year_fraction(start, end);
            if period <= 0.0 {
                return 0.0;
            }
            return cf.amount() * dc.year_fraction(start, settlement) / period;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use banksim_core::calendars::{BusinessDayConvention, CalendarKind};
    use banksim_curves::CurveHandle;

    use crate::instruments::InstrumentKind;
    use crate::schedule::DateGeneration;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    /// 10-year 8% annual-pay bond on 5mm face, 30/360.
    fn sample_bond() -> FixedRateBond {
        FixedRateBond::new(
            InstrumentKind::TreasuryBond,
            5_000_000.0,
            0.08,
            d(2023, 1, 15),
            d(2033, 1, 15),
            Frequency::Annual,
            0,
            DayCountConvention::Thirty360,
            CalendarKind::Null,
            BusinessDayConvention::Unadjusted,
            DateGeneration::Backward,
            CurveHandle::new(),
        )
        .unwrap()
    }

    /// 1-year 6% monthly amortizer on 120k.
    fn sample_loan() -> AmortizingFixedRateLoan {
        AmortizingFixedRateLoan::new(
            InstrumentKind::CommercialLoan,
            120_000.0,
            0.06,
            d(2023, 1, 15),
            d(2024, 1, 15),
            Frequency::Monthly,
            CalendarKind::Null,
            BusinessDayConvention::Unadjusted,
            CurveHandle::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_npv_at_flat_continuous_rate() {
        let bond = sample_bond();
        let settlement = d(2023, 1, 15);

        let pv = npv(
            &bond,
            settlement,
            0.05,
            Compounding::Continuous,
            Frequency::Annual,
        )
        .unwrap();

        // 30/360 annual periods discount at whole years exactly
        let mut expected = 0.0;
        for t in 1..=10 {
            expected += 400_000.0 * (-0.05 * f64::from(t)).exp();
        }
        expected += 5_000_000.0 * (-0.5f64).exp();

        assert_relative_eq!(pv, expected, max_relative = 1e-3);
    }

    #[test]
    fn test_par_bond_prices_at_par() {
        let bond = sample_bond();
        let price = dirty_price(
            &bond,
            d(2023, 1, 15),
            0.08,
            Compounding::Compounded,
            Frequency::Annual,
        )
        .unwrap();
        // Annual 8% coupon discounted at annual 8% is par at issue
        assert_relative_eq!(price, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_accrued_interest_mid_period() {
        let bond = sample_bond();
        // Half a 30/360 year into the first period
        let accrued = accrued_interest(&bond, d(2023, 7, 15));
        assert_relative_eq!(accrued, 5_000_000.0 * 0.08 * 0.5, epsilon = 1e-6);

        // Outside the accrual span
        assert_eq!(accrued_interest(&bond, d(2022, 12, 1)), 0.0);
        assert_eq!(accrued_interest(&bond, d(2033, 1, 15)), 0.0);
    }

    #[test]
    fn test_loan_at_its_own_rate_prices_at_principal() {
        let loan = sample_loan();
        // A level annuity discounted at its own monthly-compounded rate
        // is worth exactly the outstanding principal
        let pv = loan_npv(
            &loan,
            d(2023, 1, 15),
            0.06,
            Compounding::Compounded,
            Frequency::Monthly,
        )
        .unwrap();
        assert_relative_eq!(pv, 120_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_loan_value_falls_as_rate_rises() {
        let loan = sample_loan();
        let settlement = d(2023, 1, 15);
        let cheap = loan_npv(&loan, settlement, 0.09, Compounding::Compounded, Frequency::Monthly)
            .unwrap();
        let rich = loan_npv(&loan, settlement, 0.03, Compounding::Compounded, Frequency::Monthly)
            .unwrap();
        assert!(cheap < 120_000.0 && 120_000.0 < rich);
    }

    #[test]
    fn test_loan_accrued_interest_mid_period() {
        let loan = sample_loan();
        // First month's interest is 120k * 6% / 12 = 600; half elapsed
        let accrued = loan_accrued_interest(&loan, d(2023, 1, 30));
        assert_relative_eq!(accrued, 300.0, epsilon = 1e-9);

        assert_eq!(loan_accrued_interest(&loan, d(2022, 12, 1)), 0.0);
        assert_eq!(loan_accrued_interest(&loan, d(2024, 1, 15)), 0.0);
    }

    #[test]
    fn test_clean_plus_accrued_is_dirty() {
        let bond = sample_bond();
        let settlement = d(2023, 7, 15);
        let dirty = dirty_price(
            &bond,
            settlement,
            0.06,
            Compounding::Compounded,
            Frequency::Annual,
        )
        .unwrap();
        let clean = clean_price(
            &bond,
            settlement,
            0.06,
            Compounding::Compounded,
            Frequency::Annual,
        )
        .unwrap();
        let accrued_per_100 = accrued_interest(&bond, settlement) / bond.face_value() * 100.0;
        assert_relative_eq!(clean + accrued_per_100, dirty, epsilon = 1e-12);
    }
}
