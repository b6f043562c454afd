//! Fixed rate bullet bonds.

use banksim_core::calendars::{BusinessDayConvention, CalendarKind};
use banksim_core::daycounts::DayCountConvention;
use banksim_core::types::{CashFlow, CashFlowSchedule, Frequency};
use banksim_core::Date;
use banksim_curves::CurveHandle;

use super::InstrumentKind;
use crate::error::{InstrumentError, InstrumentResult};
use crate::schedule::{self, DateGeneration};

/// A fixed rate bullet bond.
///
/// Covers treasury notes, treasury bonds, and generic fixed couponed
/// paper; the [`InstrumentKind`] tag decides which balance-sheet line it
/// aggregates into. The coupon schedule is generated once at
/// construction and the final period pays coupon plus face.
#[derive(Debug, Clone)]
pub struct FixedRateBond {
    kind: InstrumentKind,
    name: String,
    face_value: f64,
    coupon_rate: f64,
    issue_date: Date,
    maturity: Date,
    frequency: Frequency,
    settlement_days: u32,
    day_count: DayCountConvention,
    calendar: CalendarKind,
    schedule: CashFlowSchedule,
    curve: CurveHandle,
}

impl FixedRateBond {
    /// Creates a fixed rate bond and generates its coupon schedule.
    ///
    /// # Errors
    ///
    /// Returns `InstrumentError::InvalidTerms` for a non-positive face,
    /// a non-finite or sub-(-100%) coupon, or a maturity that does not
    /// follow the issue date; date arithmetic errors propagate as
    /// `InstrumentError::Core`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: InstrumentKind,
        face_value: f64,
        coupon_rate: f64,
        issue_date: Date,
        maturity: Date,
        frequency: Frequency,
        settlement_days: u32,
        day_count: DayCountConvention,
        calendar: CalendarKind,
        convention: BusinessDayConvention,
        generation: DateGeneration,
        curve: CurveHandle,
    ) -> InstrumentResult<Self> {
        let name = format!("{:.2}% {}", coupon_rate * 100.0, maturity);

        if !(face_value.is_finite() && face_value > 0.0) {
            return Err(InstrumentError::invalid_terms(
                &name,
                format!("face value must be positive, got {face_value}"),
            ));
        }
        if !coupon_rate.is_finite() || coupon_rate <= -1.0 {
            return Err(InstrumentError::invalid_terms(
                &name,
                format!("coupon rate {coupon_rate} is not usable"),
            ));
        }
        if maturity <= issue_date {
            return Err(InstrumentError::invalid_terms(
                &name,
                format!("maturity {maturity} does not follow issue date {issue_date}"),
            ));
        }

        let periods =
            schedule::generate(issue_date, maturity, frequency, generation, calendar, convention)?;

        let mut flows = CashFlowSchedule::with_capacity(periods.period_count());
        let last = periods.period_count() - 1;
        for (i, window) in periods.unadjusted.windows(2).enumerate() {
            let (start, end) = (window[0], window[1]);
            let coupon = face_value * coupon_rate * day_count.year_fraction(start, end);
            let pay_date = periods.payment_dates[i];
            if i == last {
                flows.push(CashFlow::final_payment(pay_date, coupon, face_value, start, end));
            } else {
                flows.push(CashFlow::coupon(pay_date, coupon, start, end));
            }
        }

        Ok(Self {
            kind,
            name,
            face_value,
            coupon_rate,
            issue_date,
            maturity,
            frequency,
            settlement_days,
            day_count,
            calendar,
            schedule: flows,
            curve,
        })
    }

    /// Display name, e.g. `4.50% 2033-05-15`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregation category.
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Face value.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Accrual day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Business days between trade and settlement.
    #[must_use]
    pub fn settlement_days(&self) -> u32 {
        self.settlement_days
    }

    /// The settlement date for a trade on `date`: `settlement_days`
    /// business days forward on the bond's calendar.
    #[must_use]
    pub fn settlement_date(&self, date: Date) -> Date {
        let cal = self.calendar.calendar();
        let mut settled = date;
        for _ in 0..self.settlement_days {
            settled = settled.add_days(1);
            while !cal.is_business_day(settled) {
                settled = settled.add_days(1);
            }
        }
        settled
    }

    /// The generated cash flow schedule.
    #[must_use]
    pub fn schedule(&self) -> &CashFlowSchedule {
        &self.schedule
    }

    /// The relinkable curve the bond prices against.
    #[must_use]
    pub fn curve(&self) -> &CurveHandle {
        &self.curve
    }

    /// Held-to-maturity carrying value: face until maturity, then zero.
    #[must_use]
    pub fn value_on_banking_book(&self, date: Date) -> f64 {
        if date < self.maturity {
            self.face_value
        } else {
            0.0
        }
    }

    /// Present value of the remaining cash flows on the linked curve.
    ///
    /// Flows dated on or before the settlement date for `date` belong
    /// to the seller and are excluded.
    ///
    /// # Errors
    ///
    /// Returns a curve error if no curve is linked or a query fails.
    pub fn value_on_trading_book(&self, date: Date) -> InstrumentResult<f64> {
        let settlement = self.settlement_date(date);
        let mut pv = 0.0;
        for cf in self.schedule.iter().filter(|cf| cf.date() > settlement) {
            pv += cf.amount() * self.curve.discount_factor_at(cf.date())?;
        }
        Ok(pv)
    }
}
