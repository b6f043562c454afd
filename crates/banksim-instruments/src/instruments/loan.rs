//! Amortizing fixed rate loans.

use banksim_core::calendars::{BusinessDayConvention, CalendarKind};
use banksim_core::types::{CashFlow, CashFlowKind, CashFlowSchedule, Frequency};
use banksim_core::Date;
use banksim_curves::CurveHandle;

use super::InstrumentKind;
use crate::error::{InstrumentError, InstrumentResult};
use crate::schedule;

/// An amortizing fixed rate loan with level payments.
///
/// Covers mortgages (monthly) and C&I loans. Each payment splits into an
/// interest portion on the running balance and a principal portion, with
/// the final principal payment absorbing the rounding residue so the
/// balance finishes at exactly zero.
#[derive(Debug, Clone)]
pub struct AmortizingFixedRateLoan {
    kind: InstrumentKind,
    name: String,
    principal: f64,
    rate: f64,
    issue_date: Date,
    maturity: Date,
    frequency: Frequency,
    schedule: CashFlowSchedule,
    curve: CurveHandle,
}

impl AmortizingFixedRateLoan {
    /// Creates a loan and generates its level-payment schedule.
    ///
    /// # Errors
    ///
    /// Returns `InstrumentError::InvalidTerms` for a non-positive
    /// principal, an unusable rate, or a maturity that does not follow
    /// the issue date.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: InstrumentKind,
        principal: f64,
        rate: f64,
        issue_date: Date,
        maturity: Date,
        frequency: Frequency,
        calendar: CalendarKind,
        convention: BusinessDayConvention,
        curve: CurveHandle,
    ) -> InstrumentResult<Self> {
        let name = format!("{:.2}% {}", rate * 100.0, maturity);

        if !(principal.is_finite() && principal > 0.0) {
            return Err(InstrumentError::invalid_terms(
                &name,
                format!("principal must be positive, got {principal}"),
            ));
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(InstrumentError::invalid_terms(
                &name,
                format!("rate {rate} is not usable"),
            ));
        }
        if maturity <= issue_date {
            return Err(InstrumentError::invalid_terms(
                &name,
                format!("maturity {maturity} does not follow issue date {issue_date}"),
            ));
        }

        let periods = schedule::generate_forward(issue_date, maturity, frequency, calendar, convention)?;
        let n = periods.period_count();
        let i = rate / f64::from(frequency.periods_per_year());

        // Level payment; straight-line when the rate is zero
        let payment = if i > 0.0 {
            principal * i / (1.0 - (1.0 + i).powi(-(n as i32)))
        } else {
            principal / n as f64
        };

        let mut flows = CashFlowSchedule::with_capacity(2 * n);
        let mut balance = principal;
        for (k, window) in periods.unadjusted.windows(2).enumerate() {
            let (start, end) = (window[0], window[1]);
            let pay_date = periods.payment_dates[k];

            let interest = balance * i;
            // Final payment retires whatever balance remains
            let principal_part = if k == n - 1 {
                balance
            } else {
                payment - interest
            };
            balance -= principal_part;

            flows.push(CashFlow::interest(pay_date, interest, start, end));
            flows.push(CashFlow::principal_portion(pay_date, principal_part, balance));
        }

        Ok(Self {
            kind,
            name,
            principal,
            rate,
            issue_date,
            maturity,
            frequency,
            schedule: flows,
            curve,
        })
    }

    /// Display name, e.g. `6.00% 2053-04-01`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregation category.
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Original principal.
    #[must_use]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual rate as a decimal.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
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

    /// Payment frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The generated cash flow schedule (interest and principal
    /// portions as separate flows on each payment date).
    #[must_use]
    pub fn schedule(&self) -> &CashFlowSchedule {
        &self.schedule
    }

    /// The relinkable curve the loan prices against.
    #[must_use]
    pub fn curve(&self) -> &CurveHandle {
        &self.curve
    }

    /// Outstanding principal after all payments dated on or before
    /// `date` have settled.
    #[must_use]
    pub fn outstanding_on(&self, date: Date) -> f64 {
        let mut outstanding = self.principal;
        for cf in self.schedule.iter() {
            if cf.date() > date {
                break;
            }
            if cf.kind() == CashFlowKind::PrincipalPortion {
                if let Some(after) = cf.notional_after() {
                    outstanding = after;
                }
            }
        }
        outstanding
    }

    /// Present value of the remaining cash flows on the linked curve.
    ///
    /// # Errors
    ///
    /// Returns a curve error if no curve is linked or a query fails.
    pub fn value_on_trading_book(&self, date: Date) -> InstrumentResult<f64> {
        let mut pv = 0.0;
        for cf in self.schedule.iter().filter(|cf| cf.date() > date) {
            pv += cf.amount() * self.curve.discount_factor_at(cf.date())?;
        }
        Ok(pv)
    }
}
