//! Cash flow types for instrument schedules.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowKind {
    /// Regular coupon payment on a bullet bond
    Coupon,
    /// Principal repayment at maturity
    Principal,
    /// Combined coupon and principal (final bullet payment)
    CouponAndPrincipal,
    /// Interest portion of an amortizing payment
    Interest,
    /// Principal portion of an amortizing payment
    PrincipalPortion,
}

impl fmt::Display for CashFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowKind::Coupon => "Coupon",
            CashFlowKind::Principal => "Principal",
            CashFlowKind::CouponAndPrincipal => "Coupon+Principal",
            CashFlowKind::Interest => "Interest",
            CashFlowKind::PrincipalPortion => "Principal Portion",
        };
        write!(f, "{name}")
    }
}

/// A dated cash flow.
///
/// Represents a single payment produced by an instrument, with the accrual
/// period that generated it (for coupons) and, for amortizing principal
/// payments, the notional remaining after the payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment date
    date: Date,
    /// Cash flow amount in currency units
    amount: f64,
    /// Type of cash flow
    kind: CashFlowKind,
    /// Accrual period start date (for coupons/interest)
    accrual_start: Option<Date>,
    /// Accrual period end date (for coupons/interest)
    accrual_end: Option<Date>,
    /// Remaining notional after this cash flow (amortizing principal)
    notional_after: Option<f64>,
}

impl CashFlow {
    /// Creates a new cash flow with basic fields.
    #[must_use]
    pub fn new(date: Date, amount: f64, kind: CashFlowKind) -> Self {
        Self {
            date,
            amount,
            kind,
            accrual_start: None,
            accrual_end: None,
            notional_after: None,
        }
    }

    /// Creates a coupon cash flow with its accrual period.
    #[must_use]
    pub fn coupon(date: Date, amount: f64, accrual_start: Date, accrual_end: Date) -> Self {
        Self {
            date,
            amount,
            kind: CashFlowKind::Coupon,
            accrual_start: Some(accrual_start),
            accrual_end: Some(accrual_end),
            notional_after: None,
        }
    }

    /// Creates a final bullet cash flow (coupon + principal).
    #[must_use]
    pub fn final_payment(
        date: Date,
        coupon: f64,
        principal: f64,
        accrual_start: Date,
        accrual_end: Date,
    ) -> Self {
        Self {
            date,
            amount: coupon + principal,
            kind: CashFlowKind::CouponAndPrincipal,
            accrual_start: Some(accrual_start),
            accrual_end: Some(accrual_end),
            notional_after: Some(0.0),
        }
    }

    /// Creates an interest-portion cash flow of an amortizing payment.
    #[must_use]
    pub fn interest(date: Date, amount: f64, accrual_start: Date, accrual_end: Date) -> Self {
        Self {
            date,
            amount,
            kind: CashFlowKind::Interest,
            accrual_start: Some(accrual_start),
            accrual_end: Some(accrual_end),
            notional_after: None,
        }
    }

    /// Creates a principal-portion cash flow of an amortizing payment.
    #[must_use]
    pub fn principal_portion(date: Date, amount: f64, notional_after: f64) -> Self {
        Self {
            date,
            amount,
            kind: CashFlowKind::PrincipalPortion,
            accrual_start: None,
            accrual_end: None,
            notional_after: Some(notional_after),
        }
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the cash flow amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the cash flow type.
    #[must_use]
    pub fn kind(&self) -> CashFlowKind {
        self.kind
    }

    /// Returns the accrual period start date, if any.
    #[must_use]
    pub fn accrual_start(&self) -> Option<Date> {
        self.accrual_start
    }

    /// Returns the accrual period end date, if any.
    #[must_use]
    pub fn accrual_end(&self) -> Option<Date> {
        self.accrual_end
    }

    /// Returns the remaining notional after this cash flow, if applicable.
    #[must_use]
    pub fn notional_after(&self) -> Option<f64> {
        self.notional_after
    }

    /// Returns true if this is an interest-bearing payment.
    #[must_use]
    pub fn is_interest(&self) -> bool {
        matches!(
            self.kind,
            CashFlowKind::Coupon | CashFlowKind::CouponAndPrincipal | CashFlowKind::Interest
        )
    }

    /// Returns true if this includes principal repayment.
    #[must_use]
    pub fn is_principal(&self) -> bool {
        matches!(
            self.kind,
            CashFlowKind::Principal
                | CashFlowKind::CouponAndPrincipal
                | CashFlowKind::PrincipalPortion
        )
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2} ({})", self.date, self.amount, self.kind)
    }
}

/// An ordered schedule of cash flows.
///
/// Generated once at instrument construction and never regenerated; only
/// the discount curve used to value the flows changes over time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    cash_flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Creates a new empty cash flow schedule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cash_flows: Vec::new(),
        }
    }

    /// Creates a schedule with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cash_flows: Vec::with_capacity(capacity),
        }
    }

    /// Adds a cash flow to the schedule.
    pub fn push(&mut self, cf: CashFlow) {
        self.cash_flows.push(cf);
    }

    /// Returns the cash flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashFlow] {
        &self.cash_flows
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cash_flows.len()
    }

    /// Returns true if there are no cash flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cash_flows.is_empty()
    }

    /// Returns an iterator over the cash flows.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlow> {
        self.cash_flows.iter()
    }

    /// Returns the total of all cash flow amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cash_flows.iter().map(CashFlow::amount).sum()
    }

    /// Returns the date of the last cash flow, if any.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.cash_flows.last().map(CashFlow::date)
    }

    /// Returns the cash flows falling strictly after `start` and up to and
    /// including `end`.
    ///
    /// This is the settlement window the simulation scans on each step.
    pub fn due_in(&self, start: Date, end: Date) -> impl Iterator<Item = &CashFlow> {
        self.cash_flows
            .iter()
            .filter(move |cf| cf.date > start && cf.date <= end)
    }
}

impl IntoIterator for CashFlowSchedule {
    type Item = CashFlow;
    type IntoIter = std::vec::IntoIter<CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.cash_flows.into_iter()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.cash_flows.iter()
    }
}

impl FromIterator<CashFlow> for CashFlowSchedule {
    fn from_iter<I: IntoIterator<Item = CashFlow>>(iter: I) -> Self {
        Self {
            cash_flows: iter.into_iter().collect(),
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
    fn test_cashflow_creation() {
        let cf = CashFlow::coupon(d(2023, 7, 15), 2.5, d(2023, 1, 15), d(2023, 7, 15));
        assert_eq!(cf.amount(), 2.5);
        assert!(cf.is_interest());
        assert!(!cf.is_principal());
    }

    #[test]
    fn test_final_payment() {
        let cf = CashFlow::final_payment(d(2030, 6, 15), 2.5, 100.0, d(2029, 12, 15), d(2030, 6, 15));
        assert_eq!(cf.amount(), 102.5);
        assert!(cf.is_interest());
        assert!(cf.is_principal());
        assert_eq!(cf.notional_after(), Some(0.0));
    }

    #[test]
    fn test_schedule_totals() {
        let mut schedule = CashFlowSchedule::new();
        schedule.push(CashFlow::coupon(d(2023, 6, 15), 2.5, d(2022, 12, 15), d(2023, 6, 15)));
        schedule.push(CashFlow::coupon(d(2023, 12, 15), 2.5, d(2023, 6, 15), d(2023, 12, 15)));

        assert_eq!(schedule.len(), 2);
        assert!((schedule.total() - 5.0).abs() < 1e-12);
        assert_eq!(schedule.last_date(), Some(d(2023, 12, 15)));
    }

    #[test]
    fn test_due_in_window_is_half_open() {
        let mut schedule = CashFlowSchedule::new();
        schedule.push(CashFlow::new(d(2023, 1, 15), 1.0, CashFlowKind::Interest));
        schedule.push(CashFlow::new(d(2023, 2, 15), 1.0, CashFlowKind::Interest));
        schedule.push(CashFlow::new(d(2023, 3, 15), 1.0, CashFlowKind::Interest));

        // (Jan 15, Feb 15]: excludes the flow on the window start
        let due: Vec<_> = schedule.due_in(d(2023, 1, 15), d(2023, 2, 15)).collect();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].date(), d(2023, 2, 15));
    }
}
