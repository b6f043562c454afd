//! Instrument factory with market-standard defaults.

use banksim_core::calendars::{BusinessDayConvention, CalendarKind};
use banksim_core::daycounts::DayCountConvention;
use banksim_core::types::Frequency;
use banksim_core::Date;
use banksim_curves::CurveHandle;

use crate::error::InstrumentResult;
use crate::instruments::{
    AmortizingFixedRateLoan, CashAccount, DemandDeposit, FixedRateBond, Instrument, InstrumentKind,
};
use crate::schedule::DateGeneration;

/// Builds instruments with treasury-market conventions pre-applied.
///
/// Everything the factory creates is issued on the factory's reference
/// date and priced through the factory's curve handle, so one relink
/// reprices the whole portfolio. Bonds come out semiannual with Act/Act
/// accrual, backward coupon generation, and same-day settlement; loans
/// amortize monthly.
#[derive(Debug, Clone)]
pub struct InstrumentFactory {
    reference_date: Date,
    curve: CurveHandle,
    calendar: CalendarKind,
    convention: BusinessDayConvention,
    settlement_days: u32,
}

impl InstrumentFactory {
    /// Creates a factory issuing as of `reference_date`.
    #[must_use]
    pub fn new(reference_date: Date, curve: CurveHandle) -> Self {
        Self {
            reference_date,
            curve,
            calendar: CalendarKind::UnitedStates,
            convention: BusinessDayConvention::Following,
            settlement_days: 0,
        }
    }

    /// Overrides the holiday calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarKind) -> Self {
        self.calendar = calendar;
        self
    }

    /// Overrides the bond settlement lag in business days.
    #[must_use]
    pub fn with_settlement_days(mut self, settlement_days: u32) -> Self {
        self.settlement_days = settlement_days;
        self
    }

    /// The factory's issue date.
    #[must_use]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// The curve handle shared by everything this factory creates.
    #[must_use]
    pub fn curve(&self) -> &CurveHandle {
        &self.curve
    }

    /// A cash account.
    #[must_use]
    pub fn create_cash(&self, amount: f64) -> Instrument {
        Instrument::Cash(CashAccount::new(amount))
    }

    /// Non-interest bearing demand deposits.
    #[must_use]
    pub fn create_demand_deposit(&self, amount: f64) -> Instrument {
        Instrument::DemandDeposit(DemandDeposit::new(amount))
    }

    /// A semiannual treasury note maturing on `maturity`.
    ///
    /// # Errors
    ///
    /// Returns an error for unusable terms.
    pub fn create_treasury_note(
        &self,
        face_value: f64,
        coupon_rate: f64,
        maturity: Date,
    ) -> InstrumentResult<Instrument> {
        self.bullet(InstrumentKind::TreasuryNote, face_value, coupon_rate, maturity)
    }

    /// A semiannual treasury bond maturing on `maturity`.
    ///
    /// # Errors
    ///
    /// Returns an error for unusable terms.
    pub fn create_treasury_bond(
        &self,
        face_value: f64,
        coupon_rate: f64,
        maturity: Date,
    ) -> InstrumentResult<Instrument> {
        self.bullet(InstrumentKind::TreasuryBond, face_value, coupon_rate, maturity)
    }

    /// A monthly amortizing mortgage with a term in months.
    ///
    /// # Errors
    ///
    /// Returns an error for unusable terms.
    pub fn create_mortgage(
        &self,
        principal: f64,
        rate: f64,
        term_months: u32,
    ) -> InstrumentResult<Instrument> {
        let maturity = self.reference_date.add_months(term_months as i32)?;
        self.amortizing(InstrumentKind::Mortgage, principal, rate, maturity)
    }

    /// A monthly amortizing C&I loan maturing on `maturity`.
    ///
    /// # Errors
    ///
    /// Returns an error for unusable terms.
    pub fn create_ci_loan(
        &self,
        principal: f64,
        rate: f64,
        maturity: Date,
    ) -> InstrumentResult<Instrument> {
        self.amortizing(InstrumentKind::CommercialLoan, principal, rate, maturity)
    }

    /// A monthly amortizing C&I loan with a term in months.
    ///
    /// # Errors
    ///
    /// Returns an error for unusable terms.
    pub fn create_ci_loan_with_term(
        &self,
        principal: f64,
        rate: f64,
        term_months: u32,
    ) -> InstrumentResult<Instrument> {
        let maturity = self.reference_date.add_months(term_months as i32)?;
        self.amortizing(InstrumentKind::CommercialLoan, principal, rate, maturity)
    }

    fn bullet(
        &self,
        kind: InstrumentKind,
        face_value: f64,
        coupon_rate: f64,
        maturity: Date,
    ) -> InstrumentResult<Instrument> {
        Ok(Instrument::Bond(FixedRateBond::new(
            kind,
            face_value,
            coupon_rate,
            self.reference_date,
            maturity,
            Frequency::SemiAnnual,
            self.settlement_days,
            DayCountConvention::ActActIsda,
            self.calendar,
            self.convention,
            DateGeneration::Backward,
            self.curve.clone(),
        )?))
    }

    fn amortizing(
        &self,
        kind: InstrumentKind,
        principal: f64,
        rate: f64,
        maturity: Date,
    ) -> InstrumentResult<Instrument> {
        Ok(Instrument::Loan(AmortizingFixedRateLoan::new(
            kind,
            principal,
            rate,
            self.reference_date,
            maturity,
            Frequency::Monthly,
            self.calendar,
            self.convention,
            self.curve.clone(),
        )?))
    }
}
