//! Par-yield curve bootstrapping.
//!
//! Builds a [`DiscountCurve`] from a ladder of quoted par treasury
//! yields. Quotes maturing within roughly a year of the reference date
//! are treated as simple-interest deposits and convert to discount
//! factors in closed form; longer quotes are treated as semiannual par
//! bonds priced at 100, and their pillar discount factors are solved
//! sequentially with Brent's method, then polished with fixed-point
//! sweeps until the full log-cubic curve reprices every quote.

use banksim_core::calendars::{BusinessDayConvention, Calendar, CalendarKind};
use banksim_core::daycounts::DayCountConvention;
use banksim_core::Date;
use banksim_math::solvers::{brent, SolverConfig};

use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Par face amount all bond helpers price against.
const PAR: f64 = 100.0;

/// Maximum polishing sweeps over the bond pillars.
const MAX_SWEEPS: usize = 20;

/// Convergence threshold on pillar discount factor changes.
const SWEEP_TOLERANCE: f64 = 1e-12;

/// A quoted par yield at a maturity date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParYieldQuote {
    /// Maturity date of the quote.
    pub maturity: Date,
    /// Quoted annual yield as a decimal (0.05 = 5%).
    pub rate: f64,
}

impl ParYieldQuote {
    /// Creates a new par yield quote.
    #[must_use]
    pub fn new(maturity: Date, rate: f64) -> Self {
        Self { maturity, rate }
    }
}

/// Bootstraps discount curves from par yield ladders.
///
/// Conventions default to the treasury market: US calendar, Following
/// adjustment for payment dates, and Act/Act ISDA accrual.
pub struct CurveBuilder {
    reference_date: Date,
    calendar: Box<dyn Calendar>,
    convention: BusinessDayConvention,
    accrual: DayCountConvention,
    solver: SolverConfig,
}

impl CurveBuilder {
    /// Creates a builder anchored at the given reference date.
    #[must_use]
    pub fn new(reference_date: Date) -> Self {
        Self {
            reference_date,
            calendar: CalendarKind::UnitedStates.calendar(),
            convention: BusinessDayConvention::Following,
            accrual: DayCountConvention::ActActIsda,
            solver: SolverConfig::default().with_tolerance(1e-10),
        }
    }

    /// Sets the holiday calendar.
    #[must_use]
    pub fn with_calendar(mut self, kind: CalendarKind) -> Self {
        self.calendar = kind.calendar();
        self
    }

    /// Sets the business day convention for payment dates.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// The builder's reference date.
    #[must_use]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Quotes at or before this date bootstrap as simple deposits.
    ///
    /// One year plus a week of slack, so a "1 Yr" quote whose maturity
    /// lands a few days past the anniversary still counts as a deposit.
    pub fn deposit_cutoff(&self) -> CurveResult<Date> {
        let anniversary = self
            .reference_date
            .add_years(1)
            .map_err(|e| CurveError::Interpolation {
                reason: e.to_string(),
            })?;
        Ok(anniversary.add_days(7))
    }

    /// Bootstraps a discount curve from the quote ladder.
    ///
    /// Quotes must be strictly increasing in maturity and dated after
    /// the reference date.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InsufficientQuotes` for an empty ladder,
    /// `CurveError::InvalidQuote` for unusable rates or dates, or
    /// `CurveError::BootstrapFailure` if a pillar solve does not
    /// converge.
    pub fn build(&self, quotes: &[ParYieldQuote]) -> CurveResult<DiscountCurve> {
        if quotes.is_empty() {
            return Err(CurveError::InsufficientQuotes {
                required: 1,
                got: 0,
            });
        }

        let mut prev = self.reference_date;
        for q in quotes {
            if q.maturity <= prev {
                return Err(CurveError::NonMonotonicPillar {
                    date: q.maturity,
                    prev,
                });
            }
            if !q.rate.is_finite() || q.rate <= -1.0 {
                return Err(CurveError::invalid_quote(
                    q.maturity,
                    format!("rate {} is not usable", q.rate),
                ));
            }
            prev = q.maturity;
        }

        let cutoff = self.deposit_cutoff()?;
        let mut pillars: Vec<(Date, f64)> = Vec::with_capacity(quotes.len());
        let mut bond_indices: Vec<usize> = Vec::new();

        for q in quotes {
            if q.maturity <= cutoff {
                pillars.push((q.maturity, self.deposit_discount_factor(q)?));
            } else {
                let df = self.solve_bond_pillar(&pillars, q)?;
                bond_indices.push(pillars.len());
                pillars.push((q.maturity, df));
            }
        }

        // The spline is global, so adding later pillars perturbs earlier
        // segments. Polish the bond pillars in place until stable.
        let bond_quotes: Vec<ParYieldQuote> = quotes
            .iter()
            .copied()
            .filter(|q| q.maturity > cutoff)
            .collect();
        for sweep in 0..MAX_SWEEPS {
            let mut max_change = 0.0f64;
            for (&idx, q) in bond_indices.iter().zip(&bond_quotes) {
                let df = self.resolve_pillar(&pillars, idx, q)?;
                max_change = max_change.max((df - pillars[idx].1).abs());
                pillars[idx].1 = df;
            }
            if max_change < SWEEP_TOLERANCE {
                log::debug!(
                    "bootstrap converged after {} sweeps ({} pillars)",
                    sweep + 1,
                    pillars.len()
                );
                break;
            }
        }

        DiscountCurve::new(self.reference_date, pillars)
    }

    /// Reprices a par bond quote on a finished curve.
    ///
    /// A correctly bootstrapped curve returns (approximately) 100 for
    /// every quote it was built from.
    ///
    /// # Errors
    ///
    /// Propagates curve query errors.
    pub fn reprice(&self, curve: &dyn Curve, quote: &ParYieldQuote) -> CurveResult<f64> {
        self.par_bond_price(curve, quote)
    }

    /// Discount factor for a simple-interest deposit quote.
    fn deposit_discount_factor(&self, quote: &ParYieldQuote) -> CurveResult<f64> {
        let tau = self
            .accrual
            .year_fraction(self.reference_date, quote.maturity);
        let growth = 1.0 + quote.rate * tau;
        if growth <= 0.0 {
            return Err(CurveError::invalid_quote(
                quote.maturity,
                format!("deposit at rate {} implies non-positive growth", quote.rate),
            ));
        }
        Ok(1.0 / growth)
    }

    /// Semiannual coupon period boundaries from the reference date to
    /// maturity, generated backward so the stub (if any) sits at the
    /// front. Unadjusted dates; the first entry is the reference date.
    fn bond_period_dates(&self, maturity: Date) -> CurveResult<Vec<Date>> {
        let mut dates = vec![maturity];
        let mut k = 1;
        loop {
            let d = maturity
                .add_months(-6 * k)
                .map_err(|e| CurveError::Interpolation {
                    reason: e.to_string(),
                })?;
            if d <= self.reference_date {
                break;
            }
            dates.push(d);
            k += 1;
        }
        dates.push(self.reference_date);
        dates.reverse();
        Ok(dates)
    }

    /// Dirty price of a freshly issued semiannual par bond, face 100,
    /// coupon equal to the quoted yield, on the given curve.
    fn par_bond_price(&self, curve: &dyn Curve, quote: &ParYieldQuote) -> CurveResult<f64> {
        let periods = self.bond_period_dates(quote.maturity)?;
        let mut pv = 0.0;
        for window in periods.windows(2) {
            let (start, end) = (window[0], window[1]);
            let coupon = PAR * quote.rate * self.accrual.year_fraction(start, end);
            let pay_date = self.calendar.adjust(end, self.convention);
            pv += coupon * curve.discount_factor_at(pay_date)?;
        }
        let redemption_date = self.calendar.adjust(quote.maturity, self.convention);
        pv += PAR * curve.discount_factor_at(redemption_date)?;
        Ok(pv)
    }

    /// Solves the discount factor for a new bond pillar appended after
    /// the existing ones.
    fn solve_bond_pillar(
        &self,
        pillars: &[(Date, f64)],
        quote: &ParYieldQuote,
    ) -> CurveResult<f64> {
        let mut trial = pillars.to_vec();
        trial.push((quote.maturity, 1.0));
        let idx = trial.len() - 1;
        self.solve_at(trial, idx, quote)
    }

    /// Re-solves an existing pillar's discount factor with the full
    /// pillar set in place.
    fn resolve_pillar(
        &self,
        pillars: &[(Date, f64)],
        idx: usize,
        quote: &ParYieldQuote,
    ) -> CurveResult<f64> {
        self.solve_at(pillars.to_vec(), idx, quote)
    }

    /// Objective for the pillar solve is the repriced par bond minus
    /// 100. A trial value that produces an unbuildable curve maps to a
    /// large positive residual so Brent steers away from it.
    fn solve_at(
        &self,
        trial: Vec<(Date, f64)>,
        idx: usize,
        quote: &ParYieldQuote,
    ) -> CurveResult<f64> {
        let objective = |df: f64| -> f64 {
            let mut pillars = trial.clone();
            pillars[idx].1 = df;
            match DiscountCurve::new(self.reference_date, pillars) {
                Ok(curve) => match self.par_bond_price(&curve, quote) {
                    Ok(price) => price - PAR,
                    Err(_) => PAR,
                },
                Err(_) => PAR,
            }
        };

        let result = brent(objective, 1e-8, 1.5, &self.solver)
            .map_err(|e| CurveError::bootstrap_failure(quote.maturity, e.to_string()))?;
        Ok(result.root)
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
    fn test_single_deposit_curve() {
        let reference = d(2023, 1, 3);
        let builder = CurveBuilder::new(reference);
        let maturity = reference.add_months(3).unwrap();
        let curve = builder
            .build(&[ParYieldQuote::new(maturity, 0.045)])
            .unwrap();

        let tau = DayCountConvention::ActActIsda.year_fraction(reference, maturity);
        assert_relative_eq!(
            curve.discount_factor_at(maturity).unwrap(),
            1.0 / (1.0 + 0.045 * tau),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_bond_period_dates_backward_stub() {
        let reference = d(2023, 1, 3);
        let builder = CurveBuilder::new(reference);
        // 2-year maturity off-cycle from the reference date
        let dates = builder.bond_period_dates(d(2024, 11, 15)).unwrap();
        assert_eq!(dates.first(), Some(&reference));
        assert_eq!(dates.last(), Some(&d(2024, 11, 15)));
        // Front stub is shorter than six months
        assert!(reference.days_between(&dates[1]) < 183);
        // Remaining periods are semiannual
        assert_eq!(dates[2], dates[1].add_months(6).unwrap());
    }

    #[test]
    fn test_rejects_unsorted_quotes() {
        let reference = d(2023, 1, 3);
        let builder = CurveBuilder::new(reference);
        let quotes = [
            ParYieldQuote::new(d(2025, 1, 3), 0.04),
            ParYieldQuote::new(d(2024, 1, 3), 0.045),
        ];
        assert!(matches!(
            builder.build(&quotes),
            Err(CurveError::NonMonotonicPillar { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_ladder() {
        let builder = CurveBuilder::new(d(2023, 1, 3));
        assert!(matches!(
            builder.build(&[]),
            Err(CurveError::InsufficientQuotes { .. })
        ));
    }

    #[test]
    fn test_flat_ladder_gives_flat_zero_rates() {
        use banksim_core::types::{Compounding, Frequency};

        let reference = d(2023, 1, 3);
        let builder = CurveBuilder::new(reference);
        let rate = 0.04;
        let quotes: Vec<ParYieldQuote> = [1, 3, 6]
            .iter()
            .map(|&m| ParYieldQuote::new(reference.add_months(m).unwrap(), rate))
            .chain(
                [2, 5, 10]
                    .iter()
                    .map(|&y| ParYieldQuote::new(reference.add_years(y).unwrap(), rate)),
            )
            .collect();

        let curve = builder.build(&quotes).unwrap();
        // Zero rates stay within a tight band of the quoted level
        for t in [0.5, 1.0, 3.0, 7.0] {
            let z = curve
                .zero_rate(t, Compounding::Compounded, Frequency::SemiAnnual)
                .unwrap();
            assert!((z - rate).abs() < 0.005, "zero rate {z} at t={t}");
        }
    }
}
