//! The core curve trait.

use banksim_core::types::{Compounding, Frequency};
use banksim_core::Date;

use crate::compounding;
use crate::error::CurveResult;

/// A discounting curve.
///
/// Provides discount factors for times measured in years from the
/// curve's reference date, plus zero-rate and forward-rate views derived
/// from them. Time is converted from dates at `days / 365`.
pub trait Curve: Send + Sync {
    /// Returns the discount factor from the reference date to time `t`.
    ///
    /// Returns 1.0 for `t <= 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve data cannot produce a value at `t`.
    fn discount_factor(&self, t: f64) -> CurveResult<f64>;

    /// Returns the curve's reference (valuation) date.
    fn reference_date(&self) -> Date;

    /// Returns the last date backed by market data.
    ///
    /// Queries beyond this date extrapolate at a flat forward rate.
    fn max_date(&self) -> Date;

    /// Returns the zero rate at time `t`.
    ///
    /// # Errors
    ///
    /// Propagates discount factor errors.
    fn zero_rate(&self, t: f64, comp: Compounding, frequency: Frequency) -> CurveResult<f64> {
        let df = self.discount_factor(t)?;
        Ok(compounding::implied_rate(df, t, comp, frequency))
    }

    /// Returns the simply-compounded forward rate between `t1` and `t2`.
    ///
    /// # Errors
    ///
    /// Propagates discount factor errors.
    fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Ok(0.0);
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        if df2 <= 0.0 {
            return Ok(0.0);
        }
        Ok((df1 / df2 - 1.0) / (t2 - t1))
    }

    /// Year fraction from the reference date to `date` at days/365.
    fn year_fraction(&self, date: Date) -> f64 {
        self.reference_date().days_between(&date) as f64 / 365.0
    }

    /// Discount factor for a specific date.
    ///
    /// # Errors
    ///
    /// Propagates discount factor errors.
    fn discount_factor_at(&self, date: Date) -> CurveResult<f64> {
        self.discount_factor(self.year_fraction(date))
    }

    /// Zero rate for a specific date.
    ///
    /// # Errors
    ///
    /// Propagates discount factor errors.
    fn zero_rate_at(
        &self,
        date: Date,
        comp: Compounding,
        frequency: Frequency,
    ) -> CurveResult<f64> {
        self.zero_rate(self.year_fraction(date), comp, frequency)
    }
}
