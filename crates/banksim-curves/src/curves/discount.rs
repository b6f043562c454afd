//! Piecewise log-cubic discount curve.

use banksim_core::Date;
use banksim_math::interpolation::{CubicSpline, Interpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Interpolation backend over the log discount factors.
///
/// A full curve carries enough pillars for a cubic spline; a curve built
/// from one or two quotes falls back to log-linear.
#[derive(Debug, Clone)]
enum LogDfInterp {
    Spline(CubicSpline),
    Linear { ts: Vec<f64>, ln_dfs: Vec<f64> },
}

/// A discount curve defined by dated pillar discount factors.
///
/// Interpolates cubically on the log of the discount factors, which is
/// the piecewise log-cubic scheme treasury curves are conventionally
/// built with. Beyond the last pillar the log discount factor continues
/// linearly at the boundary slope, i.e. the forward rate is held flat.
/// Queries at or before the reference date return 1.0.
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    reference_date: Date,
    max_date: Date,
    /// Pillar times in years (days/365 from reference), starting at 0.0.
    ts: Vec<f64>,
    /// Pillar discount factors, starting at 1.0.
    dfs: Vec<f64>,
    interp: LogDfInterp,
}

impl DiscountCurve {
    /// Builds a discount curve from dated pillars.
    ///
    /// The reference date pillar (df = 1.0) is implicit and must not be
    /// supplied. Pillars must be strictly increasing and dated after the
    /// reference date, with strictly positive discount factors.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InsufficientQuotes` for an empty pillar set,
    /// `CurveError::NonMonotonicPillar` for out-of-order dates, or
    /// `CurveError::InvalidQuote` for non-positive discount factors.
    pub fn new(reference_date: Date, pillars: Vec<(Date, f64)>) -> CurveResult<Self> {
        if pillars.is_empty() {
            return Err(CurveError::InsufficientQuotes {
                required: 1,
                got: 0,
            });
        }

        let mut ts = Vec::with_capacity(pillars.len() + 1);
        let mut dfs = Vec::with_capacity(pillars.len() + 1);
        ts.push(0.0);
        dfs.push(1.0);

        let mut prev = reference_date;
        for &(date, df) in &pillars {
            if date <= prev {
                return Err(CurveError::NonMonotonicPillar { date, prev });
            }
            if df <= 0.0 || !df.is_finite() {
                return Err(CurveError::invalid_quote(
                    date,
                    format!("discount factor must be positive, got {df}"),
                ));
            }
            ts.push(reference_date.days_between(&date) as f64 / 365.0);
            dfs.push(df);
            prev = date;
        }

        let ln_dfs: Vec<f64> = dfs.iter().map(|df| df.ln()).collect();
        let interp = if ts.len() >= 3 {
            LogDfInterp::Spline(CubicSpline::new(ts.clone(), ln_dfs)?.with_extrapolation())
        } else {
            LogDfInterp::Linear {
                ts: ts.clone(),
                ln_dfs,
            }
        };

        Ok(Self {
            reference_date,
            max_date: prev,
            ts,
            dfs,
            interp,
        })
    }

    /// Returns the pillar times and discount factors, including the
    /// implicit (0, 1) pillar.
    #[must_use]
    pub fn pillars(&self) -> (&[f64], &[f64]) {
        (&self.ts, &self.dfs)
    }

    /// Number of pillars excluding the implicit reference pillar.
    #[must_use]
    pub fn pillar_count(&self) -> usize {
        self.ts.len() - 1
    }

    fn ln_df(&self, t: f64) -> CurveResult<f64> {
        match &self.interp {
            LogDfInterp::Spline(spline) => Ok(spline.interpolate(t)?),
            LogDfInterp::Linear { ts, ln_dfs } => {
                let n = ts.len();
                // Locate segment, extending the end segments linearly
                let i = match ts
                    .binary_search_by(|probe| probe.partial_cmp(&t).unwrap_or(std::cmp::Ordering::Equal))
                {
                    Ok(i) => i.min(n - 2),
                    Err(i) => i.saturating_sub(1).min(n - 2),
                };
                let slope = (ln_dfs[i + 1] - ln_dfs[i]) / (ts[i + 1] - ts[i]);
                Ok(ln_dfs[i] + slope * (t - ts[i]))
            }
        }
    }
}

impl Curve for DiscountCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok(self.ln_df(t)?.exp())
    }

    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn max_date(&self) -> Date {
        self.max_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use banksim_core::types::{Compounding, Frequency};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn sample_curve() -> DiscountCurve {
        let reference = d(2023, 1, 1);
        // Roughly 4% flat continuous
        let pillars = vec![
            (d(2023, 7, 1), 0.980),
            (d(2024, 1, 1), 0.961),
            (d(2025, 1, 1), 0.923),
            (d(2028, 1, 1), 0.819),
            (d(2033, 1, 1), 0.670),
        ];
        DiscountCurve::new(reference, pillars).unwrap()
    }

    #[test]
    fn test_passes_through_pillars() {
        let curve = sample_curve();
        let t = d(2023, 1, 1).days_between(&d(2025, 1, 1)) as f64 / 365.0;
        assert_relative_eq!(curve.discount_factor(t).unwrap(), 0.923, epsilon = 1e-10);
    }

    #[test]
    fn test_reference_and_before_is_one() {
        let curve = sample_curve();
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        assert_eq!(curve.discount_factor(-1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_extrapolation_flat_forward() {
        let curve = sample_curve();
        // Beyond the last pillar, the forward rate holds at the boundary
        // value, so ln df keeps declining linearly.
        let f_inside = curve.forward_rate(9.5, 9.9).unwrap();
        let f_beyond = curve.forward_rate(12.0, 12.4).unwrap();
        assert_relative_eq!(f_inside, f_beyond, epsilon = 5e-3);
        assert!(curve.discount_factor(15.0).unwrap() < curve.discount_factor(10.0).unwrap());
    }

    #[test]
    fn test_two_pillar_curve_log_linear() {
        let reference = d(2023, 1, 1);
        let curve = DiscountCurve::new(reference, vec![(d(2024, 1, 1), 0.96)]).unwrap();
        let df = curve.discount_factor(0.5).unwrap();
        // Log-linear midpoint
        assert_relative_eq!(df, 0.96f64.powf(0.5 * 365.0 / 365.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_bad_pillars() {
        let reference = d(2023, 1, 1);
        assert!(DiscountCurve::new(reference, vec![]).is_err());
        assert!(DiscountCurve::new(reference, vec![(d(2022, 1, 1), 0.9)]).is_err());
        assert!(DiscountCurve::new(reference, vec![(d(2024, 1, 1), -0.5)]).is_err());
        assert!(DiscountCurve::new(
            reference,
            vec![(d(2024, 1, 1), 0.96), (d(2023, 6, 1), 0.98)]
        )
        .is_err());
    }

    #[test]
    fn test_zero_rates_near_flat_input() {
        let curve = sample_curve();
        let r = curve
            .zero_rate(5.0, Compounding::Continuous, Frequency::Annual)
            .unwrap();
        assert!((0.03..0.05).contains(&r));
    }
}
