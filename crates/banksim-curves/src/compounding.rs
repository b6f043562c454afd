//! Rate and discount factor conversions.

use banksim_core::types::{Compounding, Frequency};

/// Growth factor of one unit invested at `rate` for `t` years.
#[must_use]
pub fn compound_factor(rate: f64, t: f64, compounding: Compounding, frequency: Frequency) -> f64 {
    match compounding {
        Compounding::Simple => 1.0 + rate * t,
        Compounding::Compounded => {
            let n = f64::from(frequency.periods_per_year());
            (1.0 + rate / n).powf(n * t)
        }
        Compounding::Continuous => (rate * t).exp(),
    }
}

/// Discount factor implied by `rate` over `t` years.
#[must_use]
pub fn discount_factor(rate: f64, t: f64, compounding: Compounding, frequency: Frequency) -> f64 {
    1.0 / compound_factor(rate, t, compounding, frequency)
}

/// The rate implied by a discount factor over `t` years.
///
/// Returns 0.0 for non-positive `t` or non-positive discount factors,
/// which keeps zero-rate queries total over the whole curve domain.
#[must_use]
pub fn implied_rate(df: f64, t: f64, compounding: Compounding, frequency: Frequency) -> f64 {
    if t <= 0.0 || df <= 0.0 {
        return 0.0;
    }
    match compounding {
        Compounding::Simple => (1.0 / df - 1.0) / t,
        Compounding::Compounded => {
            let n = f64::from(frequency.periods_per_year());
            n * ((1.0 / df).powf(1.0 / (n * t)) - 1.0)
        }
        Compounding::Continuous => -df.ln() / t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_continuous_roundtrip() {
        let df = discount_factor(0.05, 2.0, Compounding::Continuous, Frequency::Annual);
        assert_relative_eq!(df, (-0.1f64).exp(), epsilon = 1e-14);
        let rate = implied_rate(df, 2.0, Compounding::Continuous, Frequency::Annual);
        assert_relative_eq!(rate, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_semiannual_compounding() {
        let df = discount_factor(0.06, 1.0, Compounding::Compounded, Frequency::SemiAnnual);
        assert_relative_eq!(df, 1.0 / (1.03f64 * 1.03), epsilon = 1e-14);
    }

    #[test]
    fn test_simple_interest() {
        let df = discount_factor(0.04, 0.5, Compounding::Simple, Frequency::Annual);
        assert_relative_eq!(df, 1.0 / 1.02, epsilon = 1e-14);
        let rate = implied_rate(df, 0.5, Compounding::Simple, Frequency::Annual);
        assert_relative_eq!(rate, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(
            implied_rate(0.95, 0.0, Compounding::Continuous, Frequency::Annual),
            0.0
        );
        assert_eq!(
            implied_rate(0.0, 1.0, Compounding::Continuous, Frequency::Annual),
            0.0
        );
    }
}
