//! Interpolation on sorted knot points.

use crate::error::{MathError, MathResult};

/// A one-dimensional interpolator over sorted knots.
pub trait Interpolator: Send + Sync {
    /// Interpolates the value at `x`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::ExtrapolationNotAllowed` if `x` lies outside
    /// the knot range and extrapolation is disabled.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns true if queries outside the knot range are permitted.
    fn allows_extrapolation(&self) -> bool;

    /// Smallest knot x.
    fn min_x(&self) -> f64;

    /// Largest knot x.
    fn max_x(&self) -> f64;
}

/// Natural cubic spline interpolation.
///
/// Piecewise cubic polynomials with continuous first and second
/// derivatives and zero second derivative at the endpoints.
///
/// Extrapolation, when enabled, continues the end segments linearly at
/// the boundary slope rather than extending the cubic, which keeps the
/// implied forward rates flat beyond the last knot when the spline is
/// applied to log discount factors.
///
/// # Example
///
/// ```rust
/// use banksim_math::interpolation::{CubicSpline, Interpolator};
///
/// let spline = CubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0]).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// assert!(y > 1.0 && y < 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot
    y2s: Vec<f64>,
    allow_extrapolation: bool,
}

impl CubicSpline {
    /// Creates a natural cubic spline through the given knots.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 3 points, if lengths
    /// differ, or if the x values are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 3 {
            return Err(MathError::insufficient_data(3, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        for i in 1..xs.len() {
            if xs[i] <= xs[i - 1] {
                return Err(MathError::invalid_input(
                    "x values must be strictly increasing",
                ));
            }
        }

        let y2s = second_derivatives(&xs, &ys);

        Ok(Self {
            xs,
            ys,
            y2s,
            allow_extrapolation: false,
        })
    }

    /// Enables linear extrapolation beyond the knot range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Finds the segment index i such that xs[i] <= x < xs[i+1].
    fn segment(&self, x: f64) -> usize {
        let n = self.xs.len();
        match self
            .xs
            .binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i.min(n - 2),
            Err(i) => i.saturating_sub(1).min(n - 2),
        }
    }

    /// First derivative of the spline at `x` (within the knot range).
    fn derivative_at(&self, x: f64) -> f64 {
        let i = self.segment(x);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;

        (self.ys[i + 1] - self.ys[i]) / h
            + ((3.0 * b * b - 1.0) * self.y2s[i + 1] - (3.0 * a * a - 1.0) * self.y2s[i]) * h / 6.0
    }

    fn eval_segment(&self, x: f64) -> f64 {
        let i = self.segment(x);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;

        a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * self.y2s[i] + (b * b * b - b) * self.y2s[i + 1]) * (h * h) / 6.0
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let (lo, hi) = (self.min_x(), self.max_x());

        if x < lo || x > hi {
            if !self.allow_extrapolation {
                return Err(MathError::ExtrapolationNotAllowed {
                    x,
                    min: lo,
                    max: hi,
                });
            }
            // Linear continuation at the boundary slope
            return if x < lo {
                Ok(self.ys[0] + self.derivative_at(lo) * (x - lo))
            } else {
                let n = self.ys.len();
                Ok(self.ys[n - 1] + self.derivative_at(hi) * (x - hi))
            };
        }

        Ok(self.eval_segment(x))
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Solves the tridiagonal system for natural spline second derivatives.
fn second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    let mut u = vec![0.0; n - 1];

    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * y2s[i - 1] + 2.0;
        y2s[i] = (sig - 1.0) / p;
        u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    for i in (0..n - 1).rev() {
        y2s[i] = y2s[i] * y2s[i + 1] + u[i];
    }

    y2s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_passes_through_knots() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];
        let spline = CubicSpline::new(xs.clone(), ys.clone()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.interpolate(*x).unwrap(), *y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_extrapolation_disabled_by_default() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        assert!(spline.interpolate(-0.5).is_err());
        assert!(spline.interpolate(2.5).is_err());
    }

    #[test]
    fn test_extrapolation_is_linear() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0])
            .unwrap()
            .with_extrapolation();

        // A straight line of knots extrapolates along the same line
        assert_relative_eq!(spline.interpolate(3.0).unwrap(), 3.0, epsilon = 1e-10);
        assert_relative_eq!(spline.interpolate(-1.0).unwrap(), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_insufficient_points() {
        assert!(CubicSpline::new(vec![0.0, 1.0], vec![0.0, 1.0]).is_err());
    }

    #[test]
    fn test_unsorted_rejected() {
        assert!(CubicSpline::new(vec![0.0, 2.0, 1.0], vec![0.0, 1.0, 2.0]).is_err());
    }

    proptest! {
        #[test]
        fn prop_interior_values_bounded_for_monotone_line(offset in 0.01f64..0.99) {
            // On collinear knots the spline reproduces the line exactly
            let spline = CubicSpline::new(
                vec![0.0, 1.0, 2.0, 3.0],
                vec![1.0, 2.0, 3.0, 4.0],
            ).unwrap();
            let x = 1.0 + offset;
            let y = spline.interpolate(x).unwrap();
            prop_assert!((y - (1.0 + x)).abs() < 1e-9);
        }
    }
}
