//! Bracketed root finding.

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Default maximum iterations for root-finding.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Iterations used.
    pub iterations: u32,
    /// Residual f(root).
    pub residual: f64,
}

/// Brent's root-finding algorithm.
///
/// Combines bisection, the secant method, and inverse quadratic
/// interpolation. Guaranteed to converge given a valid bracket, and the
/// usual choice when no derivative is available.
///
/// Requires `f(a) * f(b) <= 0`.
///
/// # Errors
///
/// Returns `MathError::InvalidBracket` if the endpoints do not bracket a
/// root, or `MathError::ConvergenceFailed` if the iteration limit is hit.
///
/// # Example
///
/// ```rust
/// use banksim_math::solvers::{brent, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // Keep b the best guess: |f(a)| >= |f(b)|
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if fb.abs() < config.tolerance || (b - a).abs() < config.tolerance {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        let mut use_bisection = true;
        let mut s = 0.0;

        if (fa - fc).abs() > 1e-15 && (fb - fc).abs() > 1e-15 {
            // Inverse quadratic interpolation
            let r = fb / fc;
            let p = fa / fc;
            let q = fa / fb;

            s = b - (q * (q - r) * (b - a) + (1.0 - r) * (b - c) * p)
                / ((q - 1.0) * (r - 1.0) * (p - 1.0));

            let m = (a + b) / 2.0;
            if s > m.min(b) && s < m.max(b) && (s - b).abs() < e.abs() / 2.0 {
                use_bisection = false;
            }
        } else if (fb - fa).abs() > 1e-15 {
            // Secant step
            s = b - fb * (b - a) / (fb - fa);

            let m = (a + b) / 2.0;
            if s > m.min(b) && s < m.max(b) && (s - b).abs() < e.abs() / 2.0 {
                use_bisection = false;
            }
        }

        if use_bisection {
            s = (a + b) / 2.0;
            e = b - a;
            d = e;
        } else {
            e = d;
            d = s - b;
        }

        c = b;
        fc = fb;

        let fs = f(s);

        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_discount_factor_solve() {
        // The kind of equation bootstrapping produces: PV(df) - 100 = 0
        // with PV linear in the pillar discount factor.
        let f = |df: f64| 2.5 * (0.98 + 0.96) + 102.5 * df - 100.0;
        let result = brent(f, 1e-6, 1.5, &SolverConfig::default()).unwrap();
        assert!(f(result.root).abs() < 1e-9);
        assert!(result.root > 0.0 && result.root < 1.0);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;
        assert!(brent(f, 2.0, 3.0, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_converges_quickly() {
        let f = |x: f64| x.sin();
        let result = brent(f, 3.0, 4.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
        assert!(result.iterations < 20);
    }
}
