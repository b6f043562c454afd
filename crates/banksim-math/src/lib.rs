//! # Banksim Math
//!
//! Numerical routines backing the banksim curve layer:
//!
//! - **Interpolation**: natural cubic spline (used on log discount factors)
//! - **Solvers**: Brent's bracketed root finder (used by curve bootstrapping)
//!
//! ## Example
//!
//! ```rust
//! use banksim_math::solvers::{brent, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod interpolation;
pub mod solvers;

pub use error::{MathError, MathResult};
