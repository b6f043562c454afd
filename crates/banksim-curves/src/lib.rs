//! # Banksim Curves
//!
//! Yield curve construction and discounting for the banksim
//! balance-sheet simulator.
//!
//! The central object is the [`DiscountCurve`], a piecewise log-cubic
//! discount curve bootstrapped from par treasury yields by the
//! [`CurveBuilder`]. Instruments hold a [`CurveHandle`], a relinkable
//! reference that the simulation swaps to a fresh curve on each step
//! without touching the instruments themselves.
//!
//! ## Example
//!
//! ```rust,ignore
//! use banksim_curves::{CurveBuilder, CurveHandle, ParYieldQuote};
//!
//! let builder = CurveBuilder::new(reference_date);
//! let curve = builder.build(&quotes)?;
//!
//! let handle = CurveHandle::new();
//! handle.link(std::sync::Arc::new(curve));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod bootstrap;
pub mod compounding;
pub mod curves;
pub mod error;
pub mod handle;
pub mod traits;

pub use bootstrap::{CurveBuilder, ParYieldQuote};
pub use curves::{DiscountCurve, FlatForwardCurve};
pub use error::{CurveError, CurveResult};
pub use handle::CurveHandle;
pub use traits::Curve;
