//! Relinkable curve handle.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use banksim_core::types::{Compounding, Frequency};
use banksim_core::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A relinkable, shared reference to a discount curve.
///
/// Instruments are priced through a handle rather than a concrete curve
/// so the simulation can rebuild the curve each step and swap it in with
/// [`link`](CurveHandle::link); every holder of a clone observes the new
/// curve immediately. Cloning the handle is cheap and clones share the
/// same slot.
///
/// A freshly created handle is empty; valuing through it yields
/// [`CurveError::NotLinked`].
#[derive(Clone, Default)]
pub struct CurveHandle {
    slot: Arc<RwLock<Option<Arc<dyn Curve>>>>,
}

impl CurveHandle {
    /// Creates an empty handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle already linked to a curve.
    #[must_use]
    pub fn with_curve(curve: Arc<dyn Curve>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(curve))),
        }
    }

    /// Points the handle (and every clone of it) at a new curve.
    pub fn link(&self, curve: Arc<dyn Curve>) {
        *self.slot.write() = Some(curve);
    }

    /// Clears the handle.
    pub fn unlink(&self) {
        *self.slot.write() = None;
    }

    /// Returns the linked curve, if any.
    #[must_use]
    pub fn curve(&self) -> Option<Arc<dyn Curve>> {
        self.slot.read().clone()
    }

    /// Returns true if a curve is linked.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Discount factor at a date through the linked curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NotLinked` if the handle is empty, otherwise
    /// propagates curve errors.
    pub fn discount_factor_at(&self, date: Date) -> CurveResult<f64> {
        self.curve()
            .ok_or(CurveError::NotLinked)?
            .discount_factor_at(date)
    }

    /// Zero rate at a date through the linked curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NotLinked` if the handle is empty, otherwise
    /// propagates curve errors.
    pub fn zero_rate_at(
        &self,
        date: Date,
        comp: Compounding,
        frequency: Frequency,
    ) -> CurveResult<f64> {
        self.curve()
            .ok_or(CurveError::NotLinked)?
            .zero_rate_at(date, comp, frequency)
    }

    /// Reference date of the linked curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NotLinked` if the handle is empty.
    pub fn reference_date(&self) -> CurveResult<Date> {
        Ok(self.curve().ok_or(CurveError::NotLinked)?.reference_date())
    }
}

impl fmt::Debug for CurveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveHandle")
            .field("linked", &self.is_linked())
            .finish()
    }
}
